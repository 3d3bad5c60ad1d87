//! Treeviz formatter for token trees
//!
//! One line per token, nesting drawn with box characters, 2 columns per level:
//!
//!     <prefix><connector> <kind>[ @<start>..<end>][: <label>]
//!
//! Labels are quoted for text and code (truncated to `max_label` characters), `>>42` for
//! post links and `>>>/board/42` for thread links. Containers and line breaks have no label.
//! A final `references:` line lists the deduplicated references, if any.
//!
//! Example:
//!
//! ├─ post_link: >>12
//! ├─ text: " nice "
//! └─ bold
//!   └─ text: "really"
//! references: 12

use crate::config::TreevizConfig;
use crate::markup::token::{PostText, Token, TokenValue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreevizOptions {
    pub max_label: usize,
    pub show_spans: bool,
}

impl Default for TreevizOptions {
    fn default() -> Self {
        Self {
            max_label: 30,
            show_spans: false,
        }
    }
}

impl From<&TreevizConfig> for TreevizOptions {
    fn from(config: &TreevizConfig) -> Self {
        Self {
            max_label: config.max_label,
            show_spans: config.show_spans,
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn label(token: &Token<'_>, max_chars: usize) -> Option<String> {
    match &token.value {
        TokenValue::Text(text) | TokenValue::Code(text) => {
            Some(format!("{:?}", truncate(text, max_chars)))
        }
        TokenValue::PostLink(id) => Some(format!(">>{id}")),
        TokenValue::ThreadLink(target) => Some(target.to_string()),
        _ => None,
    }
}

pub fn to_treeviz_str(post: &PostText<'_>, options: &TreevizOptions) -> String {
    let mut result = String::new();
    append_children(&mut result, &post.tokens, "", options);

    if !post.references.is_empty() {
        let ids: Vec<String> = post.references.iter().map(u64::to_string).collect();
        result.push_str(&format!("references: {}\n", ids.join(", ")));
    }
    result
}

fn append_token(
    result: &mut String,
    token: &Token<'_>,
    prefix: &str,
    is_last: bool,
    options: &TreevizOptions,
) {
    let connector = if is_last { "└─" } else { "├─" };

    result.push_str(&format!("{}{} {}", prefix, connector, token.kind()));
    if options.show_spans {
        result.push_str(&format!(" @{}..{}", token.span.start, token.span.end));
    }
    if let Some(label) = label(token, options.max_label) {
        result.push_str(&format!(": {}", label));
    }
    result.push('\n');

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    append_children(result, token.children(), &new_prefix, options);
}

fn append_children(
    result: &mut String,
    tokens: &[Token<'_>],
    prefix: &str,
    options: &TreevizOptions,
) {
    for (i, token) in tokens.iter().enumerate() {
        let is_last = i == tokens.len() - 1;
        append_token(result, token, prefix, is_last, options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::tokenize;

    #[test]
    fn test_flat_post() {
        let post = tokenize(">>12 nice [b]really[/b]");
        let output = to_treeviz_str(&post, &TreevizOptions::default());
        assert_eq!(
            output,
            "├─ post_link: >>12\n├─ text: \" nice \"\n└─ bold\n  └─ text: \"really\"\nreferences: 12\n"
        );
    }

    #[test]
    fn test_spans_and_truncation() {
        let post = tokenize("abcdef\n");
        let options = TreevizOptions {
            max_label: 3,
            show_spans: true,
        };
        let output = to_treeviz_str(&post, &options);
        assert_eq!(output, "├─ text @0..6: \"abc...\"\n└─ line_break @6..7\n");
    }

    #[test]
    fn test_nested_prefixes() {
        let post = tokenize("[spoiler][i]x[/i][/spoiler]y");
        let output = to_treeviz_str(&post, &TreevizOptions::default());
        assert_eq!(
            output,
            "├─ spoiler\n│ └─ italic\n│   └─ text: \"x\"\n└─ text: \"y\"\n"
        );
    }

    #[test]
    fn test_empty_post() {
        let post = tokenize("");
        assert_eq!(to_treeviz_str(&post, &TreevizOptions::default()), "");
    }
}
