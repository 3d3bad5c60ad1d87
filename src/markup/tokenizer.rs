//! Post body tokenizer
//!
//!     The tokenizer is table driven. Constructs come in two shapes:
//!
//!         - [rules]: bracket constructs with an open and a close marker and a body that is
//!           tokenized recursively (bold, italic, strike-through, spoiler, quote).
//!         - [patterns]: single-shot constructs consumed by one anchored match (code, line
//!           break, post link, thread link).
//!
//!     Both tables are indexed by first character in [dispatch]. The [scanner] walks the input
//!     once, consulting only the candidates for the character at hand, and the [references]
//!     collector records every post link it meets at any depth.
//!
//!     Tokenization cannot fail: unterminated constructs close at the end of the input and
//!     stray markers are plain text.

pub mod dispatch;
pub mod patterns;
pub mod references;
pub mod rules;
pub mod scanner;

pub use references::ReferenceCollector;
pub use scanner::Scanner;

use crate::markup::token::PostText;

/// Lazily tokenize `input`, registering post links with `references` as they are met.
///
/// Only the tokens actually pulled from the scanner are computed, so
/// `scan(text, &mut refs).take(3)` tokenizes (and collects references from) the first
/// three top-level tokens only.
pub fn scan<'a, 'r>(input: &'a str, references: &'r mut ReferenceCollector) -> Scanner<'a, 'r> {
    Scanner::new(input, references)
}

/// Tokenize a whole post body.
pub fn tokenize(input: &str) -> PostText<'_> {
    let mut references = ReferenceCollector::new();
    let tokens: Vec<_> = scan(input, &mut references).collect();
    let references = references.into_references();

    log::debug!(
        "tokenized {} bytes into {} top-level tokens, {} references",
        input.len(),
        tokens.len(),
        references.len()
    );

    PostText { tokens, references }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::token::TokenKind;

    #[test]
    fn test_tokenize_collects_nested_references() {
        let post = tokenize("[spoiler]>>3[/spoiler] >>1 [b]>>3[/b]");
        assert_eq!(post.references, vec![3, 1]);
        assert_eq!(post.post_links().collect::<Vec<_>>(), vec![3, 1, 3]);
    }

    #[test]
    fn test_scan_take_stops_early() {
        let mut references = ReferenceCollector::new();
        let first: Vec<_> = scan(">>1 [b]>>2[/b]", &mut references).take(2).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(first[1].kind(), TokenKind::Text);
        assert_eq!(references.raw(), &[1]);
    }
}
