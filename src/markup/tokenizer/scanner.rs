//! Scanning engine
//!
//!     The scanner walks a window of the input one position at a time and yields one top-level
//!     token per call to `next`. It holds three pieces of state:
//!
//!         - the current position
//!         - the open bracket construct, if any (rule, nesting depth, where its body starts)
//!         - the start of the pending text run, if any
//!
//!     At each position the candidates are tried in a fixed order:
//!
//!         1. Inside a construct, only its own close marker, then its own open marker (same
//!            type nesting bumps the depth). Anything else is body text and is skipped.
//!         2. Outside a construct, the single-shot patterns for the current character. A
//!            pending text run is yielded first; the pattern is matched again on the next call.
//!         3. The bracket rules for the current character. Opening never yields a token, but a
//!            pending text run is yielded before the construct opens.
//!         4. Otherwise the character is plain text.
//!
//!     When the depth of the open construct drops to zero the container is yielded. Its body
//!     is tokenized by a child scanner over the same input bounded to the body, sharing the
//!     reference collector. At the end of the window an open construct is closed implicitly
//!     and a pending text run is yielded, so malformed markup still produces a complete tree.

use super::dispatch::DISPATCH;
use super::patterns::{PatternMatch, Window};
use super::references::ReferenceCollector;
use super::rules::BracketRule;
use crate::markup::token::{Token, TokenValue};
use std::borrow::Cow;
use std::iter::FusedIterator;
use std::ops::Range;

#[derive(Debug, Clone, Copy)]
struct OpenConstruct {
    rule: &'static BracketRule,
    depth: usize,
    marker_start: usize,
    body_start: usize,
}

/// Lazy tokenizer over a post body. See the [module docs](self) for the algorithm.
#[derive(Debug)]
pub struct Scanner<'a, 'r> {
    window: Window<'a>,
    pos: usize,
    open: Option<OpenConstruct>,
    text_start: Option<usize>,
    references: &'r mut ReferenceCollector,
}

impl<'a, 'r> Scanner<'a, 'r> {
    pub fn new(input: &'a str, references: &'r mut ReferenceCollector) -> Self {
        Self::bounded(input, 0..input.len(), references)
    }

    /// Scan only `range` of `source`. Token positions stay absolute in `source`.
    fn bounded(
        source: &'a str,
        range: Range<usize>,
        references: &'r mut ReferenceCollector,
    ) -> Self {
        Self {
            window: Window::new(source, range.end),
            pos: range.start,
            open: None,
            text_start: None,
            references,
        }
    }

    /// Current byte position of the scan.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// References collected so far by this scan and every scan sharing its collector.
    pub fn references(&self) -> &ReferenceCollector {
        &*self.references
    }

    fn flush_text(&mut self) -> Option<Token<'a>> {
        let start = self.text_start.take()?;
        let text = &self.window.source()[start..self.pos];
        Some(Token::new(
            start..self.pos,
            start..self.pos,
            TokenValue::Text(Cow::Borrowed(text)),
        ))
    }

    fn consume(&mut self, found: PatternMatch<'a>) -> Token<'a> {
        let start = self.pos;
        self.pos += found.len;
        if let TokenValue::PostLink(id) = found.value {
            self.references.push(id);
        }
        Token::new(start..self.pos, found.content, found.value)
    }

    fn close(&mut self, open: OpenConstruct, body_end: usize) -> Token<'a> {
        let body = open.body_start..body_end;
        let children: Vec<Token<'a>> =
            Scanner::bounded(self.window.source(), body.clone(), self.references).collect();
        Token::new(
            open.marker_start..self.pos,
            body,
            open.rule.kind.wrap(children),
        )
    }

    fn finish(&mut self) -> Option<Token<'a>> {
        if let Some(open) = self.open.take() {
            log::trace!(
                "closing unterminated {} opened at {} at end of input",
                open.rule.kind,
                open.marker_start
            );
            let end = self.pos;
            return Some(self.close(open, end));
        }
        self.flush_text()
    }
}

impl<'a> Iterator for Scanner<'a, '_> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        while self.pos < self.window.end() {
            let rest = self.window.rest(self.pos);
            let Some(first) = rest.chars().next() else {
                break;
            };
            let mut advance = first.len_utf8();

            match self.open.as_mut() {
                Some(open) => {
                    if open.rule.closes_at(rest) {
                        open.depth -= 1;
                        advance = open.rule.close_len();
                    } else if open.rule.opens_at(rest) {
                        open.depth += 1;
                        advance = open.rule.open_len();
                    }
                }
                None => {
                    for pattern in DISPATCH.patterns_for(first) {
                        let Some(found) = pattern.match_at(&mut self.window, self.pos) else {
                            continue;
                        };
                        if self.text_start.is_some() {
                            return self.flush_text();
                        }
                        return Some(self.consume(found));
                    }

                    let opened = DISPATCH
                        .rules_for(first)
                        .iter()
                        .find(|rule| rule.opens_at(rest));
                    match opened {
                        Some(_) if self.text_start.is_some() => return self.flush_text(),
                        Some(&rule) => {
                            self.open = Some(OpenConstruct {
                                rule,
                                depth: 1,
                                marker_start: self.pos,
                                body_start: self.pos + rule.open_len(),
                            });
                            advance = rule.open_len();
                        }
                        None => {
                            if self.text_start.is_none() {
                                self.text_start = Some(self.pos);
                            }
                        }
                    }
                }
            }

            self.pos += advance;

            if let Some(open) = self.open {
                if open.depth == 0 {
                    self.open = None;
                    let body_end = self.pos - open.rule.close_len();
                    return Some(self.close(open, body_end));
                }
            }
        }

        self.finish()
    }
}

impl FusedIterator for Scanner<'_, '_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::token::TokenKind;

    fn scan_all(input: &str) -> (Vec<Token<'_>>, ReferenceCollector) {
        let mut references = ReferenceCollector::new();
        let tokens = Scanner::new(input, &mut references).collect();
        (tokens, references)
    }

    fn kinds(tokens: &[Token<'_>]) -> Vec<TokenKind> {
        tokens.iter().map(Token::kind).collect()
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let (tokens, references) = scan_all("");
        assert!(tokens.is_empty());
        assert!(references.is_empty());
    }

    #[test]
    fn test_text_is_flushed_before_pattern() {
        let (tokens, _) = scan_all("ab>>1");
        assert_eq!(kinds(&tokens), vec![TokenKind::Text, TokenKind::PostLink]);
        assert_eq!(tokens[0].span, 0..2);
        assert_eq!(tokens[1].span, 2..5);
    }

    #[test]
    fn test_text_is_flushed_before_open_marker() {
        let (tokens, _) = scan_all("ab[b]c[/b]d");
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Text, TokenKind::Bold, TokenKind::Text]
        );
        assert_eq!(tokens[1].span, 2..10);
        assert_eq!(tokens[1].content, 5..6);
        assert_eq!(tokens[2].span, 10..11);
    }

    #[test]
    fn test_nested_positions_are_absolute() {
        let (tokens, _) = scan_all("xx[i]a>>5[/i]");
        let italic = &tokens[1];
        assert_eq!(italic.kind(), TokenKind::Italic);
        let children = italic.children();
        assert_eq!(children[0].span, 5..6);
        assert_eq!(children[1].span, 6..9);
        assert_eq!(children[1].content, 8..9);
    }

    #[test]
    fn test_same_type_nesting_counts_depth() {
        let (tokens, _) = scan_all("[spoiler]a[spoiler]b[/spoiler]c[/spoiler]");
        assert_eq!(tokens.len(), 1);
        let outer = tokens[0].children();
        assert_eq!(kinds(outer), vec![TokenKind::Text, TokenKind::Spoiler, TokenKind::Text]);
        assert_eq!(outer[1].children()[0].as_text(), Some("b"));
    }

    #[test]
    fn test_other_rules_are_text_inside_open_construct() {
        // The outer scan does not stack italic on top of bold, so the first [/b] closes bold.
        let (tokens, _) = scan_all("[b]x[i]y[/b]z[/i]");
        assert_eq!(kinds(&tokens), vec![TokenKind::Bold, TokenKind::Text]);
        assert_eq!(tokens[0].content, 3..8);
        // The body scan sees an unterminated italic and closes it at the body end.
        let body = tokens[0].children();
        assert_eq!(kinds(body), vec![TokenKind::Text, TokenKind::Italic]);
        assert_eq!(body[1].children()[0].as_text(), Some("y"));
        assert_eq!(tokens[1].as_text(), Some("z[/i]"));
    }

    #[test]
    fn test_unterminated_construct_closes_at_end() {
        let (tokens, _) = scan_all("[s]open");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), TokenKind::StrikeThrough);
        assert_eq!(tokens[0].span, 0..7);
        assert_eq!(tokens[0].content, 3..7);
    }

    #[test]
    fn test_stray_close_marker_is_text() {
        let (tokens, _) = scan_all("a[/b]b");
        assert_eq!(kinds(&tokens), vec![TokenKind::Text]);
        assert_eq!(tokens[0].as_text(), Some("a[/b]b"));
    }

    #[test]
    fn test_empty_body() {
        let (tokens, _) = scan_all("[b][/b]");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), TokenKind::Bold);
        assert!(tokens[0].children().is_empty());
    }

    #[test]
    fn test_quote_consumes_its_newline() {
        let (tokens, _) = scan_all(">a\nb");
        assert_eq!(kinds(&tokens), vec![TokenKind::Quote, TokenKind::Text]);
        assert_eq!(tokens[0].span, 0..3);
        assert_eq!(tokens[0].content, 1..2);
    }

    #[test]
    fn test_multibyte_text() {
        let (tokens, _) = scan_all("héllo [b]wörld[/b]");
        assert_eq!(kinds(&tokens), vec![TokenKind::Text, TokenKind::Bold]);
        assert_eq!(tokens[0].as_text(), Some("héllo "));
        assert_eq!(tokens[1].children()[0].as_text(), Some("wörld"));
    }

    #[test]
    fn test_is_lazy() {
        let mut references = ReferenceCollector::new();
        let mut scanner = Scanner::new(">>1 then >>2", &mut references);
        let first = scanner.next().unwrap();
        assert_eq!(first.post_id(), Some(1));
        assert_eq!(scanner.position(), 3);
        assert_eq!(scanner.references().raw(), &[1]);
    }

    #[test]
    fn test_is_fused() {
        let mut references = ReferenceCollector::new();
        let mut scanner = Scanner::new("[b]x", &mut references);
        assert!(scanner.next().is_some());
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }
}
