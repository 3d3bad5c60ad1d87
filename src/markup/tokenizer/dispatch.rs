//! Dispatch index
//!
//!     Maps the character at the scan position to the rules and patterns that can start with
//!     it, so each position only tests a handful of candidates. Built once from the static
//!     tables on first use. Candidate order follows table order.

use super::patterns::{Pattern, PATTERNS};
use super::rules::{BracketRule, BRACKET_RULES};
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub static DISPATCH: Lazy<DispatchIndex> =
    Lazy::new(|| DispatchIndex::build(&BRACKET_RULES, &PATTERNS));

#[derive(Debug, Default)]
pub struct DispatchIndex {
    rules: HashMap<char, Vec<&'static BracketRule>>,
    patterns: HashMap<char, Vec<&'static Pattern>>,
}

impl DispatchIndex {
    pub fn build(rules: &'static [BracketRule], patterns: &'static [Pattern]) -> Self {
        let mut index = Self::default();
        for rule in rules {
            index.rules.entry(rule.first).or_default().push(rule);
        }
        for pattern in patterns {
            index.patterns.entry(pattern.first).or_default().push(pattern);
        }
        index
    }

    pub fn rules_for(&self, first: char) -> &[&'static BracketRule] {
        self.rules.get(&first).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn patterns_for(&self, first: char) -> &[&'static Pattern] {
        self.patterns.get(&first).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::super::patterns::PatternKind;
    use super::super::rules::ContainerKind;
    use super::*;

    #[test]
    fn test_bracket_rules_keep_table_order() {
        let kinds: Vec<_> = DISPATCH.rules_for('[').iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ContainerKind::Bold,
                ContainerKind::Italic,
                ContainerKind::StrikeThrough,
                ContainerKind::Spoiler
            ]
        );
    }

    #[test]
    fn test_gt_dispatches_to_links_and_quote() {
        let patterns: Vec<_> = DISPATCH.patterns_for('>').iter().map(|p| p.kind).collect();
        assert_eq!(patterns, vec![PatternKind::PostLink, PatternKind::ThreadLink]);

        let rules: Vec<_> = DISPATCH.rules_for('>').iter().map(|r| r.kind).collect();
        assert_eq!(rules, vec![ContainerKind::Quote]);
    }

    #[test]
    fn test_plain_characters_have_no_candidates() {
        assert!(DISPATCH.rules_for('a').is_empty());
        assert!(DISPATCH.patterns_for('a').is_empty());
        assert!(DISPATCH.patterns_for(']').is_empty());
    }

    #[test]
    fn test_newline_only_dispatches_line_break() {
        let patterns: Vec<_> = DISPATCH.patterns_for('\n').iter().map(|p| p.kind).collect();
        assert_eq!(patterns, vec![PatternKind::LineBreak]);
        assert!(DISPATCH.rules_for('\n').is_empty());
    }
}
