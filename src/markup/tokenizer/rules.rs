//! Bracket rules
//!
//!     A bracket rule is a construct with a distinct open and close marker and a body that is
//!     tokenized recursively. Markers are fixed literals and are matched anchored at the scan
//!     position, never searched for.
//!
//!         Bold            [b]         [/b]
//!         Italic          [i]         [/i]
//!         StrikeThrough   [s]         [/s]
//!         Spoiler         [spoiler]   [/spoiler]
//!         Quote           >           end of line
//!
//!     Order matters: rules sharing a first character are tried in table order.

use crate::markup::token::{Token, TokenKind, TokenValue};
use std::fmt;

/// The container a bracket rule produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Bold,
    Italic,
    StrikeThrough,
    Spoiler,
    Quote,
}

impl ContainerKind {
    pub fn token_kind(self) -> TokenKind {
        match self {
            ContainerKind::Bold => TokenKind::Bold,
            ContainerKind::Italic => TokenKind::Italic,
            ContainerKind::StrikeThrough => TokenKind::StrikeThrough,
            ContainerKind::Spoiler => TokenKind::Spoiler,
            ContainerKind::Quote => TokenKind::Quote,
        }
    }

    /// Wrap a tokenized body into the payload of this container.
    pub fn wrap(self, children: Vec<Token<'_>>) -> TokenValue<'_> {
        match self {
            ContainerKind::Bold => TokenValue::Bold(children),
            ContainerKind::Italic => TokenValue::Italic(children),
            ContainerKind::StrikeThrough => TokenValue::StrikeThrough(children),
            ContainerKind::Spoiler => TokenValue::Spoiler(children),
            ContainerKind::Quote => TokenValue::Quote(children),
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token_kind())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct BracketRule {
    pub kind: ContainerKind,
    /// First character of `open`, used as the dispatch key.
    pub first: char,
    pub open: &'static str,
    pub close: &'static str,
}

impl BracketRule {
    /// Whether the open marker starts exactly at the beginning of `rest`.
    pub fn opens_at(&self, rest: &str) -> bool {
        rest.starts_with(self.open)
    }

    /// Whether the close marker starts exactly at the beginning of `rest`.
    pub fn closes_at(&self, rest: &str) -> bool {
        rest.starts_with(self.close)
    }

    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    pub fn close_len(&self) -> usize {
        self.close.len()
    }
}

pub static BRACKET_RULES: [BracketRule; 5] = [
    BracketRule {
        kind: ContainerKind::Bold,
        first: '[',
        open: "[b]",
        close: "[/b]",
    },
    BracketRule {
        kind: ContainerKind::Italic,
        first: '[',
        open: "[i]",
        close: "[/i]",
    },
    BracketRule {
        kind: ContainerKind::StrikeThrough,
        first: '[',
        open: "[s]",
        close: "[/s]",
    },
    BracketRule {
        kind: ContainerKind::Spoiler,
        first: '[',
        open: "[spoiler]",
        close: "[/spoiler]",
    },
    BracketRule {
        kind: ContainerKind::Quote,
        first: '>',
        open: ">",
        close: "\n",
    },
];
