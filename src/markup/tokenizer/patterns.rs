//! Single-shot patterns
//!
//!     A single-shot pattern is recognized and consumed by one anchored match. There is no
//!     separate close phase and the matched text is never tokenized further.
//!
//!         Code        [code]...[/code]    optional trailing newline consumed
//!         LineBreak   \n
//!         PostLink    >>42
//!         ThreadLink  >>>/board/42
//!
//!     Code is greedy: the interior runs to the last `[/code]` of the scan window, so a code
//!     block may itself contain `[/code]`. The interior is kept verbatim.
//!
//!     Post and thread ids are ASCII digits. An id too large for `u64` is not a link, for
//!     thread links as well as post links; the text then falls through to the quote rule.

use crate::markup::token::{ThreadRef, TokenValue};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::ops::Range;

const CODE_OPEN: &str = "[code]";
const CODE_CLOSE: &str = "[/code]";

static POST_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^>>([0-9]+)").unwrap());
static THREAD_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^>>>/([a-z]+)/([0-9]+)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Code,
    LineBreak,
    PostLink,
    ThreadLink,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Pattern {
    pub kind: PatternKind,
    /// The only character a match can start with, used as the dispatch key.
    pub first: char,
}

pub static PATTERNS: [Pattern; 4] = [
    Pattern {
        kind: PatternKind::Code,
        first: '[',
    },
    Pattern {
        kind: PatternKind::LineBreak,
        first: '\n',
    },
    Pattern {
        kind: PatternKind::PostLink,
        first: '>',
    },
    Pattern {
        kind: PatternKind::ThreadLink,
        first: '>',
    },
];

/// A successful anchored match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch<'a> {
    /// Bytes consumed from the match position.
    pub len: usize,
    pub content: Range<usize>,
    pub value: TokenValue<'a>,
}

/// The part of the input a scanner works on: `source[..end]`, with positions absolute in
/// `source`. Caches the position of the last code close marker so repeated `[code]` openers
/// without a close do not rescan the window.
#[derive(Debug, Clone)]
pub struct Window<'a> {
    source: &'a str,
    end: usize,
    last_code_close: Option<Option<usize>>,
}

impl<'a> Window<'a> {
    pub fn new(source: &'a str, end: usize) -> Self {
        Self {
            source,
            end,
            last_code_close: None,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Everything from `pos` to the end of the window.
    pub fn rest(&self, pos: usize) -> &'a str {
        &self.source[pos..self.end]
    }

    fn last_code_close(&mut self) -> Option<usize> {
        let haystack = &self.source[..self.end];
        *self
            .last_code_close
            .get_or_insert_with(|| haystack.rfind(CODE_CLOSE))
    }
}

impl Pattern {
    /// Try to match this pattern exactly at `pos`.
    pub fn match_at<'a>(&self, window: &mut Window<'a>, pos: usize) -> Option<PatternMatch<'a>> {
        match self.kind {
            PatternKind::Code => match_code(window, pos),
            PatternKind::LineBreak => match_line_break(window.rest(pos), pos),
            PatternKind::PostLink => match_post_link(window.rest(pos), pos),
            PatternKind::ThreadLink => match_thread_link(window.rest(pos), pos),
        }
    }
}

fn match_code<'a>(window: &mut Window<'a>, pos: usize) -> Option<PatternMatch<'a>> {
    if !window.rest(pos).starts_with(CODE_OPEN) {
        return None;
    }
    let start = pos + CODE_OPEN.len();
    let close = window.last_code_close().filter(|&close| close >= start)?;

    let mut end = close + CODE_CLOSE.len();
    if window.rest(end).starts_with('\n') {
        end += 1;
    }

    Some(PatternMatch {
        len: end - pos,
        content: start..close,
        value: TokenValue::Code(Cow::Borrowed(&window.source()[start..close])),
    })
}

fn match_line_break(rest: &str, pos: usize) -> Option<PatternMatch<'static>> {
    rest.starts_with('\n').then(|| PatternMatch {
        len: 1,
        content: pos..pos + 1,
        value: TokenValue::LineBreak,
    })
}

fn match_post_link(rest: &str, pos: usize) -> Option<PatternMatch<'static>> {
    let captures = POST_LINK.captures(rest)?;
    let whole = captures.get(0)?;
    let digits = captures.get(1)?;
    let id = digits.as_str().parse().ok()?;

    Some(PatternMatch {
        len: whole.end(),
        content: pos + digits.start()..pos + digits.end(),
        value: TokenValue::PostLink(id),
    })
}

fn match_thread_link(rest: &str, pos: usize) -> Option<PatternMatch<'_>> {
    let captures = THREAD_LINK.captures(rest)?;
    let whole = captures.get(0)?;
    let board = captures.get(1)?;
    let thread = captures.get(2)?.as_str().parse().ok()?;

    Some(PatternMatch {
        len: whole.end(),
        // Everything after the `>>>` prefix: "/board/42".
        content: pos + board.start() - 1..pos + whole.end(),
        value: TokenValue::ThreadLink(ThreadRef {
            board: Cow::Borrowed(board.as_str()),
            thread,
        }),
    })
}
