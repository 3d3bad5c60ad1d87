//! Token tree types
//!
//!     This module defines the result of tokenizing a post body. A post body becomes a flat
//!     sequence of top-level [Token]s; container tokens (bold, italic, strike-through, spoiler,
//!     quote) carry the tokenization of their body as children, so the whole result is a tree.
//!
//! Token Types
//!
//!     Leaves:
//!         - Text: a maximal run of plain characters
//!         - Code: `[code]...[/code]`, payload is the raw interior (never tokenized)
//!         - LineBreak: `\n` outside of a quote
//!         - PostLink: `>>42`, payload is the post id
//!         - ThreadLink: `>>>/board/42`, payload is the board and thread id
//!
//!     Containers:
//!         - Bold: `[b]...[/b]`
//!         - Italic: `[i]...[/i]`
//!         - StrikeThrough: `[s]...[/s]`
//!         - Spoiler: `[spoiler]...[/spoiler]`
//!         - Quote: `>` up to the end of the line
//!
//! Positions
//!
//!     Every token records two byte ranges into the original input. `span` covers everything
//!     the token consumed, markers included, so the spans of sibling tokens tile their parent
//!     exactly. `content` is the part a renderer cares about: the body of a container, the
//!     interior of a code block, the digits of a post link. Nested tokens use absolute
//!     positions in the top-level input.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

/// The kind of a token, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Text,
    Bold,
    Italic,
    StrikeThrough,
    Code,
    Spoiler,
    Quote,
    LineBreak,
    PostLink,
    ThreadLink,
}

impl TokenKind {
    /// Returns `true` for kinds whose payload is a nested token sequence.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            TokenKind::Bold
                | TokenKind::Italic
                | TokenKind::StrikeThrough
                | TokenKind::Spoiler
                | TokenKind::Quote
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Text => write!(f, "text"),
            TokenKind::Bold => write!(f, "bold"),
            TokenKind::Italic => write!(f, "italic"),
            TokenKind::StrikeThrough => write!(f, "strike_through"),
            TokenKind::Code => write!(f, "code"),
            TokenKind::Spoiler => write!(f, "spoiler"),
            TokenKind::Quote => write!(f, "quote"),
            TokenKind::LineBreak => write!(f, "line_break"),
            TokenKind::PostLink => write!(f, "post_link"),
            TokenKind::ThreadLink => write!(f, "thread_link"),
        }
    }
}

/// Target of a cross-board thread link (`>>>/board/42`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ThreadRef<'a> {
    pub board: Cow<'a, str>,
    pub thread: u64,
}

impl ThreadRef<'_> {
    pub fn into_owned(self) -> ThreadRef<'static> {
        ThreadRef {
            board: Cow::Owned(self.board.into_owned()),
            thread: self.thread,
        }
    }
}

impl fmt::Display for ThreadRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ">>>/{}/{}", self.board, self.thread)
    }
}

/// Token payload. The variant determines the token kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum TokenValue<'a> {
    Text(Cow<'a, str>),
    Bold(Vec<Token<'a>>),
    Italic(Vec<Token<'a>>),
    StrikeThrough(Vec<Token<'a>>),
    Code(Cow<'a, str>),
    Spoiler(Vec<Token<'a>>),
    Quote(Vec<Token<'a>>),
    LineBreak,
    PostLink(u64),
    ThreadLink(ThreadRef<'a>),
}

impl<'a> TokenValue<'a> {
    pub fn kind(&self) -> TokenKind {
        match self {
            TokenValue::Text(_) => TokenKind::Text,
            TokenValue::Bold(_) => TokenKind::Bold,
            TokenValue::Italic(_) => TokenKind::Italic,
            TokenValue::StrikeThrough(_) => TokenKind::StrikeThrough,
            TokenValue::Code(_) => TokenKind::Code,
            TokenValue::Spoiler(_) => TokenKind::Spoiler,
            TokenValue::Quote(_) => TokenKind::Quote,
            TokenValue::LineBreak => TokenKind::LineBreak,
            TokenValue::PostLink(_) => TokenKind::PostLink,
            TokenValue::ThreadLink(_) => TokenKind::ThreadLink,
        }
    }

    /// Returns the children of a container payload.
    pub fn children(&self) -> Option<&[Token<'a>]> {
        match self {
            TokenValue::Bold(children)
            | TokenValue::Italic(children)
            | TokenValue::StrikeThrough(children)
            | TokenValue::Spoiler(children)
            | TokenValue::Quote(children) => Some(children),
            _ => None,
        }
    }

    pub fn into_owned(self) -> TokenValue<'static> {
        fn owned(children: Vec<Token<'_>>) -> Vec<Token<'static>> {
            children.into_iter().map(Token::into_owned).collect()
        }

        match self {
            TokenValue::Text(text) => TokenValue::Text(Cow::Owned(text.into_owned())),
            TokenValue::Bold(children) => TokenValue::Bold(owned(children)),
            TokenValue::Italic(children) => TokenValue::Italic(owned(children)),
            TokenValue::StrikeThrough(children) => TokenValue::StrikeThrough(owned(children)),
            TokenValue::Code(code) => TokenValue::Code(Cow::Owned(code.into_owned())),
            TokenValue::Spoiler(children) => TokenValue::Spoiler(owned(children)),
            TokenValue::Quote(children) => TokenValue::Quote(owned(children)),
            TokenValue::LineBreak => TokenValue::LineBreak,
            TokenValue::PostLink(id) => TokenValue::PostLink(id),
            TokenValue::ThreadLink(target) => TokenValue::ThreadLink(target.into_owned()),
        }
    }
}

/// A single token of a post body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    /// Everything this token consumed, markers included.
    pub span: Range<usize>,
    /// The interior of the token (container body, code interior, link target).
    pub content: Range<usize>,
    pub value: TokenValue<'a>,
}

impl<'a> Token<'a> {
    pub fn new(span: Range<usize>, content: Range<usize>, value: TokenValue<'a>) -> Self {
        Self {
            span,
            content,
            value,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.value.kind()
    }

    /// Byte offset of the first character this token consumed.
    pub fn offset(&self) -> usize {
        self.span.start
    }

    /// Children of a container token; empty for leaves.
    pub fn children(&self) -> &[Token<'a>] {
        self.value.children().unwrap_or(&[])
    }

    /// Literal payload of `Text` and `Code` tokens.
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(text) | TokenValue::Code(text) => Some(&**text),
            _ => None,
        }
    }

    pub fn post_id(&self) -> Option<u64> {
        match self.value {
            TokenValue::PostLink(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.value, TokenValue::Text(_))
    }

    /// The slice of `input` this token consumed, or `None` if `input` is not the text the
    /// token was produced from.
    pub fn source<'s>(&self, input: &'s str) -> Option<&'s str> {
        input.get(self.span.clone())
    }

    pub fn into_owned(self) -> Token<'static> {
        Token {
            span: self.span,
            content: self.content,
            value: self.value.into_owned(),
        }
    }
}

/// Depth-first, pre-order traversal over a token sequence and all nested children.
pub struct Walk<'t, 'a> {
    stack: Vec<std::slice::Iter<'t, Token<'a>>>,
}

impl<'t, 'a> Walk<'t, 'a> {
    pub fn new(tokens: &'t [Token<'a>]) -> Self {
        Self {
            stack: vec![tokens.iter()],
        }
    }
}

impl<'t, 'a> Iterator for Walk<'t, 'a> {
    type Item = &'t Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                Some(token) => {
                    let children = token.children();
                    if !children.is_empty() {
                        self.stack.push(children.iter());
                    }
                    return Some(token);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Result of tokenizing one post body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostText<'a> {
    pub tokens: Vec<Token<'a>>,
    /// Deduplicated ids of every post linked from the body, in first-seen order.
    pub references: Vec<u64>,
}

impl<'a> PostText<'a> {
    pub fn walk(&self) -> Walk<'_, 'a> {
        Walk::new(&self.tokens)
    }

    /// Ids of every `PostLink` token at any depth, duplicates included.
    pub fn post_links(&self) -> impl Iterator<Item = u64> + '_ {
        self.walk().filter_map(Token::post_id)
    }

    pub fn into_owned(self) -> PostText<'static> {
        PostText {
            tokens: self.tokens.into_iter().map(Token::into_owned).collect(),
            references: self.references,
        }
    }
}
