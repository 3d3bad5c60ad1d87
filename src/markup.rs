//! Post markup tokenization
//!
//! Entry points:
//!
//!     - [tokenize]: eagerly tokenize a post body, returning the token tree and the
//!       deduplicated list of referenced posts.
//!     - [scan]: lazily tokenize a post body, one top-level token per step. Useful for
//!       previews that stop after a handful of tokens.
//!
//! The token tree is described in [token], the scanner in [tokenizer]. Renderers dispatch on
//! [TokenKind] (or match on [TokenValue] directly) and recurse into container children.

pub mod formats;
pub mod replies;
pub mod token;
pub mod tokenizer;

pub use replies::ReplyIndex;
pub use token::{PostText, ThreadRef, Token, TokenKind, TokenValue, Walk};
pub use tokenizer::{scan, tokenize, ReferenceCollector, Scanner};
