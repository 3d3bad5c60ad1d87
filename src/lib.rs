//! # boardmark
//!
//! A tokenizer for imageboard post markup.
//!
//! Post bodies are written in a small bracket and line based dialect: `[b]`, `[i]`, `[s]`,
//! `[spoiler]`, `[code]`, quoted lines starting with `>`, post links (`>>42`) and
//! cross-board thread links (`>>>/board/42`). The [markup] module turns such a body into a
//! tree of typed tokens and collects the post ids it links to, so a rendering layer can walk
//! the tree and a thread view can build its reply index.
//!
//! File Layout
//!
//!     src/markup
//!       ├── token        The token tree handed to renderers
//!       ├── tokenizer    Rule tables, dispatch index and the scanning engine
//!       ├── replies      Reply index built from the reference lists of a thread
//!       └── formats      Debug serializations (treeviz, json)
//!     src/config         Layered configuration for the command line tool

pub mod config;
pub mod markup;
