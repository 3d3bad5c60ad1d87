//! Output format implementations for tokenized posts
//!
//! These are debugging and interchange serializations of the token tree, not renderers:
//! - treeviz: one line per token, for eyeballing and snapshot tests
//! - json: the full tree and reference list
//!
//! [OutputFormat] picks one of them from the configuration.

pub mod json;
pub mod output;
pub mod treeviz;

pub use json::to_json_str;
pub use output::{FormatError, OutputFormat};
pub use treeviz::{to_treeviz_str, TreevizOptions};
