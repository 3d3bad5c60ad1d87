//! JSON output
//!
//! Serializes the whole [PostText] (token tree and references) with serde_json. Each token is
//! an object with `span`, `content` and a `value` holding `kind` and `payload`.

use crate::markup::token::PostText;

pub fn to_json_str(post: &PostText<'_>, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(post)
    } else {
        serde_json::to_string(post)
    }
}
