//! Output format selection
//!
//!     The set of formats is closed. `output.format` in the configuration (or `--format` on
//!     the command line) names one of them:
//!
//!         treeviz     one line per token, nesting drawn as a tree
//!         json        the token tree and reference list as JSON

use super::json::to_json_str;
use super::treeviz::{to_treeviz_str, TreevizOptions};
use crate::config::BoardmarkConfig;
use crate::markup::token::PostText;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Treeviz,
    Json,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Treeviz, OutputFormat::Json];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Treeviz => "treeviz",
            OutputFormat::Json => "json",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            OutputFormat::Treeviz => "One line per token, nesting shown as a tree",
            OutputFormat::Json => "Token tree and references as JSON",
        }
    }

    /// Render `post`, taking this format's settings from `config`.
    pub fn render(
        self,
        post: &PostText<'_>,
        config: &BoardmarkConfig,
    ) -> Result<String, FormatError> {
        match self {
            OutputFormat::Treeviz => {
                Ok(to_treeviz_str(post, &TreevizOptions::from(&config.treeviz)))
            }
            OutputFormat::Json => to_json_str(post, config.json.pretty).map_err(FormatError::Json),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| FormatError::UnknownFormat(s.to_string()))
    }
}

#[derive(Debug)]
pub enum FormatError {
    UnknownFormat(String),
    Json(serde_json::Error),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownFormat(name) => {
                let known: Vec<&str> = OutputFormat::ALL
                    .iter()
                    .map(|format| format.name())
                    .collect();
                write!(
                    f,
                    "unknown output format '{name}' (expected one of: {})",
                    known.join(", ")
                )
            }
            FormatError::Json(err) => write!(f, "JSON serialization failed: {err}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Json(err) => Some(err),
            FormatError::UnknownFormat(_) => None,
        }
    }
}
