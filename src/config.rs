//! Configuration for the boardmark tools.
//!
//! Settings are resolved from three layers, later layers winning:
//!
//!     1. `defaults/boardmark.default.toml`, embedded at compile time
//!     2. a TOML file named on the command line (`--config`)
//!     3. command-line flags, passed as [Overrides]
//!
//! The merged tree is deserialized into [BoardmarkConfig]. An unknown `output.format` is
//! rejected while deserializing, so a loaded config always names a format that exists.

use crate::markup::formats::OutputFormat;
use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/boardmark.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct BoardmarkConfig {
    pub output: OutputConfig,
    pub treeviz: TreevizConfig,
    pub json: JsonConfig,
}

/// What `tokenize` prints and how much of it.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Maximum number of top-level tokens to produce; 0 disables the limit.
    pub max_tokens: usize,
}

impl OutputConfig {
    pub fn token_limit(&self) -> Option<usize> {
        (self.max_tokens > 0).then_some(self.max_tokens)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreevizConfig {
    pub max_label: usize,
    pub show_spans: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonConfig {
    pub pretty: bool,
}

/// Settings given as command-line flags. `None` leaves the file value in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub format: Option<OutputFormat>,
    pub max_tokens: Option<u64>,
}

impl BoardmarkConfig {
    /// Merge the embedded defaults, `file` (which must exist when given) and `overrides`.
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));

        if let Some(path) = file {
            log::debug!("layering config file {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        builder
            .set_override_option("output.format", overrides.format.map(OutputFormat::name))?
            .set_override_option("output.max_tokens", overrides.max_tokens)?
            .build()?
            .try_deserialize()
    }

    /// The embedded defaults alone.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::load(None, &Overrides::default())
    }
}
