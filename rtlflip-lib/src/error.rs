//! Error types for the reference host, config loading and the CLI pipeline.
//!
//! The flip hook itself never produces one of these: it only forwards whatever
//! its mirror returns.

use thiserror::Error;

/// Result type for rtlflip operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside the flip hook.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading an input or config file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The style object is not valid JSON.
    #[error("invalid JSON style object: {0}")]
    Json(#[from] serde_json::Error),

    /// The plugin config file is not valid TOML or has wrong field types.
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// The JSON is well formed but does not describe a style sheet.
    #[error("invalid style at `{at}`: {reason}")]
    InvalidStyle { at: String, reason: String },

    /// lightningcss rejected the compiled CSS.
    #[error("CSS error: {0}")]
    Css(String),
}

impl Error {
    pub(crate) fn invalid_style(at: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidStyle {
            at: at.into(),
            reason: reason.into(),
        }
    }
}
