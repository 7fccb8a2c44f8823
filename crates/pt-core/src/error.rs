//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert into `PtError`
//! or wrap it as one variant, whichever keeps error sites clean.

use thiserror::Error;

/// The top-level error type for `pt-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum PtError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `pt-*` crates.
pub type PtResult<T> = Result<T, PtError>;
