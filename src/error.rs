//! Errors surfaced by the styled rendering pipeline.
//!
//! Rendering itself is deterministic, so nothing here is retried: every
//! failure is handed straight back to the caller.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    /// The logo image could not be opened or decoded.
    #[error("failed to load logo {path:?}: {source}")]
    Resource {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A color name, option value or config file is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The requested output format is unknown or the encoder failed.
    #[error("failed to encode image: {0}")]
    Encoding(String),

    /// Writing the encoded bytes failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StyleError>;
