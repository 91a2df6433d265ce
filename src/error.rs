//! Error type for the fallible edges of the crate.
//!
//! State transitions never fail: a bad index is a no-op, a missing platform
//! capability degrades to "visible". Only loading config/content and
//! computing layout can return an error.

use std::path::PathBuf;

/// Errors surfaced by loading and layout.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("layout failed: {0}")]
    Layout(#[from] taffy::TaffyError),

    #[error("viewport must have a positive size, got {width}x{height}")]
    EmptyViewport { width: f32, height: f32 },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Read a file, tagging the error with its path.
pub(crate) fn read_to_string(path: impl Into<PathBuf>) -> Result<String> {
    let path = path.into();
    std::fs::read_to_string(&path).map_err(|source| Error::Io { path, source })
}
