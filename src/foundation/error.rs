use std::path::PathBuf;

/// Convenience result type used across patchmerge.
pub type PatchResult<T> = Result<T, PatchError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum PatchError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image could not be decoded or has unusable dimensions.
    #[error("decode error: {0}")]
    Decode(String),

    /// Overlay selection produced nothing to composite.
    #[error("no usable overlays found in '{}'", .dir.display())]
    NoOverlays {
        /// Overlay root directory that was scanned.
        dir: PathBuf,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PatchError {
    /// Build a [`PatchError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PatchError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
