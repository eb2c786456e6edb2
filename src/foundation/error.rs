/// Convenience result alias used across the crate.
pub type ReelResult<T> = Result<T, ReelError>;

/// Crate-wide error type.
///
/// Runtime paths (scrolling, mapping, rendering) never produce errors; frame failures are
/// absorbed by the loader. This type surfaces from construction, validation and I/O.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame asset could not be read or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Loader setup or coordination failure.
    #[error("loader error: {0}")]
    Loader(String),

    /// Config or report (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ReelError::Loader`].
    pub fn loader(msg: impl Into<String>) -> Self {
        Self::Loader(msg.into())
    }

    /// Build a [`ReelError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
