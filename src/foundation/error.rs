/// Convenience result type used across the crate.
pub type BoardResult<T> = Result<T, BoardError>;

/// Crate error type.
///
/// Editing operations are total and never produce one of these; only export, encoding, and
/// save paths do.
#[derive(thiserror::Error, Debug)]
pub enum BoardError {
    /// Invalid input (bad fps, zero-sized surface, out-of-order frame, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure while capturing or encoding exported frames.
    #[error("export error: {0}")]
    Export(String),

    /// Failure reported by the storage collaborator.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Payload could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped error from an underlying library.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoardError {
    /// Build a [`BoardError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BoardError::Export`].
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`BoardError::Persistence`].
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Build a [`BoardError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether retrying the same operation may succeed.
    ///
    /// Export and persistence failures are transient from the editor's point of view.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Export(_) | Self::Persistence(_) | Self::Other(_))
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
