use thiserror::Error;

/// Failure reported by a page loader.
///
/// The controller only keeps a boolean `error` flag; the variant is logged
/// at completion so the cause is not lost entirely.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server error {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Failed to decode page: {0}")]
    Decode(String),
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Decode(err.to_string())
    }
}

/// Failure while reading or writing a persisted grid snapshot.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Snapshot store unavailable: {0}")]
    Unavailable(String),
    #[error("Snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Snapshot store error: {0}")]
    Backend(String),
}

/// Invalid [`GridOptions`](crate::GridOptions).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Rows per page must be greater than zero")]
    ZeroRowsPerPage,
    #[error("At least one rows-per-page option is required")]
    EmptyRowsPerPageOptions,
    #[error("Persisted grids need a non-empty unique id")]
    EmptyPersistId,
}
