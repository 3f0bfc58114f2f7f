/// Errors that can occur within the storage layer.
///
/// # Examples
///
/// ```rust
/// use vitalwatch_storage::error::StorageError;
///
/// let err = StorageError::UnknownRole("superuser".to_string());
/// assert!(err.to_string().contains("superuser"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A referenced role does not exist.
    #[error("Storage: unknown role '{0}'")]
    UnknownRole(String),

    /// An underlying SQLite error.
    #[error("Storage: SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Creating the database directory failed.
    #[error("Storage: I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic storage error for cases not covered by other variants, and for
    /// non-SQLite backends reporting their own failures.
    #[error("Storage: {0}")]
    Other(String),
}

/// Convenience `Result` alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
