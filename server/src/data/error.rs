//! Unified error type for data layer

use thiserror::Error;

use crate::data::sqlite::SqliteError;

/// Error type for repository operations
///
/// Wraps backend-specific errors while preserving the backend name.
#[derive(Error, Debug)]
pub enum DataError {
    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(sqlx::Error),

    /// Migration failed
    #[error("Migration {version} ({name}) failed on {backend}: {error}")]
    MigrationFailed {
        backend: &'static str,
        version: i32,
        name: String,
        error: String,
    },

    /// Stored schema is newer than this build understands
    #[error("Schema version {found} on {backend} is newer than supported {supported}")]
    SchemaTooNew {
        backend: &'static str,
        found: i32,
        supported: i32,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Check if this is a connection-related error that might be transient
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Sqlite(e) => matches!(
                e,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            _ => false,
        }
    }

    /// Get the backend name that generated this error
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::MigrationFailed { backend, .. } => backend,
            Self::SchemaTooNew { backend, .. } => backend,
            Self::Io(_) => "unknown",
        }
    }
}

impl From<SqliteError> for DataError {
    fn from(e: SqliteError) -> Self {
        match e {
            SqliteError::Database(e) => Self::Sqlite(e),
            SqliteError::MigrationFailed {
                version,
                name,
                error,
            } => Self::MigrationFailed {
                backend: "sqlite",
                version,
                name,
                error,
            },
            SqliteError::SchemaTooNew { found, supported } => Self::SchemaTooNew {
                backend: "sqlite",
                found,
                supported,
            },
            SqliteError::Io(e) => Self::Io(e),
        }
    }
}
