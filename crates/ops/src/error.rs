use std::path::PathBuf;

use complaintbot_core::error::CoreError;
use complaintbot_notify::NotifyError;

/// Error type shared by every operational tool.
///
/// Binaries catch it at the top level, print it, and exit with status 1.
#[derive(Debug, thiserror::Error)]
pub enum OpsError {
    /// Domain errors: not found, validation, conflict.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A query or commit failed. Transactions are rolled back first.
    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Backup or copy failure.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP transport failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Notification error: {0}")]
    Notification(#[from] NotifyError),

    #[error("Password hashing error: {0}")]
    Password(String),

    /// Bad command-line input.
    #[error("{0}")]
    Usage(String),
}

impl OpsError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        OpsError::Core(CoreError::not_found(entity, key))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        OpsError::Core(CoreError::Validation(msg.into()))
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OpsError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type OpsResult<T> = Result<T, OpsError>;
