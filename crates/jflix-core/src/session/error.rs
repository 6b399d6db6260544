//! Session store error handling
//!
//! Provides typed errors for session persistence with descriptive messages
//! and recovery suggestions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the persisted session
#[derive(Error, Debug)]
pub enum SessionError {
    /// Failed to create the session directory
    #[error("Failed to create session directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Disk is full or quota exceeded
    #[error(
        "Disk full or quota exceeded while writing to '{path}'. Free up disk space and try again."
    )]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write file
    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Stored user record cannot be parsed
    #[error("Stored user record at '{path}' is corrupted: {details}")]
    CorruptRecord { path: PathBuf, details: String },

    /// User record could not be serialized
    #[error("Failed to serialize user record: {0}")]
    Serialize(String),

    /// Atomic write failed during rename
    #[error("Atomic write failed: could not rename '{from}' to '{to}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SessionError {
    /// Create an error from an I/O error with path context
    ///
    /// Classifies the error based on its kind (permission, disk full, etc.)
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => SessionError::PermissionDenied {
                path,
                source: error,
            },
            _ if is_disk_full_error(&error) => SessionError::DiskFull {
                path,
                source: error,
            },
            _ => SessionError::WriteError {
                path,
                source: error,
            },
        }
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            SessionError::DiskFull { .. } => Some("Free up disk space and try again."),
            SessionError::PermissionDenied { .. } => {
                Some("Check file and directory permissions of the data directory.")
            }
            SessionError::CorruptRecord { .. } => {
                Some("Run `jflix logout` to discard the stored session, then log in again.")
            }
            SessionError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            _ => None,
        }
    }
}

/// Check if an I/O error indicates disk full condition
fn is_disk_full_error(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left")
        || msg.contains("disk full")
        || msg.contains("quota exceeded")
        || msg.contains("not enough space")
}

/// Result type for session store operations
pub type SessionResult<T> = Result<T, SessionError>;
