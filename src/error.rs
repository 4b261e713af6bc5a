//! Error types for record-zip-dl
//!
//! This module provides the error handling for the library:
//! - Domain-specific error types (fetch, archive, configuration)
//! - Machine-readable error codes for consumers that render notifications
//! - Best-effort message extraction for user-visible notifications

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for record-zip-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fallback message used when an error carries no usable text
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Main error type for record-zip-dl
///
/// Each variant includes contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "output_dir")
        key: Option<String>,
    },

    /// Fetching record files from the backend failed
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Building, serializing or saving an archive failed
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// A required capability could not be loaded
    #[error("capability unavailable: {name}: {reason}")]
    CapabilityUnavailable {
        /// Capability name (e.g., "archive", "saver")
        name: String,
        /// Why loading failed
        reason: String,
    },

    /// A batch is already running on this downloader
    #[error("a batch download is already in progress")]
    BatchInProgress,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Errors raised while retrieving a record's files
#[derive(Debug, Error)]
pub enum FetchError {
    /// Backend answered with a non-success status
    #[error("backend returned HTTP {status} for {endpoint}")]
    BadStatus {
        /// HTTP status code
        status: u16,
        /// The endpoint that was called
        endpoint: String,
    },

    /// Backend rejected the request or failed internally
    #[error("{0}")]
    Backend(String),
}

/// Errors raised while building, serializing, or saving an archive
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// An entry body was not valid base64
    #[error("entry {entry} is not valid base64: {source}")]
    InvalidBase64 {
        /// Entry name inside the archive
        entry: String,
        /// The decoding failure
        #[source]
        source: base64::DecodeError,
    },

    /// The ZIP writer failed
    #[error("failed to write ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The blocking serialization task panicked or was cancelled
    #[error("archive serialization task failed: {0}")]
    TaskFailed(String),

    /// Saving the archive blob failed
    #[error("failed to save {filename}: {reason}")]
    SaveFailed {
        /// Target file name
        filename: String,
        /// The reason the save failed
        reason: String,
    },

    /// A file already exists and the collision policy is Skip
    #[error("file collision at {path}: {reason}")]
    FileCollision {
        /// The path where the collision occurred
        path: PathBuf,
        /// The reason for the collision (e.g., "file already exists")
        reason: String,
    },

    /// Invalid path encountered while saving
    #[error("invalid path {path}: {reason}")]
    InvalidPath {
        /// The invalid path that was encountered
        path: PathBuf,
        /// The reason the path is invalid
        reason: String,
    },
}

impl Error {
    /// Create a configuration error for the given key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Get the machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Fetch(e) => match e {
                FetchError::BadStatus { .. } => "fetch_bad_status",
                FetchError::Backend(_) => "fetch_failed",
            },
            Error::Archive(e) => match e {
                ArchiveError::InvalidBase64 { .. } => "invalid_base64",
                ArchiveError::Zip(_) => "zip_error",
                ArchiveError::TaskFailed(_) => "archive_task_failed",
                ArchiveError::SaveFailed { .. } => "save_failed",
                ArchiveError::FileCollision { .. } => "file_collision",
                ArchiveError::InvalidPath { .. } => "invalid_path",
            },
            Error::CapabilityUnavailable { .. } => "capability_unavailable",
            Error::BatchInProgress => "batch_in_progress",
            Error::Io(_) => "io_error",
            Error::Network(_) => "network_error",
            Error::Serialization(_) => "serialization_error",
            Error::Other(_) => "internal_error",
        }
    }

    /// Best-effort message for user-visible notifications
    ///
    /// Uses the innermost meaningful description; errors that render to an
    /// empty string fall back to [`UNKNOWN_ERROR_MESSAGE`].
    pub fn notification_message(&self) -> String {
        let message = match self {
            Error::Fetch(FetchError::Backend(msg)) | Error::Other(msg) => msg.clone(),
            Error::CapabilityUnavailable { reason, .. } => reason.clone(),
            Error::Archive(e) => e.to_string(),
            other => other.to_string(),
        };

        if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        let cases: Vec<(Error, &str)> = vec![
            (Error::config("output_dir", "empty"), "config_error"),
            (
                Error::Fetch(FetchError::BadStatus {
                    status: 500,
                    endpoint: "http://localhost/files".into(),
                }),
                "fetch_bad_status",
            ),
            (Error::Fetch(FetchError::Backend("down".into())), "fetch_failed"),
            (
                Error::Archive(ArchiveError::TaskFailed("panicked".into())),
                "archive_task_failed",
            ),
            (
                Error::Archive(ArchiveError::SaveFailed {
                    filename: "A.zip".into(),
                    reason: "disk full".into(),
                }),
                "save_failed",
            ),
            (
                Error::CapabilityUnavailable {
                    name: "archive".into(),
                    reason: "missing".into(),
                },
                "capability_unavailable",
            ),
            (Error::BatchInProgress, "batch_in_progress"),
            (
                Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
                "io_error",
            ),
            (Error::Other("boom".into()), "internal_error"),
        ];

        for (error, expected) in cases {
            assert_eq!(error.error_code(), expected, "wrong code for {error:?}");
        }
    }

    #[test]
    fn notification_message_uses_raw_backend_text() {
        let err = Error::Fetch(FetchError::Backend("Insufficient privileges".into()));
        assert_eq!(err.notification_message(), "Insufficient privileges");
    }

    #[test]
    fn notification_message_falls_back_to_unknown_error() {
        assert_eq!(
            Error::Other(String::new()).notification_message(),
            UNKNOWN_ERROR_MESSAGE
        );
        assert_eq!(
            Error::Fetch(FetchError::Backend("   ".into())).notification_message(),
            UNKNOWN_ERROR_MESSAGE
        );
    }

    #[test]
    fn notification_message_for_capability_is_the_reason() {
        let err = Error::CapabilityUnavailable {
            name: "saver".into(),
            reason: "output directory is read-only".into(),
        };
        assert_eq!(err.notification_message(), "output directory is read-only");
    }

    #[test]
    fn config_error_carries_key() {
        match Error::config("event_channel_capacity", "must be greater than zero") {
            Error::Config { key, message } => {
                assert_eq!(key.as_deref(), Some("event_channel_capacity"));
                assert!(message.contains("greater than zero"));
            }
            other => panic!("expected Config error, got {other:?}"),
        }
    }
}
