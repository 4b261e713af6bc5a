//! Core types for record-zip-dl

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Identifier of a backend record that owns files
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Create a new RecordId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered, immutable list of records to download in one batch
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchRequest {
    record_ids: Vec<RecordId>,
}

impl BatchRequest {
    /// Build a request from anything that yields record identifiers
    pub fn new<I, T>(record_ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RecordId>,
    {
        Self {
            record_ids: record_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Record identifiers in processing order
    pub fn record_ids(&self) -> &[RecordId] {
        &self.record_ids
    }

    /// Number of records, used as the progress denominator
    pub fn len(&self) -> usize {
        self.record_ids.len()
    }

    /// Whether the request holds no records
    pub fn is_empty(&self) -> bool {
        self.record_ids.is_empty()
    }
}

/// One file attached to a record, as returned by the backend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Original file name (may contain characters unsafe for filesystems)
    pub file_name: String,
    /// File content, base64 encoded
    pub body: String,
    /// Display name of the owning record, repeated on every file
    pub record_name: String,
}

/// A record's files, ready to be archived
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordGroup {
    /// Record the files belong to
    pub record_id: RecordId,
    /// Sanitized record name, used for the folder and archive name
    pub record_name: String,
    /// Files in backend order
    pub files: Vec<FileRecord>,
}

impl RecordGroup {
    /// Group fetched files under their record, sanitizing the first file's record name
    ///
    /// Returns `None` when there are no files to group.
    pub fn from_files(record_id: RecordId, files: Vec<FileRecord>) -> Option<Self> {
        let record_name = crate::utils::sanitize_record_name(&files.first()?.record_name);
        Some(Self {
            record_id,
            record_name,
            files,
        })
    }

    /// File name of the archive produced for this group
    pub fn archive_file_name(&self) -> String {
        format!("{}.zip", self.record_name)
    }
}

/// Serialized archive bytes handed to the save capability
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    /// Raw bytes
    pub data: Vec<u8>,
    /// MIME type of the content
    pub mime_type: &'static str,
}

impl Blob {
    /// MIME type for ZIP archives
    pub const ZIP_MIME_TYPE: &'static str = "application/zip";

    /// Wrap ZIP bytes
    pub fn zip(data: Vec<u8>) -> Self {
        Self {
            data,
            mime_type: Self::ZIP_MIME_TYPE,
        }
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the blob holds no bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Archive written for one record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedArchive {
    /// Record the archive belongs to
    pub record_id: RecordId,
    /// Requested file name (`{record}.zip`)
    pub file_name: String,
    /// Where the saver actually wrote it
    pub path: PathBuf,
    /// Number of entries added
    pub entries: usize,
    /// Archive size in bytes
    pub size_bytes: u64,
}

/// Notification severity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Something failed
    Error,
    /// Something may need attention
    Warning,
    /// Something succeeded
    Success,
    /// Neutral information
    Info,
}

/// Transient, user-visible notification
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Short title
    pub title: String,
    /// Detail message
    pub message: String,
    /// Severity
    pub variant: Variant,
}

impl Notification {
    /// Create an error notification
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            variant: Variant::Error,
        }
    }
}

/// Outcome of a batch that ran to the end of its record list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Records in the request
    pub total_records: usize,
    /// Records that settled (always equal to `total_records` on success)
    pub records_processed: usize,
    /// Archives written, in record order
    pub archives: Vec<SavedArchive>,
    /// Records that produced no archive because they had no files
    pub records_skipped: usize,
    /// Records whose fetch failed and were treated as empty
    pub fetch_failures: usize,
    /// When the batch started
    pub started_at: DateTime<Utc>,
    /// When the last record settled
    pub finished_at: DateTime<Utc>,
}

/// Event emitted during a batch run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Batch accepted and progress reset
    BatchStarted {
        /// Records in the request
        total_records: usize,
    },

    /// Files retrieved for a record (zero when the fetch failed)
    RecordFetched {
        /// Record ID
        record_id: RecordId,
        /// Number of files returned
        file_count: usize,
    },

    /// Record had no files; no archive was produced
    RecordSkipped {
        /// Record ID
        record_id: RecordId,
    },

    /// Archive saved for a record
    ArchiveSaved {
        /// Record ID
        record_id: RecordId,
        /// Requested archive file name
        file_name: String,
        /// Where the archive landed
        path: PathBuf,
        /// Archive size in bytes
        size_bytes: u64,
    },

    /// Progress after a record settled
    Progress {
        /// Records settled so far
        records_processed: usize,
        /// Records in the request
        total_records: usize,
        /// Floor of processed / total × 100
        percentage: u8,
        /// Display width string, e.g. `width: 50%`
        style: String,
    },

    /// User-visible notification
    Notification(Notification),

    /// Every record settled
    BatchComplete {
        /// Records settled
        records_processed: usize,
        /// Archives written
        archives_saved: usize,
    },

    /// Batch stopped early on an unabsorbed failure
    BatchAborted {
        /// Records settled before the failure
        records_processed: usize,
        /// Records in the request
        total_records: usize,
        /// Error message
        error: String,
    },
}
