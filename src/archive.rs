//! In-memory archive description built from a record's files
//!
//! An [`Archive`] is one top-level folder named after the sanitized record
//! name plus one entry per file. It holds the base64 bodies as received;
//! decoding happens when an [`ArchiveBackend`](crate::ArchiveBackend)
//! serializes it.

use crate::error::{ArchiveError, Error, Result};
use crate::types::RecordGroup;
use base64::Engine;

/// Content of a single archive entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryContent {
    /// Base64 text, decoded at serialization time
    Base64(String),
    /// Raw bytes
    Bytes(Vec<u8>),
}

impl EntryContent {
    /// Decode into raw bytes
    ///
    /// ASCII whitespace inside base64 text (line breaks from MIME-style
    /// encoders) is ignored.
    pub fn decode(&self, entry_name: &str) -> Result<Vec<u8>> {
        match self {
            EntryContent::Bytes(bytes) => Ok(bytes.clone()),
            EntryContent::Base64(text) => {
                let compact: String = text
                    .chars()
                    .filter(|c| !c.is_ascii_whitespace())
                    .collect();
                base64::engine::general_purpose::STANDARD
                    .decode(compact.as_bytes())
                    .map_err(|source| {
                        Error::Archive(ArchiveError::InvalidBase64 {
                            entry: entry_name.to_string(),
                            source,
                        })
                    })
            }
        }
    }
}

/// One file inside the archive folder
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry name relative to the folder (the original file name)
    pub name: String,
    /// Entry content
    pub content: EntryContent,
}

/// Archive under construction: one folder, many entries
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Archive {
    folder: String,
    entries: Vec<ArchiveEntry>,
}

impl Archive {
    /// Start an archive whose entries live under `folder`
    pub fn with_folder(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            entries: Vec::new(),
        }
    }

    /// Add a base64-encoded file under the folder
    pub fn add_base64_file(&mut self, name: impl Into<String>, body: impl Into<String>) {
        self.entries.push(ArchiveEntry {
            name: name.into(),
            content: EntryContent::Base64(body.into()),
        });
    }

    /// Add a raw file under the folder
    pub fn add_file(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.entries.push(ArchiveEntry {
            name: name.into(),
            content: EntryContent::Bytes(bytes),
        });
    }

    /// Build the archive for a record group: folder = record name, one entry per file
    pub fn from_group(group: &RecordGroup) -> Self {
        let mut archive = Self::with_folder(group.record_name.clone());
        for file in &group.files {
            archive.add_base64_file(file.file_name.clone(), file.body.clone());
        }
        archive
    }

    /// Top-level folder name
    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Full path of an entry inside the archive
    pub fn entry_path(&self, entry: &ArchiveEntry) -> String {
        if self.folder.is_empty() {
            entry.name.clone()
        } else {
            format!("{}/{}", self.folder, entry.name)
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
