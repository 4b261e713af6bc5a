//! Saves archive blobs into a local directory

use super::traits::BlobSaver;
use crate::config::FileCollisionAction;
use crate::error::{ArchiveError, Error, Result};
use crate::types::Blob;
use crate::utils::get_unique_path;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writes each blob as a file inside `dir`
///
/// Collisions are resolved like a browser download by default:
/// `Acme.zip`, then `Acme (1).zip`, `Acme (2).zip`, ...
#[derive(Clone, Debug)]
pub struct DirectorySaver {
    dir: PathBuf,
    collision: FileCollisionAction,
}

impl DirectorySaver {
    /// Create a saver for `dir` with the given collision policy
    pub fn new(dir: impl Into<PathBuf>, collision: FileCollisionAction) -> Self {
        Self {
            dir: dir.into(),
            collision,
        }
    }

    /// Target directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn validate_file_name(&self, file_name: &str) -> Result<()> {
        let as_path = Path::new(file_name);
        let is_plain = !file_name.is_empty()
            && as_path.file_name().and_then(|n| n.to_str()) == Some(file_name);

        if is_plain {
            Ok(())
        } else {
            Err(Error::Archive(ArchiveError::InvalidPath {
                path: self.dir.join(file_name),
                reason: "file name must not contain path components".to_string(),
            }))
        }
    }
}

#[async_trait]
impl BlobSaver for DirectorySaver {
    async fn save(&self, blob: Blob, file_name: &str) -> Result<PathBuf> {
        self.validate_file_name(file_name)?;

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            Error::Archive(ArchiveError::SaveFailed {
                filename: file_name.to_string(),
                reason: format!("failed to create {}: {}", self.dir.display(), e),
            })
        })?;

        let target = get_unique_path(&self.dir.join(file_name), self.collision)?;
        debug!(?target, size_bytes = blob.len(), "writing archive");

        tokio::fs::write(&target, &blob.data).await.map_err(|e| {
            Error::Archive(ArchiveError::SaveFailed {
                filename: file_name.to_string(),
                reason: e.to_string(),
            })
        })?;

        info!(path = %target.display(), size_bytes = blob.len(), "archive saved");
        Ok(target)
    }

    fn name(&self) -> &'static str {
        "directory"
    }
}
