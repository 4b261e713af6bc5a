//! Archive building and saving for a single record.

use crate::archive::Archive;
use crate::error::{Error, Result};
use crate::events::ZIP_ERROR_TITLE;
use crate::loader::Capabilities;
use crate::types::{Event, RecordGroup, SavedArchive};
use tracing::{debug, error, info};

use super::MassFileDownloader;

impl MassFileDownloader {
    /// Build the archive for `group`, serialize it, and hand it to the saver
    ///
    /// An empty group returns `Ok(None)` without touching either capability.
    /// Serialization or save failures publish an "Error generating ZIP file"
    /// notification and are returned to the caller.
    ///
    /// Capabilities must already be loaded (see
    /// [`initialize`](Self::initialize)); otherwise this fails with
    /// [`Error::CapabilityUnavailable`].
    pub async fn create_and_download_zip(&self, group: &RecordGroup) -> Result<Option<SavedArchive>> {
        if group.files.is_empty() {
            debug!(record_id = %group.record_id, "no files, skipping archive");
            return Ok(None);
        }

        let capabilities = self
            .loader
            .capabilities()
            .ok_or_else(|| Error::CapabilityUnavailable {
                name: "archive".to_string(),
                reason: "capabilities have not been loaded".to_string(),
            })?;

        match self.build_and_save(group, &capabilities).await {
            Ok(saved) => Ok(Some(saved)),
            Err(e) => {
                error!(
                    record_id = %group.record_id,
                    record_name = %group.record_name,
                    error = %e,
                    "generating ZIP file failed"
                );
                self.events.show_error(ZIP_ERROR_TITLE, &e);
                Err(e)
            }
        }
    }

    async fn build_and_save(
        &self,
        group: &RecordGroup,
        capabilities: &Capabilities,
    ) -> Result<SavedArchive> {
        let archive = Archive::from_group(group);
        let entries = archive.len();
        let file_name = group.archive_file_name();

        let blob = capabilities.archive.generate(archive).await?;
        let size_bytes = blob.len() as u64;
        let path = capabilities.saver.save(blob, &file_name).await?;

        info!(
            record_id = %group.record_id,
            file_name = %file_name,
            entries,
            size_bytes,
            "archive saved for record"
        );

        self.events.emit(Event::ArchiveSaved {
            record_id: group.record_id.clone(),
            file_name: file_name.clone(),
            path: path.clone(),
            size_bytes,
        });

        Ok(SavedArchive {
            record_id: group.record_id.clone(),
            file_name,
            path,
            entries,
            size_bytes,
        })
    }
}
