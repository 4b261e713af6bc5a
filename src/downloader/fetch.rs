//! Per-record file retrieval.

use crate::events::RECORD_FETCH_ERROR_TITLE;
use crate::types::{Event, FileRecord, RecordId};
use tracing::{debug, warn};

use super::MassFileDownloader;

/// Files retrieved for one record, and whether the fetch had failed
pub(super) struct FetchOutcome {
    pub(super) files: Vec<FileRecord>,
    pub(super) failed: bool,
}

impl MassFileDownloader {
    /// Fetch the files attached to a single record
    ///
    /// Failures never propagate: they publish an "Error fetching files for
    /// record" notification and yield an empty list, so one bad record
    /// cannot stop a batch.
    pub async fn fetch_files_for_record(&self, record_id: &RecordId) -> Vec<FileRecord> {
        self.fetch_record(record_id).await.files
    }

    pub(super) async fn fetch_record(&self, record_id: &RecordId) -> FetchOutcome {
        let outcome = match self
            .source
            .get_files(std::slice::from_ref(record_id))
            .await
        {
            Ok(files) => {
                debug!(
                    record_id = %record_id,
                    source = self.source.name(),
                    files = files.len(),
                    "files fetched for record"
                );
                FetchOutcome {
                    files,
                    failed: false,
                }
            }
            Err(e) => {
                warn!(record_id = %record_id, error = %e, "fetching files for record failed");
                self.events.show_error(RECORD_FETCH_ERROR_TITLE, &e);
                FetchOutcome {
                    files: Vec::new(),
                    failed: true,
                }
            }
        };

        self.events.emit(Event::RecordFetched {
            record_id: record_id.clone(),
            file_count: outcome.files.len(),
        });

        outcome
    }
}
