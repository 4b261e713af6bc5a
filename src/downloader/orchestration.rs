//! Batch orchestration: the sequential per-record loop.

use chrono::Utc;
use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::events::BATCH_ERROR_TITLE;
use crate::progress::ProgressState;
use crate::types::{BatchRequest, BatchSummary, Event, RecordGroup};

use super::MassFileDownloader;

impl MassFileDownloader {
    /// Download every record in `request`, one archive per record with files.
    ///
    /// Phases:
    /// 1. Reset progress to `0 / request.len()` and publish it
    /// 2. Load the archive and save capabilities (a failure stops the batch
    ///    before any record is fetched)
    /// 3. For each record, strictly in order: fetch files, build and save the
    ///    archive when there are files, then advance progress
    ///
    /// Fetch failures are absorbed (the record counts as empty). The first
    /// archive failure stops the batch: an "Error fetching files"
    /// notification is published, later records are left unprocessed, and
    /// the error is returned.
    pub async fn handle_download(&self, request: &BatchRequest) -> Result<BatchSummary> {
        let _batch_guard = self
            .batch_lock
            .try_lock()
            .map_err(|_| Error::BatchInProgress)?;

        let total_records = request.len();
        let mut progress = ProgressState::reset(total_records);
        self.publish_progress(&progress);
        self.events.emit(Event::BatchStarted { total_records });
        info!(total_records, "batch download started");

        if let Err(e) = self.loader.initialize().await {
            error!(error = %e, "batch not started: capabilities unavailable");
            self.events.emit(Event::BatchAborted {
                records_processed: 0,
                total_records,
                error: e.notification_message(),
            });
            return Err(e);
        }

        let mut summary = BatchSummary {
            total_records,
            records_processed: 0,
            archives: Vec::new(),
            records_skipped: 0,
            fetch_failures: 0,
            started_at: Utc::now(),
            finished_at: Utc::now(),
        };

        match self.process_records(request, &mut progress, &mut summary).await {
            Ok(()) => {
                summary.finished_at = Utc::now();
                info!(
                    records_processed = summary.records_processed,
                    archives_saved = summary.archives.len(),
                    records_skipped = summary.records_skipped,
                    fetch_failures = summary.fetch_failures,
                    "batch download complete"
                );
                self.events.emit(Event::BatchComplete {
                    records_processed: summary.records_processed,
                    archives_saved: summary.archives.len(),
                });
                Ok(summary)
            }
            Err(e) => {
                error!(
                    records_processed = progress.records_processed,
                    total_records,
                    error = %e,
                    "batch download aborted"
                );
                self.events.show_error(BATCH_ERROR_TITLE, &e);
                self.events.emit(Event::BatchAborted {
                    records_processed: progress.records_processed,
                    total_records,
                    error: e.notification_message(),
                });
                Err(e)
            }
        }
    }

    async fn process_records(
        &self,
        request: &BatchRequest,
        progress: &mut ProgressState,
        summary: &mut BatchSummary,
    ) -> Result<()> {
        for record_id in request.record_ids() {
            let outcome = self.fetch_record(record_id).await;
            if outcome.failed {
                summary.fetch_failures += 1;
            }

            match RecordGroup::from_files(record_id.clone(), outcome.files) {
                Some(group) => {
                    if let Some(saved) = self.create_and_download_zip(&group).await? {
                        summary.archives.push(saved);
                    }
                }
                None => {
                    debug!(record_id = %record_id, "record has no files, skipping");
                    summary.records_skipped += 1;
                    self.events.emit(Event::RecordSkipped {
                        record_id: record_id.clone(),
                    });
                }
            }

            progress.advance();
            summary.records_processed = progress.records_processed;
            self.publish_progress(progress);
        }

        Ok(())
    }
}
