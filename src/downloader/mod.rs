//! Batch downloader split into focused submodules.
//!
//! The `MassFileDownloader` struct and its methods are organized by step:
//! - [`fetch`] - Per-record file retrieval with failure absorption
//! - [`zip_task`] - Archive building and saving for one record
//! - [`orchestration`] - The sequential per-record batch loop

mod fetch;
mod orchestration;
mod zip_task;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use crate::capabilities::{CapabilityProvider, DefaultCapabilityProvider, FileSource, HttpFileSource};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::events::EventSink;
use crate::loader::{Capabilities, DependencyLoader, Readiness};
use crate::progress::ProgressState;
use crate::types::Event;
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast, watch};

/// Downloads the files of many records, one ZIP archive per record
///
/// Cloneable; all fields are Arc-wrapped and clones share state. Only one
/// batch runs at a time per downloader.
#[derive(Clone)]
pub struct MassFileDownloader {
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// Event publisher (multiple subscribers supported)
    pub(crate) events: EventSink,
    /// Backend that returns record files
    pub(crate) source: Arc<dyn FileSource>,
    /// Resolves the archive and save capabilities once
    pub(crate) loader: Arc<DependencyLoader>,
    /// Progress of the current or last batch; written only by the batch loop
    pub(crate) progress_tx: Arc<watch::Sender<ProgressState>>,
    /// Held for the duration of a batch
    pub(crate) batch_lock: Arc<Mutex<()>>,
}

impl MassFileDownloader {
    /// Create a downloader from explicit capabilities
    ///
    /// Nothing is loaded yet; capabilities are resolved by
    /// [`initialize`](Self::initialize) or lazily by the first batch.
    pub fn new(
        config: Config,
        source: Arc<dyn FileSource>,
        provider: Arc<dyn CapabilityProvider>,
    ) -> Result<Self> {
        config.validate()?;

        let events = EventSink::new(config.event_channel_capacity);
        let loader = Arc::new(DependencyLoader::new(provider, events.clone()));
        let (progress_tx, _rx) = watch::channel(ProgressState::default());

        Ok(Self {
            config: Arc::new(config),
            events,
            source,
            loader,
            progress_tx: Arc::new(progress_tx),
            batch_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Create a downloader using the HTTP source and the default ZIP/directory capabilities
    ///
    /// Requires `config.source` to be set.
    pub fn from_config(config: Config) -> Result<Self> {
        let source_config = config.source.as_ref().ok_or_else(|| {
            Error::config("source", "an HTTP source endpoint is required")
        })?;
        let source = Arc::new(HttpFileSource::new(source_config)?);
        let provider = Arc::new(DefaultCapabilityProvider::new(Arc::new(config.clone())));

        Self::new(config, source, provider)
    }

    /// Subscribe to batch events (progress, notifications, saved archives)
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Watch the progress state; the receiver sees every published snapshot
    pub fn watch_progress(&self) -> watch::Receiver<ProgressState> {
        self.progress_tx.subscribe()
    }

    /// Current progress snapshot
    pub fn progress(&self) -> ProgressState {
        self.progress_tx.borrow().clone()
    }

    /// Load the archive and save capabilities (idempotent after success)
    pub async fn initialize(&self) -> Result<Capabilities> {
        self.loader.initialize().await
    }

    /// Whether the archive and save capabilities are loaded
    pub fn readiness(&self) -> Readiness {
        self.loader.readiness()
    }

    /// Get the current configuration
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Publish a progress snapshot to watchers and subscribers
    pub(crate) fn publish_progress(&self, state: &ProgressState) {
        self.progress_tx.send_replace(state.clone());
        if state.records_processed > 0 {
            self.events.emit(Event::Progress {
                records_processed: state.records_processed,
                total_records: state.total_records,
                percentage: state.progress_percentage,
                style: state.progress_bar_style.clone(),
            });
        }
    }
}
