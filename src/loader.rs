//! One-time resolution of the archive and save capabilities

use crate::capabilities::{ArchiveBackend, BlobSaver, CapabilityProvider};
use crate::error::Result;
use crate::events::{EventSink, LOAD_ERROR_TITLE};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{error, info};

/// Typed handles to the loaded capabilities
#[derive(Clone)]
pub struct Capabilities {
    /// Archive serialization capability
    pub archive: Arc<dyn ArchiveBackend>,
    /// Blob save capability
    pub saver: Arc<dyn BlobSaver>,
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("archive", &self.archive.name())
            .field("saver", &self.saver.name())
            .finish()
    }
}

/// Readiness of the two loaded capabilities
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Readiness {
    /// Archive capability loaded
    pub archive_ready: bool,
    /// Save capability loaded
    pub saver_ready: bool,
}

impl Readiness {
    /// Both capabilities are available
    pub fn is_ready(&self) -> bool {
        self.archive_ready && self.saver_ready
    }
}

/// Loads capabilities once per lifetime and caches the result
///
/// A failed load leaves the loader unresolved; the next
/// [`initialize`](Self::initialize) call tries again.
pub struct DependencyLoader {
    provider: Arc<dyn CapabilityProvider>,
    resolved: OnceCell<Capabilities>,
    events: EventSink,
}

impl DependencyLoader {
    /// Create a loader that resolves through `provider` and reports on `events`
    pub fn new(provider: Arc<dyn CapabilityProvider>, events: EventSink) -> Self {
        Self {
            provider,
            resolved: OnceCell::new(),
            events,
        }
    }

    /// Load both capabilities, or return the cached handles
    ///
    /// On failure an "Error loading libraries" notification is published and
    /// the error is returned.
    pub async fn initialize(&self) -> Result<Capabilities> {
        let loaded = self
            .resolved
            .get_or_try_init(|| async {
                let (archive, saver) = tokio::try_join!(
                    self.provider.load_archive_backend(),
                    self.provider.load_blob_saver()
                )?;
                info!(
                    archive = archive.name(),
                    saver = saver.name(),
                    "capabilities loaded"
                );
                Ok::<_, crate::Error>(Capabilities { archive, saver })
            })
            .await;

        match loaded {
            Ok(capabilities) => Ok(capabilities.clone()),
            Err(e) => {
                error!(error = %e, "failed to load capabilities");
                self.events.show_error(LOAD_ERROR_TITLE, &e);
                Err(e)
            }
        }
    }

    /// Cached handles, if loading already succeeded
    pub fn capabilities(&self) -> Option<Capabilities> {
        self.resolved.get().cloned()
    }

    /// Current readiness flags
    pub fn readiness(&self) -> Readiness {
        let ready = self.resolved.initialized();
        Readiness {
            archive_ready: ready,
            saver_ready: ready,
        }
    }
}
