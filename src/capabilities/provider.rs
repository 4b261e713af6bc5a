//! Default capability provider wired from [`Config`]

use super::directory_saver::DirectorySaver;
use super::traits::{ArchiveBackend, BlobSaver, CapabilityProvider};
use super::zip_backend::ZipArchiveBackend;
use crate::config::Config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Provides a [`ZipArchiveBackend`] and a [`DirectorySaver`]
///
/// Loading the saver prepares the output directory, so an unwritable
/// location is reported at load time rather than on the first save.
#[derive(Clone, Debug)]
pub struct DefaultCapabilityProvider {
    config: Arc<Config>,
}

impl DefaultCapabilityProvider {
    /// Create a provider for the given configuration
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CapabilityProvider for DefaultCapabilityProvider {
    async fn load_archive_backend(&self) -> Result<Arc<dyn ArchiveBackend>> {
        Ok(Arc::new(ZipArchiveBackend::new(self.config.output.compression)))
    }

    async fn load_blob_saver(&self) -> Result<Arc<dyn BlobSaver>> {
        let dir = self.config.output_dir();
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| Error::CapabilityUnavailable {
                name: "saver".to_string(),
                reason: format!("cannot create output directory '{}': {}", dir.display(), e),
            })?;

        debug!(output_dir = %dir.display(), "output directory ready");
        Ok(Arc::new(DirectorySaver::new(
            dir.clone(),
            self.config.output.file_collision,
        )))
    }
}
