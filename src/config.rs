//! Configuration types for record-zip-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where and how archives are written
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory that receives the saved archives (default: "downloads")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// What to do when `{record}.zip` already exists
    #[serde(default)]
    pub file_collision: FileCollisionAction,

    /// Compression method for archive entries
    #[serde(default)]
    pub compression: CompressionMethod,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_collision: FileCollisionAction::default(),
            compression: CompressionMethod::default(),
        }
    }
}

/// HTTP backend that serves record files
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Endpoint that accepts `{"recordIds": [...]}` and returns the file list
    pub endpoint: String,

    /// Optional value for the `Authorization` header
    #[serde(default)]
    pub auth_header: Option<String>,
}

/// Main configuration for [`MassFileDownloader`](crate::MassFileDownloader)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Archive output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Record file backend (required only when using the HTTP source)
    #[serde(default)]
    pub source: Option<SourceConfig>,

    /// Capacity of the event broadcast channel (default: 1000)
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            source: None,
            event_channel_capacity: default_event_channel_capacity(),
        }
    }
}

impl Config {
    /// Check settings that would otherwise fail later in the pipeline
    pub fn validate(&self) -> Result<()> {
        if self.event_channel_capacity == 0 {
            return Err(Error::config(
                "event_channel_capacity",
                "event channel capacity must be greater than zero",
            ));
        }

        if self.output.output_dir.as_os_str().is_empty() {
            return Err(Error::config("output_dir", "output directory is empty"));
        }

        if let Some(source) = &self.source {
            url::Url::parse(&source.endpoint).map_err(|e| {
                Error::config(
                    "source.endpoint",
                    format!("invalid endpoint '{}': {}", source.endpoint, e),
                )
            })?;
        }

        Ok(())
    }

    /// Output directory
    pub fn output_dir(&self) -> &PathBuf {
        &self.output.output_dir
    }
}

/// File collision handling strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCollisionAction {
    /// Append (1), (2), etc. to filename (default)
    #[default]
    Rename,
    /// Overwrite existing file
    Overwrite,
    /// Fail the save, keep existing
    Skip,
}

/// Compression applied to archive entries
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionMethod {
    /// DEFLATE (default)
    #[default]
    Deflated,
    /// No compression
    Stored,
}

impl From<CompressionMethod> for zip::CompressionMethod {
    fn from(method: CompressionMethod) -> Self {
        match method {
            CompressionMethod::Deflated => zip::CompressionMethod::Deflated,
            CompressionMethod::Stored => zip::CompressionMethod::Stored,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_event_channel_capacity() -> usize {
    1000
}
