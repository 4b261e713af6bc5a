//! # record-zip-dl
//!
//! Bulk download of record attachments: for every record in a batch, fetch
//! its files, pack them into one ZIP archive named after the record, save
//! the archive, and report progress.
//!
//! ## Design Philosophy
//!
//! record-zip-dl is designed to be:
//! - **Sequential** - Records are processed strictly one at a time, in order
//! - **Injected** - File source, archiver and saver are trait objects, never ambient globals
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - Consumers subscribe to events and progress, no polling required
//!
//! ## Quick Start
//!
//! ```no_run
//! use record_zip_dl::{BatchRequest, Config, MassFileDownloader, SourceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         source: Some(SourceConfig {
//!             endpoint: "https://crm.example.com/api/record-files".to_string(),
//!             auth_header: Some("Bearer token".to_string()),
//!         }),
//!         ..Default::default()
//!     };
//!
//!     let downloader = MassFileDownloader::from_config(config)?;
//!
//!     // Subscribe to events
//!     let mut events = downloader.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let summary = downloader
//!         .handle_download(&BatchRequest::new(["0015g00000AbCdE", "0015g00000FgHiJ"]))
//!         .await?;
//!     println!("{} archives saved", summary.archives.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// In-memory archive model
pub mod archive;
/// Injectable file source, archive and save capabilities
pub mod capabilities;
/// Configuration types
pub mod config;
/// Batch downloader implementation (decomposed into focused submodules)
pub mod downloader;
/// Error types
pub mod error;
/// Event publishing and user notifications
pub mod events;
/// One-time capability loading
pub mod loader;
/// Progress computation and state
pub mod progress;
/// Core types and events
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use archive::{Archive, ArchiveEntry, EntryContent};
pub use capabilities::{
    ArchiveBackend, BlobSaver, CapabilityProvider, DefaultCapabilityProvider, DirectorySaver,
    FileSource, HttpFileSource, ZipArchiveBackend,
};
pub use config::{CompressionMethod, Config, FileCollisionAction, OutputConfig, SourceConfig};
pub use downloader::MassFileDownloader;
pub use error::{ArchiveError, Error, FetchError, Result};
pub use loader::{Capabilities, DependencyLoader, Readiness};
pub use progress::{Progress, ProgressState, compute_progress};
pub use types::{
    BatchRequest, BatchSummary, Blob, Event, FileRecord, Notification, RecordGroup, RecordId,
    SavedArchive, Variant,
};
