//! External capabilities used by the batch pipeline
//!
//! The pipeline never reaches for ambient state: every collaborator is a
//! trait object handed in at construction time.
//!
//! ## Architecture
//!
//! - [`FileSource`]: backend query that returns a record's files
//! - [`ArchiveBackend`]: serializes an [`Archive`](crate::archive::Archive) to a blob
//! - [`BlobSaver`]: persists a named blob
//! - [`CapabilityProvider`]: resolves the archive and save capabilities on demand
//!
//! Production implementations:
//!
//! - [`HttpFileSource`]: POSTs record IDs to a JSON endpoint
//! - [`ZipArchiveBackend`]: in-memory ZIP via the `zip` crate
//! - [`DirectorySaver`]: writes into a local directory with collision handling
//! - [`DefaultCapabilityProvider`]: wires the two above from [`Config`](crate::Config)
//!
//! ## Usage
//!
//! ```no_run
//! use record_zip_dl::capabilities::{ArchiveBackend, ZipArchiveBackend};
//! use record_zip_dl::archive::Archive;
//!
//! # async fn example() -> record_zip_dl::Result<()> {
//! let mut archive = Archive::with_folder("Acme");
//! archive.add_base64_file("hello.txt", "aGVsbG8=");
//!
//! let blob = ZipArchiveBackend::default().generate(archive).await?;
//! println!("{} bytes", blob.len());
//! # Ok(())
//! # }
//! ```

mod directory_saver;
mod http_source;
mod provider;
mod traits;
mod zip_backend;

pub use directory_saver::DirectorySaver;
pub use http_source::HttpFileSource;
pub use provider::DefaultCapabilityProvider;
pub use traits::{ArchiveBackend, BlobSaver, CapabilityProvider, FileSource};
pub use zip_backend::ZipArchiveBackend;
