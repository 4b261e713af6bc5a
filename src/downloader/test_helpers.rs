//! Shared test helpers: scripted capabilities and a downloader factory.

use crate::archive::Archive;
use crate::capabilities::{
    ArchiveBackend, BlobSaver, CapabilityProvider, FileSource, ZipArchiveBackend,
};
use crate::config::Config;
use crate::downloader::MassFileDownloader;
use crate::error::{Error, FetchError, Result};
use crate::types::{Blob, Event, FileRecord, Notification, RecordId};
use async_trait::async_trait;
use base64::Engine;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Build a file whose body is `content` encoded as base64
pub(crate) fn file(name: &str, content: &str, record_name: &str) -> FileRecord {
    FileRecord {
        file_name: name.to_string(),
        body: base64::engine::general_purpose::STANDARD.encode(content),
        record_name: record_name.to_string(),
    }
}

enum Script {
    Files(Vec<FileRecord>),
    Fail(String),
}

/// File source answering from a per-record script; unknown records have no files
#[derive(Default)]
pub(crate) struct ScriptedSource {
    scripts: HashMap<String, Script>,
    calls: Mutex<Vec<Vec<RecordId>>>,
}

impl ScriptedSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_files(mut self, record_id: &str, files: Vec<FileRecord>) -> Self {
        self.scripts
            .insert(record_id.to_string(), Script::Files(files));
        self
    }

    pub(crate) fn failing(mut self, record_id: &str, message: &str) -> Self {
        self.scripts
            .insert(record_id.to_string(), Script::Fail(message.to_string()));
        self
    }

    /// Identifier slices passed to `get_files`, in call order
    pub(crate) fn calls(&self) -> Vec<Vec<RecordId>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileSource for ScriptedSource {
    async fn get_files(&self, record_ids: &[RecordId]) -> Result<Vec<FileRecord>> {
        self.calls.lock().unwrap().push(record_ids.to_vec());

        let key = record_ids.first().map(RecordId::as_str).unwrap_or_default();
        match self.scripts.get(key) {
            Some(Script::Files(files)) => Ok(files.clone()),
            Some(Script::Fail(message)) => Err(Error::Fetch(FetchError::Backend(message.clone()))),
            None => Ok(Vec::new()),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Real ZIP backend that fails for chosen folders and records every call
#[derive(Default)]
pub(crate) struct FlakyArchiveBackend {
    fail_folders: Vec<String>,
    inner: ZipArchiveBackend,
    generated: Mutex<Vec<String>>,
}

impl FlakyArchiveBackend {
    pub(crate) fn failing_for(folders: &[&str]) -> Self {
        Self {
            fail_folders: folders.iter().map(|f| f.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Folder names of every archive passed to `generate`
    pub(crate) fn generated(&self) -> Vec<String> {
        self.generated.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArchiveBackend for FlakyArchiveBackend {
    async fn generate(&self, archive: Archive) -> Result<Blob> {
        let folder = archive.folder().to_string();
        self.generated.lock().unwrap().push(folder.clone());

        if self.fail_folders.contains(&folder) {
            return Err(Error::Other("out of memory while compressing".to_string()));
        }
        self.inner.generate(archive).await
    }

    fn name(&self) -> &'static str {
        "flaky-zip"
    }
}

/// Saver that keeps blobs in memory
#[derive(Default)]
pub(crate) struct RecordingSaver {
    saved: Mutex<Vec<(String, Blob)>>,
}

impl RecordingSaver {
    pub(crate) fn saved(&self) -> Vec<(String, Blob)> {
        self.saved.lock().unwrap().clone()
    }

    pub(crate) fn saved_names(&self) -> Vec<String> {
        self.saved().into_iter().map(|(name, _)| name).collect()
    }
}

#[async_trait]
impl BlobSaver for RecordingSaver {
    async fn save(&self, blob: Blob, file_name: &str) -> Result<PathBuf> {
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), blob));
        Ok(PathBuf::from("memory").join(file_name))
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Provider handing out fixed capabilities, or failing to load the saver
pub(crate) struct StaticProvider {
    archive: Arc<dyn ArchiveBackend>,
    saver: Arc<dyn BlobSaver>,
    saver_error: Option<String>,
}

impl StaticProvider {
    pub(crate) fn new(archive: Arc<dyn ArchiveBackend>, saver: Arc<dyn BlobSaver>) -> Self {
        Self {
            archive,
            saver,
            saver_error: None,
        }
    }

    pub(crate) fn broken(reason: &str) -> Self {
        Self {
            archive: Arc::new(ZipArchiveBackend::default()),
            saver: Arc::new(RecordingSaver::default()),
            saver_error: Some(reason.to_string()),
        }
    }
}

#[async_trait]
impl CapabilityProvider for StaticProvider {
    async fn load_archive_backend(&self) -> Result<Arc<dyn ArchiveBackend>> {
        Ok(self.archive.clone())
    }

    async fn load_blob_saver(&self) -> Result<Arc<dyn BlobSaver>> {
        match &self.saver_error {
            Some(reason) => Err(Error::CapabilityUnavailable {
                name: "saver".to_string(),
                reason: reason.clone(),
            }),
            None => Ok(self.saver.clone()),
        }
    }
}

/// Everything a downloader test needs to inspect afterwards
pub(crate) struct TestHarness {
    pub(crate) downloader: MassFileDownloader,
    pub(crate) source: Arc<ScriptedSource>,
    pub(crate) archive: Arc<FlakyArchiveBackend>,
    pub(crate) saver: Arc<RecordingSaver>,
}

/// Downloader over in-memory capabilities
pub(crate) fn create_test_downloader(
    source: ScriptedSource,
    archive: FlakyArchiveBackend,
) -> TestHarness {
    let source = Arc::new(source);
    let archive = Arc::new(archive);
    let saver = Arc::new(RecordingSaver::default());
    let provider = Arc::new(StaticProvider::new(archive.clone(), saver.clone()));

    let downloader = MassFileDownloader::new(Config::default(), source.clone(), provider).unwrap();

    TestHarness {
        downloader,
        source,
        archive,
        saver,
    }
}

/// Collect every event already published to `rx`
pub(crate) fn drain_events(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Notifications among `events`, in order
pub(crate) fn notifications(events: &[Event]) -> Vec<Notification> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Notification(n) => Some(n.clone()),
            _ => None,
        })
        .collect()
}

/// Percentages of the progress events among `events`, in order
pub(crate) fn progress_percentages(events: &[Event]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Progress { percentage, .. } => Some(*percentage),
            _ => None,
        })
        .collect()
}

/// Read back `(name, content)` of every entry of a ZIP blob
pub(crate) fn zip_entries(blob: &Blob) -> Vec<(String, Vec<u8>)> {
    let mut zip = zip::ZipArchive::new(Cursor::new(&blob.data)).unwrap();
    (0..zip.len())
        .map(|i| {
            let mut entry = zip.by_index(i).unwrap();
            let mut content = Vec::new();
            entry.read_to_end(&mut content).unwrap();
            (entry.name().to_string(), content)
        })
        .collect()
}
