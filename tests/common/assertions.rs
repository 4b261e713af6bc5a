//! Custom test assertions for saved archives and events

use record_zip_dl::{Event, Notification};
use std::io::Read;
use std::path::Path;
use tokio::sync::broadcast;

/// Read back `(name, content)` of every entry of the ZIP at `path`
pub fn read_zip(path: &Path) -> Vec<(String, Vec<u8>)> {
    let file = std::fs::File::open(path).expect("failed to open archive");
    let mut zip = zip::ZipArchive::new(file).expect("not a valid ZIP archive");

    (0..zip.len())
        .map(|i| {
            let mut entry = zip.by_index(i).expect("unreadable entry");
            let mut content = Vec::new();
            entry.read_to_end(&mut content).expect("unreadable content");
            (entry.name().to_string(), content)
        })
        .collect()
}

/// Sorted file names inside `dir`
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("failed to read dir")
        .map(|e| {
            e.expect("bad dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

/// Collect every event already published to `rx`
pub fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Notifications among `events`, in order
pub fn notifications(events: &[Event]) -> Vec<Notification> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Notification(n) => Some(n.clone()),
            _ => None,
        })
        .collect()
}
