//! Event publishing and user-visible error notifications

use crate::error::Error;
use crate::types::{Event, Notification};
use tokio::sync::broadcast;

/// Title used when the archive or save capability cannot be loaded
pub const LOAD_ERROR_TITLE: &str = "Error loading libraries";

/// Title used when fetching one record's files fails (absorbed)
pub const RECORD_FETCH_ERROR_TITLE: &str = "Error fetching files for record";

/// Title used when generating or saving a record's archive fails
pub const ZIP_ERROR_TITLE: &str = "Error generating ZIP file";

/// Title used for any failure that stops a batch
///
/// Reused for every aborting failure, not only fetch failures.
pub const BATCH_ERROR_TITLE: &str = "Error fetching files";

/// Fire-and-forget publisher over the event broadcast channel
#[derive(Clone, Debug)]
pub struct EventSink {
    tx: broadcast::Sender<Event>,
}

impl EventSink {
    /// Create a sink with a fresh channel of the given capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to every event published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    /// Publish an event; having no subscribers is not an error
    pub fn emit(&self, event: Event) {
        self.tx.send(event).ok();
    }

    /// Publish an error notification built from `error`
    pub fn show_error(&self, title: &str, error: &Error) {
        let message = error.notification_message();
        tracing::debug!(title, message = %message, code = error.error_code(), "error notification");
        self.emit(Event::Notification(Notification::error(title, message)));
    }
}
