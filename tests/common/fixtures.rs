//! Backend payload fixtures

use base64::Engine;
use serde_json::{Value, json};

/// Content of the small text attachment used across tests
pub const NOTES_CONTENT: &str = "Quarterly notes\nline two\n";

/// Content of the fake PDF attachment used across tests
pub const INVOICE_CONTENT: &[u8] = b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n1 0 obj\n<<>>\nendobj\n";

/// One file object as the backend returns it
pub fn file_json(file_name: &str, content: &[u8], record_name: &str) -> Value {
    json!({
        "fileName": file_name,
        "body": base64::engine::general_purpose::STANDARD.encode(content),
        "recordName": record_name,
    })
}

/// The two-attachment payload for a record named `record_name`
pub fn two_file_payload(record_name: &str) -> Value {
    json!([
        file_json("invoice.pdf", INVOICE_CONTENT, record_name),
        file_json("notes.txt", NOTES_CONTENT.as_bytes(), record_name),
    ])
}

/// Request body the source sends for a single record
pub fn request_for(record_id: &str) -> Value {
    json!({ "recordIds": [record_id] })
}
