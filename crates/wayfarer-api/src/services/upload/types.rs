//! Upload pipeline data types.

use std::collections::HashMap;

/// A file pulled out of the multipart body, validated but not yet written.
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub original_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Everything extracted from one multipart request: the files under the
/// expected field plus any plain text fields that accompanied them.
#[derive(Debug, Default)]
pub struct MultipartPayload {
    pub files: Vec<PendingFile>,
    pub fields: HashMap<String, String>,
}
