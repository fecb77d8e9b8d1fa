//! File upload pipeline: policy selection, multipart routing, and
//! deadline-bounded storage writes.

pub mod deadline;
pub mod policy;
pub mod service;
pub mod types;

pub use policy::{UploadKind, UploadPolicies, UploadPolicy};
pub use service::UploadService;
pub use types::{MultipartPayload, PendingFile};
