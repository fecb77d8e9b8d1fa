//! Wayfarer Storage Library
//!
//! This crate provides the local-disk upload pipeline core: destination
//! allocation, collision-resistant filename assignment, and stale-file
//! reclamation.
//!
//! # Public path format
//!
//! Stored files are exposed as `/uploads/<category-dir>/<assigned_name>`
//! with `<category-dir>` one of `packages`, `profiles`, `posts`. The public
//! path is both the externally served URL and the deletion key. References
//! without the `/uploads` prefix are externally hosted and never deleted.
//!
//! Writes carry no transactional rollback: if a later step of the same
//! request fails, the file stays on disk as an accepted orphan.

pub mod category;
pub mod local;
pub mod naming;
pub mod reclaim;
pub mod traits;

// Re-export commonly used types
pub use category::UploadCategory;
pub use local::LocalStorage;
pub use reclaim::StaleFileReclaimer;
pub use traits::{Storage, StorageError, StorageResult, StoredFile};
