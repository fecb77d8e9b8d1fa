//! Shared constants.

/// Prefix of every locally-managed public path. A reference that does not
/// start with this prefix is an externally-hosted URL this system does not own.
pub const PUBLIC_UPLOAD_PREFIX: &str = "/uploads";

/// Default page size for admin package listings.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Upper bound on admin page size.
pub const MAX_PAGE_LIMIT: u64 = 100;
