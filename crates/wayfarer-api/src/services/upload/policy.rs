//! Per-category upload policies.
//!
//! Every multipart field name maps to exactly one [`UploadKind`], and every
//! kind selects one [`UploadPolicy`]. The mapping is explicit so the policy a
//! request runs under is decided once, by declared field name, instead of
//! being scattered across handler branches.

use std::time::Duration;
use wayfarer_core::{Config, UploadValidator};
use wayfarer_storage::UploadCategory;

/// Which upload a request declared, by multipart field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// `image` - single main package image
    PackageImage,
    /// `images` - package gallery, up to the configured count
    PackageGallery,
    /// `profileImage` - single profile image with the stricter size limit
    ProfileImage,
    /// `image` on the posts surface
    PostImage,
}

impl UploadKind {
    /// The multipart field name carrying the file(s).
    pub fn field_name(&self) -> &'static str {
        match self {
            UploadKind::PackageImage => "image",
            UploadKind::PackageGallery => "images",
            UploadKind::ProfileImage => "profileImage",
            UploadKind::PostImage => "image",
        }
    }

    /// Destination category on disk.
    pub fn category(&self) -> UploadCategory {
        match self {
            UploadKind::PackageImage | UploadKind::PackageGallery => UploadCategory::Package,
            UploadKind::ProfileImage => UploadCategory::Profile,
            UploadKind::PostImage => UploadCategory::Post,
        }
    }

    /// Client-facing message when the write misses its deadline.
    pub fn timeout_message(&self) -> &'static str {
        match self {
            UploadKind::PackageGallery => {
                "Images upload timed out. Please try again with smaller images or fewer images."
            }
            UploadKind::ProfileImage => {
                "Profile image upload timed out. Please try again with a smaller image or check your connection."
            }
            UploadKind::PackageImage | UploadKind::PostImage => {
                "Image upload timed out. Please try again with a smaller image or check your connection."
            }
        }
    }
}

/// Limits and allow-lists for one upload category.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size_bytes: usize,
    pub max_field_size_bytes: usize,
    pub max_file_count: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_mime_prefixes: Vec<String>,
    pub timeout: Duration,
}

impl UploadPolicy {
    pub fn validator(&self) -> UploadValidator {
        UploadValidator::new(
            self.max_file_size_bytes,
            self.allowed_extensions.clone(),
            self.allowed_mime_prefixes.clone(),
        )
    }
}

/// The full policy table, selected per request by [`UploadKind`].
#[derive(Debug, Clone)]
pub struct UploadPolicies {
    package_image: UploadPolicy,
    package_gallery: UploadPolicy,
    profile_image: UploadPolicy,
    post_image: UploadPolicy,
}

impl UploadPolicies {
    pub fn from_config(config: &Config) -> Self {
        let single_timeout = Duration::from_secs(config.single_upload_timeout_secs);
        let multi_timeout = Duration::from_secs(config.multi_upload_timeout_secs);

        let base = |max_size: usize, max_count: usize, timeout: Duration| UploadPolicy {
            max_file_size_bytes: max_size,
            max_field_size_bytes: max_size,
            max_file_count: max_count,
            allowed_extensions: config.allowed_image_extensions.clone(),
            allowed_mime_prefixes: config.allowed_image_mime_prefixes.clone(),
            timeout,
        };

        UploadPolicies {
            package_image: base(config.package_max_file_size_bytes, 1, single_timeout),
            package_gallery: base(
                config.package_max_file_size_bytes,
                config.max_gallery_images,
                multi_timeout,
            ),
            profile_image: base(config.profile_max_file_size_bytes, 1, single_timeout),
            post_image: base(config.post_max_file_size_bytes, 1, single_timeout),
        }
    }

    pub fn for_kind(&self, kind: UploadKind) -> &UploadPolicy {
        match kind {
            UploadKind::PackageImage => &self.package_image,
            UploadKind::PackageGallery => &self.package_gallery,
            UploadKind::ProfileImage => &self.profile_image,
            UploadKind::PostImage => &self.post_image,
        }
    }
}
