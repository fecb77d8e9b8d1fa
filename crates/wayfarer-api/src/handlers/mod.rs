//! HTTP request handlers.

pub mod package_images;
pub mod packages;
pub mod posts;
pub mod profile;
