//! Upload validation.
//!
//! Policy checks applied to an incoming file before anything touches disk.
//! Extension and MIME prefix are AND-combined: an extension check alone is
//! spoofable and a MIME check alone is insufficient, so both must pass.

use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum UploadValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Invalid content type: {content_type} (allowed prefixes: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Too many files: {count} (max: {max})")]
    TooManyFiles { count: usize, max: usize },

    #[error("Empty file")]
    EmptyFile,
}

/// Upload file validator
///
/// Holds the allow-lists and size limit of one upload category and checks
/// incoming files against them, without coupling to storage details.
pub struct UploadValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
    allowed_mime_prefixes: Vec<String>,
}

impl UploadValidator {
    pub fn new(
        max_file_size: usize,
        allowed_extensions: Vec<String>,
        allowed_mime_prefixes: Vec<String>,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
            allowed_mime_prefixes,
        }
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), UploadValidationError> {
        if size == 0 {
            return Err(UploadValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(UploadValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate file extension
    pub fn validate_extension(&self, filename: &str) -> Result<(), UploadValidationError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| UploadValidationError::InvalidFilename(filename.to_string()))?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(UploadValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(())
    }

    /// Validate content type against the allowed MIME prefixes.
    /// Parameters are stripped first ("image/jpeg; charset=utf-8" -> "image/jpeg").
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), UploadValidationError> {
        let normalized = content_type
            .split(';')
            .next()
            .map(|s| s.trim())
            .unwrap_or(content_type)
            .to_lowercase();

        if !self
            .allowed_mime_prefixes
            .iter()
            .any(|prefix| normalized.starts_with(prefix.as_str()))
        {
            return Err(UploadValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_mime_prefixes.clone(),
            });
        }

        Ok(())
    }

    /// Validate every aspect of a file. Extension and MIME type must both
    /// pass for the file to be accepted.
    pub fn validate_all(
        &self,
        filename: &str,
        content_type: &str,
        file_size: usize,
    ) -> Result<(), UploadValidationError> {
        self.validate_file_size(file_size)?;
        self.validate_extension(filename)?;
        self.validate_content_type(content_type)?;
        Ok(())
    }
}
