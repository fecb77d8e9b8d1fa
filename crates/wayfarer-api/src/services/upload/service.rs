//! Upload router service.
//!
//! One request flows through extract → validate → store. Validation happens
//! strictly before the first disk write, so a rejected file never leaves
//! bytes behind. Each write is deadline-bounded (see [`super::deadline`]).
//!
//! Per-request state machine:
//! `Received → Validating → {Rejected | Writing → {TimedOut | Stored}}`.
//! There are no retries at this layer; resubmitting is the caller's call.

use super::deadline::store_with_deadline;
use super::policy::UploadKind;
use super::types::{MultipartPayload, PendingFile};
use crate::state::AppState;
use axum::extract::Multipart;
use std::sync::Arc;
use wayfarer_core::{AppError, UploadValidationError};
use wayfarer_storage::StoredFile;

/// Classifies multipart requests by declared field name and drives the
/// storage allocator for every accepted file.
pub struct UploadService {
    state: Arc<AppState>,
}

impl UploadService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Complete pipeline: extract the declared field's files, validate them
    /// against the category policy, then write them all.
    ///
    /// Returns the stored descriptors plus any plain text fields that
    /// accompanied the files. Zero files is not an error here; whether an
    /// upload is mandatory is the handler's contract.
    pub async fn upload(
        &self,
        kind: UploadKind,
        multipart: Multipart,
    ) -> Result<(Vec<StoredFile>, MultipartPayload), AppError> {
        let mut payload = self.extract(kind, multipart).await?;
        self.validate(kind, &payload)?;

        let policy = self.state.uploads.policies.for_kind(kind);
        let mut stored = Vec::with_capacity(payload.files.len());
        for file in payload.files.drain(..) {
            stored.push(
                store_with_deadline(
                    self.state.uploads.storage.clone(),
                    kind.category(),
                    file,
                    policy.timeout,
                    kind.timeout_message(),
                )
                .await?,
            );
        }

        if !stored.is_empty() {
            tracing::info!(
                field = kind.field_name(),
                count = stored.len(),
                "Files uploaded successfully"
            );
        }

        Ok((stored, payload))
    }

    /// Pull files and text fields out of the multipart body.
    ///
    /// Only the declared field name may carry files; a file under any other
    /// field is rejected outright, matching the single-field upload contract.
    async fn extract(
        &self,
        kind: UploadKind,
        mut multipart: Multipart,
    ) -> Result<MultipartPayload, AppError> {
        let policy = self.state.uploads.policies.for_kind(kind);
        let mut payload = MultipartPayload::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
        {
            let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();
            let file_name = field.file_name().map(|s| s.to_string());

            match file_name {
                Some(original_name) => {
                    if field_name != kind.field_name() {
                        return Err(AppError::InvalidInput(format!(
                            "Unexpected file field '{}', expected '{}'",
                            field_name,
                            kind.field_name()
                        )));
                    }

                    let content_type = field
                        .content_type()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "application/octet-stream".to_string());

                    let data = field.bytes().await.map_err(|e| {
                        AppError::InvalidInput(format!("Failed to read file data: {}", e))
                    })?;

                    payload.files.push(PendingFile {
                        original_name,
                        content_type,
                        data: data.to_vec(),
                    });

                    if payload.files.len() > policy.max_file_count {
                        return Err(UploadValidationError::TooManyFiles {
                            count: payload.files.len(),
                            max: policy.max_file_count,
                        }
                        .into());
                    }
                }
                None => {
                    let value = field.text().await.map_err(|e| {
                        AppError::InvalidInput(format!("Failed to read field '{}': {}", field_name, e))
                    })?;
                    if value.len() > policy.max_field_size_bytes {
                        return Err(AppError::PayloadTooLarge(format!(
                            "Field '{}' exceeds the {} byte limit",
                            field_name, policy.max_field_size_bytes
                        )));
                    }
                    payload.fields.insert(field_name, value);
                }
            }
        }

        Ok(payload)
    }

    /// Run the category policy over every pending file. No disk writes have
    /// happened yet when this rejects.
    fn validate(&self, kind: UploadKind, payload: &MultipartPayload) -> Result<(), AppError> {
        let validator = self.state.uploads.policies.for_kind(kind).validator();
        for file in &payload.files {
            validator.validate_all(&file.original_name, &file.content_type, file.data.len())?;
        }
        Ok(())
    }
}
