//! Deadline-bounded storage writes.
//!
//! The write runs as its own task and races a timer. Whichever side finishes
//! first settles the request; the loser's timer is dropped on the spot, so no
//! stale deadline can fire after the response has been sent. The write itself
//! is never cancelled: when the timer wins, a detached reaper awaits the
//! in-flight write and deletes the file if it eventually landed, so a
//! slow-but-successful write does not leak an unreachable orphan.

use super::types::PendingFile;
use std::sync::Arc;
use std::time::Duration;
use wayfarer_core::AppError;
use wayfarer_storage::{Storage, StoredFile, UploadCategory};

pub async fn store_with_deadline(
    storage: Arc<dyn Storage>,
    category: UploadCategory,
    file: PendingFile,
    deadline: Duration,
    timeout_message: &str,
) -> Result<StoredFile, AppError> {
    let write_storage = storage.clone();
    let mut write = tokio::spawn(async move {
        write_storage
            .store(category, &file.original_name, &file.content_type, file.data)
            .await
    });

    match tokio::time::timeout(deadline, &mut write).await {
        Ok(Ok(Ok(stored))) => Ok(stored),
        Ok(Ok(Err(storage_err))) => Err(storage_err.into()),
        Ok(Err(join_err)) => Err(AppError::Internal(format!(
            "Storage write task failed: {}",
            join_err
        ))),
        Err(_elapsed) => {
            tracing::warn!(
                category = %category,
                deadline_ms = deadline.as_millis() as u64,
                "Upload write missed its deadline"
            );
            tokio::spawn(async move {
                match write.await {
                    Ok(Ok(stored)) => {
                        tracing::info!(
                            public_path = %stored.public_path,
                            "Write completed after timeout, reaping orphaned file"
                        );
                        if let Err(e) = storage.delete_by_public_path(&stored.public_path).await {
                            tracing::warn!(
                                error = %e,
                                public_path = %stored.public_path,
                                "Failed to reap orphaned file"
                            );
                        }
                    }
                    Ok(Err(e)) => {
                        tracing::debug!(error = %e, "Timed-out write also failed, nothing to reap");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Timed-out write task panicked");
                    }
                }
            });
            Err(AppError::RequestTimeout(timeout_message.to_string()))
        }
    }
}
