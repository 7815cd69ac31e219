//! Token-protected reset of the seeded data: empties the bucket, then calls
//! the `admin_wipe_db` database function.

pub mod handlers;

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

use crate::db::{AppState, DbError};
use crate::storage::{ObjectStorage, StorageError};

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";
pub const LIST_LIMIT: usize = 1000;
pub const REMOVE_BATCH_SIZE: usize = 100;
pub const WIPE_FUNCTION: &str = "admin_wipe_db";

#[derive(Debug, Error)]
pub enum WipeError {
    #[error("Storage list failed at \"{prefix}\": {source}")]
    List {
        prefix: String,
        #[source]
        source: StorageError,
    },
    #[error("Storage remove failed: {0}")]
    Remove(#[source] StorageError),
    #[error("Database wipe failed: {0}")]
    Database(#[from] DbError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WipeStorageSummary {
    pub bucket: String,
    #[serde(rename = "deletedFiles")]
    pub deleted_files: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WipeDbSummary {
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WipeResponse {
    pub ok: bool,
    pub storage: WipeStorageSummary,
    pub db: WipeDbSummary,
}

/// Both tokens must be present and equal.
pub fn token_matches(expected: Option<&str>, provided: Option<&str>) -> bool {
    match (expected, provided) {
        (Some(expected), Some(provided)) => !expected.is_empty() && expected == provided,
        _ => false,
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}

/// Every file path in the bucket, descending into folders.
pub async fn list_all_files(
    storage: &(dyn ObjectStorage + Send + Sync),
) -> Result<Vec<String>, WipeError> {
    let mut files = Vec::new();
    let mut pending = vec![String::new()];

    while let Some(prefix) = pending.pop() {
        let mut offset = 0;
        loop {
            let page = storage
                .list_folder_contents(&prefix, LIST_LIMIT, offset)
                .await
                .map_err(|source| WipeError::List {
                    prefix: if prefix.is_empty() { "/".to_string() } else { prefix.clone() },
                    source,
                })?;

            for item in &page {
                let path = join_path(&prefix, &item.name);
                if item.is_file {
                    files.push(path);
                } else {
                    pending.push(path);
                }
            }

            if page.len() < LIST_LIMIT {
                break;
            }
            offset += LIST_LIMIT;
        }
    }

    Ok(files)
}

/// Deletes `paths` in chunks of [`REMOVE_BATCH_SIZE`], returning the count removed.
pub async fn remove_in_batches(
    storage: &(dyn ObjectStorage + Send + Sync),
    paths: &[String],
) -> Result<usize, WipeError> {
    let mut deleted = 0;
    for batch in paths.chunks(REMOVE_BATCH_SIZE) {
        deleted += storage
            .delete_files(batch)
            .await
            .map_err(WipeError::Remove)?;
        log::debug!("Removed batch of {} files", batch.len());
    }
    Ok(deleted)
}

pub async fn wipe(state: &AppState) -> Result<WipeResponse, WipeError> {
    let storage = state.storage.as_ref();
    let files = list_all_files(storage).await?;
    log::info!(
        "Wiping {} files from bucket '{}'",
        files.len(),
        storage.bucket_name()
    );
    let deleted_files = remove_in_batches(storage, &files).await?;

    state.records.rpc(WIPE_FUNCTION, json!({})).await?;
    log::info!("Called {}; wipe complete", WIPE_FUNCTION);

    Ok(WipeResponse {
        ok: true,
        storage: WipeStorageSummary {
            bucket: storage.bucket_name().to_string(),
            deleted_files,
        },
        db: WipeDbSummary { truncated: true },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_matches() {
        assert!(token_matches(Some("s3cret"), Some("s3cret")));
        assert!(!token_matches(Some("s3cret"), Some("guess")));
        assert!(!token_matches(Some("s3cret"), None));
        assert!(!token_matches(None, Some("s3cret")));
        assert!(!token_matches(None, None));
        assert!(!token_matches(Some(""), Some("")));
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "1234567890"), "1234567890");
        assert_eq!(join_path("1234567890", "foto.jpg"), "1234567890/foto.jpg");
    }

    #[test]
    fn test_response_shape() {
        let response = WipeResponse {
            ok: true,
            storage: WipeStorageSummary {
                bucket: "pendaftar-files".to_string(),
                deleted_files: 12,
            },
            db: WipeDbSummary { truncated: true },
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "ok": true,
                "storage": {"bucket": "pendaftar-files", "deletedFiles": 12},
                "db": {"truncated": true}
            })
        );
    }
}
