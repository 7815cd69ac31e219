//! Supabase Storage client.
//!
//! Only the calls the seeder needs: upload, public URL, list and bulk remove.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

pub const DEFAULT_BUCKET: &str = "pendaftar-files";
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// `{nisn}/{file_type}_{YYYYmmdd_HHMMSS}.jpg`
pub fn document_path(nisn: &str, file_type: &str, uploaded_at: NaiveDateTime) -> String {
    format!(
        "{}/{}_{}.jpg",
        nisn,
        file_type,
        uploaded_at.format("%Y%m%d_%H%M%S")
    )
}

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub supabase_url: String,
    pub service_key: String,
    pub bucket_name: String,
}

impl SupabaseConfig {
    pub fn storage_endpoint(&self) -> String {
        format!("{}/storage/v1", self.supabase_url.trim_end_matches('/'))
    }

    pub fn rest_endpoint(&self) -> String {
        format!("{}/rest/v1", self.supabase_url.trim_end_matches('/'))
    }
}

/// One entry of a bucket listing. Folders have no metadata, hence no size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FolderContent {
    pub name: String,
    pub is_file: bool,
    pub size: Option<u64>,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object already exists: {0}")]
    Duplicate(String),
    #[error("storage request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("storage returned {status}: {message}")]
    Api { status: u16, message: String },
}

#[async_trait]
pub trait ObjectStorage {
    async fn upload_file(
        &self,
        path: &str,
        file_data: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// One page of the entries directly under `prefix`.
    async fn list_folder_contents(
        &self,
        prefix: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<FolderContent>, StorageError>;

    /// Removes `paths`, returning how many objects were deleted.
    async fn delete_files(&self, paths: &[String]) -> Result<usize, StorageError>;

    fn get_public_url(&self, path: &str) -> String;

    fn bucket_name(&self) -> &str;
}

pub struct SupabaseStorage {
    config: SupabaseConfig,
    http_client: reqwest::Client,
}

impl SupabaseStorage {
    pub fn new(config: SupabaseConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/object/{}/{}",
            self.config.storage_endpoint(),
            self.config.bucket_name,
            path.trim_start_matches('/')
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
    }
}

#[derive(Debug, Deserialize)]
struct ListEntry {
    name: String,
    #[serde(default)]
    metadata: Option<serde_json::Value>,
}

impl From<ListEntry> for FolderContent {
    fn from(entry: ListEntry) -> Self {
        let size = entry
            .metadata
            .as_ref()
            .and_then(|metadata| metadata.get("size"))
            .and_then(|size| size.as_u64());
        FolderContent {
            name: entry.name,
            is_file: entry.metadata.map(|m| !m.is_null()).unwrap_or(false),
            size,
        }
    }
}

/// Turns a non-success storage response into a [`StorageError`].
fn classify_failure(status: u16, body: &str, path: &str) -> StorageError {
    let lowered = body.to_lowercase();
    if status == 409 || lowered.contains("duplicate") || lowered.contains("already exists") {
        return StorageError::Duplicate(path.to_string());
    }
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string());
    StorageError::Api { status, message }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload_file(
        &self,
        path: &str,
        file_data: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError> {
        let response = self
            .authorized(self.http_client.post(self.object_url(path)))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(file_data.to_vec())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            log::debug!("Uploaded {} ({} bytes)", path, file_data.len());
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(classify_failure(status.as_u16(), &body, path))
    }

    async fn list_folder_contents(
        &self,
        prefix: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<FolderContent>, StorageError> {
        let url = format!(
            "{}/object/list/{}",
            self.config.storage_endpoint(),
            self.config.bucket_name
        );
        let response = self
            .authorized(self.http_client.post(url))
            .json(&json!({
                "prefix": prefix,
                "limit": limit,
                "offset": offset,
                "sortBy": { "column": "name", "order": "asc" },
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), &body, prefix));
        }
        let entries: Vec<ListEntry> = response.json().await?;
        Ok(entries.into_iter().map(FolderContent::from).collect())
    }

    async fn delete_files(&self, paths: &[String]) -> Result<usize, StorageError> {
        if paths.is_empty() {
            return Ok(0);
        }
        let url = format!(
            "{}/object/{}",
            self.config.storage_endpoint(),
            self.config.bucket_name
        );
        let response = self
            .authorized(self.http_client.delete(url))
            .json(&json!({ "prefixes": paths }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        let removed: Vec<serde_json::Value> = response.json().await?;
        Ok(removed.len())
    }

    fn get_public_url(&self, path: &str) -> String {
        format!(
            "{}/object/public/{}/{}",
            self.config.storage_endpoint(),
            self.config.bucket_name,
            path.trim_start_matches('/')
        )
    }

    fn bucket_name(&self) -> &str {
        &self.config.bucket_name
    }
}
