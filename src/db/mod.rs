//! Shared application state and the record-store client.

mod pendaftar;

pub use pendaftar::{inserted_rows, DbError, PostgrestStore, RecordStore};

use std::sync::Arc;

use crate::config::SeederConfig;
use crate::document::PlaceholderRenderer;
use crate::storage::{ObjectStorage, SupabaseStorage};

#[derive(Clone)]
pub struct AppState {
    pub config: SeederConfig,
    pub records: Arc<dyn RecordStore + Send + Sync>,
    pub storage: Arc<dyn ObjectStorage + Send + Sync>,
    pub renderer: Arc<PlaceholderRenderer>,
}

impl AppState {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = SeederConfig::from_env()?;
        Self::new_with_config(config).await
    }

    /// Builds the Supabase clients. One HTTP client is shared by every call.
    pub async fn new_with_config(
        config: SeederConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(std::time::Duration::from_secs(900))
            .user_agent("ppdb-seeder/0.2")
            .build()?;

        let records = Arc::new(PostgrestStore::new(&config.supabase));
        let storage = Arc::new(SupabaseStorage::new(
            config.supabase.clone(),
            http_client,
        ));
        let renderer = Arc::new(PlaceholderRenderer::with_font_override(
            config.font_path.as_deref(),
        ));

        log::info!(
            "Seeding into table '{}' and bucket '{}'",
            config.table_name,
            config.supabase.bucket_name
        );

        Ok(Self::new_with_stores(config, records, storage, renderer))
    }

    pub fn new_with_stores(
        config: SeederConfig,
        records: Arc<dyn RecordStore + Send + Sync>,
        storage: Arc<dyn ObjectStorage + Send + Sync>,
        renderer: Arc<PlaceholderRenderer>,
    ) -> Self {
        Self {
            config,
            records,
            storage,
            renderer,
        }
    }
}
