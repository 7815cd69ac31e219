#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ppdb_seeder::config::SeederConfig;
use ppdb_seeder::db::{DbError, RecordStore};
use ppdb_seeder::document::{FontChain, PlaceholderRenderer};
use ppdb_seeder::storage::{FolderContent, ObjectStorage, StorageError};
use ppdb_seeder::AppState;
use serde_json::Value;

pub const TEST_BUCKET: &str = "pendaftar-files";
pub const TEST_TOKEN: &str = "wipe-me";

/// In-memory record store. Insert calls are numbered from zero.
#[derive(Default)]
pub struct MockRecordStore {
    rows: Mutex<Vec<(String, Value)>>,
    rpc_calls: Mutex<Vec<String>>,
    insert_calls: Mutex<usize>,
    failing_inserts: HashSet<usize>,
    empty_results: bool,
    rpc_fails: bool,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(calls: &[usize]) -> Self {
        Self {
            failing_inserts: calls.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn returning_empty() -> Self {
        Self {
            empty_results: true,
            ..Self::default()
        }
    }

    pub fn with_failing_rpc() -> Self {
        Self {
            rpc_fails: true,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> Vec<(String, Value)> {
        self.rows.lock().unwrap().clone()
    }

    pub fn rpc_calls(&self) -> Vec<String> {
        self.rpc_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>, DbError> {
        let call = {
            let mut calls = self.insert_calls.lock().unwrap();
            let call = *calls;
            *calls += 1;
            call
        };
        if self.failing_inserts.contains(&call) {
            return Err(DbError::Api {
                status: 409,
                message: "duplicate key value violates unique constraint".to_string(),
            });
        }
        if self.empty_results {
            return Ok(Vec::new());
        }
        self.rows
            .lock()
            .unwrap()
            .push((table.to_string(), row.clone()));
        Ok(vec![row])
    }

    async fn rpc(&self, function: &str, _params: Value) -> Result<Value, DbError> {
        self.rpc_calls.lock().unwrap().push(function.to_string());
        if self.rpc_fails {
            return Err(DbError::Api {
                status: 404,
                message: format!("function {} does not exist", function),
            });
        }
        Ok(Value::Null)
    }
}

/// In-memory bucket keyed by object path.
#[derive(Default)]
pub struct MockObjectStorage {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
    delete_batches: Mutex<Vec<usize>>,
    fail_uploads: bool,
    duplicate_uploads: bool,
    fail_listing: bool,
}

impl MockObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_uploads() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn reporting_duplicates() -> Self {
        Self {
            duplicate_uploads: true,
            ..Self::default()
        }
    }

    pub fn failing_listing() -> Self {
        Self {
            fail_listing: true,
            ..Self::default()
        }
    }

    pub fn with_files<I, S>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        {
            let mut files = self.files.lock().unwrap();
            for path in paths {
                files.insert(path.into(), vec![0xFF, 0xD8, 0xFF, 0xD9]);
            }
        }
        self
    }

    pub fn paths(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }

    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn delete_batches(&self) -> Vec<usize> {
        self.delete_batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for MockObjectStorage {
    async fn upload_file(
        &self,
        path: &str,
        file_data: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError> {
        assert_eq!(content_type, "image/jpeg");
        if self.fail_uploads {
            return Err(StorageError::Api {
                status: 403,
                message: "new row violates row-level security policy".to_string(),
            });
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), file_data.to_vec());
        if self.duplicate_uploads {
            return Err(StorageError::Duplicate(path.to_string()));
        }
        Ok(())
    }

    async fn list_folder_contents(
        &self,
        prefix: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<FolderContent>, StorageError> {
        if self.fail_listing {
            return Err(StorageError::Api {
                status: 500,
                message: "listing unavailable".to_string(),
            });
        }
        let files = self.files.lock().unwrap();
        let scope = if prefix.is_empty() {
            String::new()
        } else {
            format!("{}/", prefix)
        };

        let mut folders = BTreeSet::new();
        let mut entries = Vec::new();
        for (path, data) in files.iter() {
            let Some(rest) = path.strip_prefix(&scope) else {
                continue;
            };
            match rest.split_once('/') {
                Some((folder, _)) => {
                    folders.insert(folder.to_string());
                }
                None => entries.push(FolderContent {
                    name: rest.to_string(),
                    is_file: true,
                    size: Some(data.len() as u64),
                }),
            }
        }
        entries.extend(folders.into_iter().map(|name| FolderContent {
            name,
            is_file: false,
            size: None,
        }));
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(entries.into_iter().skip(offset).take(limit).collect())
    }

    async fn delete_files(&self, paths: &[String]) -> Result<usize, StorageError> {
        self.delete_batches.lock().unwrap().push(paths.len());
        let mut files = self.files.lock().unwrap();
        Ok(paths
            .iter()
            .filter(|path| files.remove(path.as_str()).is_some())
            .count())
    }

    fn get_public_url(&self, path: &str) -> String {
        format!(
            "https://test.supabase.co/storage/v1/object/public/{}/{}",
            TEST_BUCKET, path
        )
    }

    fn bucket_name(&self) -> &str {
        TEST_BUCKET
    }
}

pub fn test_config(admin_token: Option<&str>) -> SeederConfig {
    let mut vars = vec![
        ("SUPABASE_URL".to_string(), "https://test.supabase.co".to_string()),
        ("SUPABASE_SERVICE_KEY".to_string(), "service-key".to_string()),
    ];
    if let Some(token) = admin_token {
        vars.push(("ADMIN_WIPE_TOKEN".to_string(), token.to_string()));
    }
    SeederConfig::from_lookup(move |name: &str| {
        vars.iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    })
    .expect("test config is complete")
}

/// AppState over the given mocks, rendering with the built-in bitmap font.
pub fn test_state(
    records: Arc<MockRecordStore>,
    storage: Arc<MockObjectStorage>,
    admin_token: Option<&str>,
) -> AppState {
    AppState::new_with_stores(
        test_config(admin_token),
        records,
        storage,
        Arc::new(PlaceholderRenderer::new(&FontChain::new())),
    )
}
