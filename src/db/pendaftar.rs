//! Record-store access through PostgREST.

use async_trait::async_trait;
use postgrest::Postgrest;
use serde_json::Value;
use thiserror::Error;

use crate::storage::SupabaseConfig;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("request to the record store failed: {0}")]
    Transport(String),
    #[error("record store returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("insert returned no rows")]
    EmptyResult,
    #[error("invalid JSON from the record store: {0}")]
    Json(#[from] serde_json::Error),
}

#[async_trait]
pub trait RecordStore {
    /// Inserts one row and returns the stored representation.
    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>, DbError>;

    /// Calls a database function.
    async fn rpc(&self, function: &str, params: Value) -> Result<Value, DbError>;
}

pub struct PostgrestStore {
    client: Postgrest,
    service_key: String,
}

impl PostgrestStore {
    pub fn new(config: &SupabaseConfig) -> Self {
        let client =
            Postgrest::new(config.rest_endpoint()).insert_header("apikey", &config.service_key);
        Self {
            client,
            service_key: config.service_key.clone(),
        }
    }
}

/// Reads a PostgREST reply; error bodies carry a `message` field.
fn parse_reply(status: u16, body: &str) -> Result<Value, DbError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| value.get("message").and_then(Value::as_str).map(String::from))
            .unwrap_or_else(|| body.to_string());
        return Err(DbError::Api { status, message });
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(body)?)
}

/// Rows from an insert reply; an empty array means nothing was stored.
pub fn inserted_rows(reply: Value) -> Result<Vec<Value>, DbError> {
    let rows = match reply {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        row => vec![row],
    };
    if rows.is_empty() {
        return Err(DbError::EmptyResult);
    }
    Ok(rows)
}

#[async_trait]
impl RecordStore for PostgrestStore {
    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>, DbError> {
        let response = self
            .client
            .from(table)
            .auth(&self.service_key)
            .insert(row.to_string())
            .execute()
            .await
            .map_err(|e| DbError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DbError::Transport(e.to_string()))?;
        inserted_rows(parse_reply(status, &body)?)
    }

    async fn rpc(&self, function: &str, params: Value) -> Result<Value, DbError> {
        let response = self
            .client
            .rpc(function, params.to_string())
            .auth(&self.service_key)
            .execute()
            .await
            .map_err(|e| DbError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DbError::Transport(e.to_string()))?;
        log::debug!("rpc {} returned {}", function, status);
        parse_reply(status, &body)
    }
}
