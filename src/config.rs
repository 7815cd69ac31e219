//! Environment-driven configuration shared by the CLI and the HTTP server.

use std::path::PathBuf;

use thiserror::Error;

use crate::storage::{SupabaseConfig, DEFAULT_BUCKET};

pub const DEFAULT_TABLE: &str = "pendaftar";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

const URL_VARS: [&str; 2] = ["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"];
const KEY_VARS: [&str; 2] = ["SUPABASE_SERVICE_KEY", "SUPABASE_SERVICE_ROLE_KEY"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing Supabase credentials: set {0}")]
    MissingVar(String),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct SeederConfig {
    pub supabase: SupabaseConfig,
    pub table_name: String,
    pub admin_wipe_token: Option<String>,
    pub font_path: Option<PathBuf>,
    pub host: String,
    pub port: u16,
}

impl SeederConfig {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let first_of = |names: &[&str]| names.iter().find_map(|name| non_empty(*name));

        let supabase_url =
            first_of(&URL_VARS).ok_or_else(|| ConfigError::MissingVar(URL_VARS.join(" or ")))?;
        let service_key =
            first_of(&KEY_VARS).ok_or_else(|| ConfigError::MissingVar(KEY_VARS.join(" or ")))?;

        let port = match non_empty("SEEDER_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "SEEDER_PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            supabase: SupabaseConfig {
                supabase_url,
                service_key,
                bucket_name: non_empty("SUPABASE_STORAGE_BUCKET")
                    .unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            },
            table_name: non_empty("PENDAFTAR_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            admin_wipe_token: non_empty("ADMIN_WIPE_TOKEN"),
            font_path: non_empty("PLACEHOLDER_FONT").map(PathBuf::from),
            host: non_empty("SEEDER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }
}
