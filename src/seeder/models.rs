use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{SeedReport, DEFAULT_SEED_COUNT};

pub const READY_MESSAGE: &str = "Seeder API is ready. Send POST request to trigger.";

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SeedRequest {
    /// Number of records to create, 1 to 500. Defaults to 10.
    #[schema(example = 10)]
    pub count: Option<i64>,
    /// Upload placeholder documents for each record. Defaults to true.
    #[serde(rename = "withFiles")]
    pub with_files: Option<bool>,
}

impl SeedRequest {
    pub fn count_or_default(&self) -> i64 {
        self.count.unwrap_or(DEFAULT_SEED_COUNT as i64)
    }

    pub fn with_files_or_default(&self) -> bool {
        self.with_files.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SeedResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub logs: Vec<String>,
}

impl SeedResponse {
    pub fn failed(error: impl Into<String>, logs: Vec<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            logs,
        }
    }
}

impl From<SeedReport> for SeedResponse {
    fn from(report: SeedReport) -> Self {
        Self {
            success: true,
            error: None,
            logs: report.logs,
        }
    }
}
