//! The seeding loop: generate, insert, then render and upload documents.
//!
//! Everything runs sequentially. A failed insert is counted and skipped; a
//! failed render or upload only costs that one file.

pub mod handlers;
pub mod models;

use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::db::{AppState, DbError};
use crate::document::{DocumentKind, RenderError};
use crate::pendaftar::sampler::OptionSet;
use crate::pendaftar::{Pendaftar, PendaftarGenerator};
use crate::storage::{document_path, StorageError, JPEG_CONTENT_TYPE};

pub const DEFAULT_SEED_COUNT: u32 = 10;
pub const MAX_SEED_COUNT: u32 = 500;
pub const BPJS_CHANCE: f64 = 0.5;

const LOG_ERROR_CHARS: usize = 80;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("count must be between 0 and {max}, got {count}")]
    InvalidCount { count: i64, max: u32 },
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub count: u32,
    pub with_files: bool,
    /// Gives each record a coin flip for the optional BPJS card.
    pub include_bpjs: bool,
    pub seed: Option<u64>,
    pub target_kb: u32,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            count: DEFAULT_SEED_COUNT,
            with_files: true,
            include_bpjs: true,
            seed: None,
            target_kb: crate::document::render::DEFAULT_TARGET_KB,
        }
    }
}

impl SeedOptions {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Checks a requested record count against `0..=MAX_SEED_COUNT`. Zero is an
/// empty run.
pub fn validate_count(count: i64) -> Result<u32, SeedError> {
    if (0..=MAX_SEED_COUNT as i64).contains(&count) {
        Ok(count as u32)
    } else {
        Err(SeedError::InvalidCount {
            count,
            max: MAX_SEED_COUNT,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub success_count: usize,
    pub error_count: usize,
    pub files_uploaded: usize,
    pub logs: Vec<String>,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.success_count + self.error_count
    }

    fn info(&mut self, line: String) {
        log::info!("{}", line);
        self.logs.push(line);
    }

    fn warn(&mut self, line: String) {
        log::warn!("{}", line);
        self.logs.push(line);
    }

    fn error(&mut self, line: String) {
        log::error!("{}", line);
        self.logs.push(line);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    pub kind: DocumentKind,
    pub public_url: String,
}

/// Required documents plus, when allowed, BPJS on a coin flip.
pub fn upload_plan<R: Rng + ?Sized>(rng: &mut R, include_bpjs: bool) -> Vec<DocumentKind> {
    let mut kinds = DocumentKind::REQUIRED.to_vec();
    if include_bpjs && rng.gen_bool(BPJS_CHANCE) {
        kinds.push(DocumentKind::Bpjs);
    }
    kinds
}

/// What a dry run shows: one record and every document type that may be uploaded.
#[derive(Debug, Clone)]
pub struct DryRunPreview {
    pub record: Pendaftar,
    pub documents: Vec<DocumentKind>,
}

pub fn preview<R: Rng + ?Sized>(generator: &PendaftarGenerator, rng: &mut R) -> DryRunPreview {
    DryRunPreview {
        record: generator.generate(rng),
        documents: DocumentKind::ALL.to_vec(),
    }
}

fn clip(message: &str, limit: usize) -> String {
    if message.chars().count() > limit {
        message.chars().take(limit).collect()
    } else {
        message.to_string()
    }
}

pub struct Seeder<'a> {
    state: &'a AppState,
    generator: PendaftarGenerator,
}

impl<'a> Seeder<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            state,
            generator: PendaftarGenerator::new(),
        }
    }

    pub async fn run(&self, options: &SeedOptions) -> SeedReport {
        let mut rng = options.rng();
        let mut report = SeedReport::default();
        let count = options.count;

        report.info(format!(
            "Seeding {} pendaftar records into '{}'",
            count, self.state.config.table_name
        ));
        report.info(format!(
            "File upload: {}",
            if options.with_files { "enabled" } else { "disabled" }
        ));

        for i in 0..count {
            let position = format!("[{}/{}]", i + 1, count);
            let record = self.generator.generate(&mut rng);

            if let Err(e) = self.insert(&record).await {
                report.error_count += 1;
                report.error(format!(
                    "{} Failed to insert: {}",
                    position,
                    clip(&e.to_string(), LOG_ERROR_CHARS)
                ));
                continue;
            }

            report.success_count += 1;
            report.info(format!(
                "{} {} (NISN: {}) created",
                position, record.nama_lengkap, record.nisn
            ));

            if options.with_files {
                let kinds = upload_plan(&mut rng, options.include_bpjs);
                let uploaded = self
                    .upload_documents(&record, &kinds, options.target_kb, &mut report)
                    .await;
                report.files_uploaded += uploaded.len();
                let names: Vec<&str> = uploaded.iter().map(|doc| doc.kind.key()).collect();
                report.info(format!("    Uploaded: {}", names.join(", ")));
                for document in &uploaded {
                    report.info(format!(
                        "      {}: {}",
                        document.kind.key(),
                        document.public_url
                    ));
                }
            }
        }

        report.info(format!(
            "Finished! Success: {}/{}, failed: {}, files uploaded: {}",
            report.success_count, count, report.error_count, report.files_uploaded
        ));
        report
    }

    async fn insert(&self, record: &Pendaftar) -> Result<(), DbError> {
        let row = serde_json::to_value(record)?;
        let rows = self
            .state
            .records
            .insert(&self.state.config.table_name, row)
            .await?;
        if rows.is_empty() {
            return Err(DbError::EmptyResult);
        }
        Ok(())
    }

    /// Renders and uploads each kind for `record`; failures are logged and skipped.
    pub async fn upload_documents(
        &self,
        record: &Pendaftar,
        kinds: &[DocumentKind],
        target_kb: u32,
        report: &mut SeedReport,
    ) -> Vec<UploadedDocument> {
        let mut uploaded = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            match self.upload_document(record, kind, target_kb).await {
                Ok(document) => uploaded.push(document),
                Err(e) => report.warn(format!(
                    "    Failed to upload {}: {}",
                    kind.key(),
                    clip(&e.to_string(), LOG_ERROR_CHARS)
                )),
            }
        }
        uploaded
    }

    async fn upload_document(
        &self,
        record: &Pendaftar,
        kind: DocumentKind,
        target_kb: u32,
    ) -> Result<UploadedDocument, DocumentError> {
        let bytes =
            self.state
                .renderer
                .render(kind.key(), &record.nisn, &record.nama_lengkap, target_kb)?;
        let path = document_path(&record.nisn, kind.key(), Local::now().naive_local());

        match self
            .state
            .storage
            .upload_file(&path, &bytes, JPEG_CONTENT_TYPE)
            .await
        {
            Ok(()) => {}
            Err(StorageError::Duplicate(_)) => {
                log::debug!("{} already exists, reusing it", path);
            }
            Err(e) => return Err(e.into()),
        }

        Ok(UploadedDocument {
            kind,
            public_url: self.state.storage.get_public_url(&path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_count_bounds() {
        assert_eq!(validate_count(0), Ok(0));
        assert_eq!(validate_count(1), Ok(1));
        assert_eq!(validate_count(500), Ok(500));
        assert_eq!(
            validate_count(-1),
            Err(SeedError::InvalidCount { count: -1, max: 500 })
        );
        assert!(validate_count(-3).is_err());
        assert!(validate_count(501).is_err());
    }

    #[test]
    fn test_upload_plan_without_bpjs() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert_eq!(upload_plan(&mut rng, false), DocumentKind::REQUIRED.to_vec());
        }
    }

    #[test]
    fn test_upload_plan_sometimes_adds_bpjs() {
        let mut rng = StdRng::seed_from_u64(7);
        let plans: Vec<_> = (0..200).map(|_| upload_plan(&mut rng, true)).collect();

        assert!(plans.iter().all(|plan| plan.len() == 4 || plan.len() == 5));
        assert!(plans.iter().any(|plan| plan.len() == 5));
        assert!(plans.iter().any(|plan| plan.len() == 4));
        for plan in plans.iter().filter(|plan| plan.len() == 5) {
            assert_eq!(plan[4], DocumentKind::Bpjs);
        }
    }

    #[test]
    fn test_preview_lists_every_document() {
        let mut rng = StdRng::seed_from_u64(3);
        let preview = preview(&PendaftarGenerator::new(), &mut rng);
        assert_eq!(preview.documents.len(), 5);
        assert_eq!(preview.record.nisn.len(), 10);
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("short", 80), "short");
        assert_eq!(clip(&"x".repeat(100), 80).len(), 80);
    }

    #[test]
    fn test_seeded_options_are_reproducible() {
        let options = SeedOptions {
            seed: Some(42),
            ..SeedOptions::default()
        };
        let a: u64 = options.rng().gen();
        let b: u64 = options.rng().gen();
        assert_eq!(a, b);
    }
}
