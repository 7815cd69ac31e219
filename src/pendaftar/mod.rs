//! Pendaftar (applicant) records and their synthetic generator.
//!
//! - `models` - the record and its closed option sets
//! - `generator` - seedable record generation
//! - `sampler` - uniform categorical sampling
//! - `locale` - Indonesian name and place vocabularies

pub mod generator;
pub mod locale;
pub mod models;
pub mod sampler;

pub use generator::PendaftarGenerator;
pub use models::Pendaftar;
