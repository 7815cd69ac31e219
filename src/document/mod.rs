//! Placeholder document images for the pendaftar upload flow.

pub mod catalog;
pub mod encode;
pub mod font;
pub mod render;

pub use catalog::{DocumentKind, DocumentStyle};
pub use encode::QualitySearch;
pub use font::FontChain;
pub use render::{PlaceholderRenderer, RenderError};
