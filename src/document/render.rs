//! Placeholder document images.
//!
//! A 200x150 card in the document type's color with a white inset carrying
//! the label, the applicant's NISN and name, a test tag and the render date.

use std::path::Path;

use chrono::{Local, NaiveDate};
use image::{Rgb, RgbImage};
use thiserror::Error;

use super::catalog::DocumentStyle;
use super::encode::{EncodeError, EncodedJpeg, QualitySearch};
use super::font::{FontChain, FontFile, Typeface};

pub const CANVAS_WIDTH: u32 = 200;
pub const CANVAS_HEIGHT: u32 = 150;
pub const INSET_MARGIN: u32 = 10;
pub const BORDER_WIDTH: u32 = 2;
pub const NAME_DISPLAY_LIMIT: usize = 20;
pub const TEST_TAG: &str = "[DOKUMEN TEST]";
pub const DEFAULT_TARGET_KB: u32 = 2;

const LABEL_SIZE: f32 = 16.0;
const DETAIL_SIZE: f32 = 10.0;
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const MUTED: Rgb<u8> = Rgb([150, 150, 150]);

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode placeholder JPEG: {0}")]
    Encode(#[from] EncodeError),
}

/// Renders placeholder JPEGs. The typeface is resolved once at construction.
#[derive(Debug)]
pub struct PlaceholderRenderer {
    typeface: Typeface,
    search: QualitySearch,
}

impl PlaceholderRenderer {
    pub fn new(fonts: &FontChain) -> Self {
        Self {
            typeface: fonts.resolve(),
            search: QualitySearch::default(),
        }
    }

    /// Platform fonts, preceded by `font_path` when one is configured.
    pub fn with_font_override(font_path: Option<&Path>) -> Self {
        let mut fonts = FontChain::platform_default();
        if let Some(path) = font_path {
            fonts = fonts.prefer(FontFile::new(path));
        }
        Self::new(&fonts)
    }

    /// JPEG bytes for `file_type`, dated today, aimed at `target_kb` kilobytes.
    pub fn render(
        &self,
        file_type: &str,
        nisn: &str,
        nama: &str,
        target_kb: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let today = Local::now().date_naive();
        self.render_on(file_type, nisn, nama, target_kb, today)
            .map(|encoded| encoded.bytes)
    }

    pub fn render_on(
        &self,
        file_type: &str,
        nisn: &str,
        nama: &str,
        target_kb: u32,
        date: NaiveDate,
    ) -> Result<EncodedJpeg, RenderError> {
        let canvas = self.draw(file_type, nisn, nama, date);
        let target_bytes = target_kb as usize * 1024;
        let encoded = self.search.encode(&canvas, target_bytes)?;
        log::debug!(
            "Rendered {} placeholder for {}: {} bytes at quality {}",
            file_type,
            nisn,
            encoded.bytes.len(),
            encoded.quality
        );
        Ok(encoded)
    }

    /// The uncompressed card.
    pub fn draw(&self, file_type: &str, nisn: &str, nama: &str, date: NaiveDate) -> RgbImage {
        let style = DocumentStyle::for_type(file_type);
        let mut canvas = RgbImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, style.color);

        draw_inset(&mut canvas, style.color);

        let center_x = (CANVAS_WIDTH / 2) as i32;
        let lines = [
            (style.label.clone(), 30, LABEL_SIZE, style.color),
            (format!("NISN: {}", nisn), 60, DETAIL_SIZE, style.color),
            (display_name(nama), 80, DETAIL_SIZE, style.color),
            (TEST_TAG.to_string(), 110, DETAIL_SIZE, MUTED),
            (date.format("%Y-%m-%d").to_string(), 130, DETAIL_SIZE, MUTED),
        ];
        for (text, y, size, color) in lines {
            self.typeface
                .draw_centered(&mut canvas, &text, (center_x, y), size, color);
        }

        canvas
    }
}

/// White rectangle with a border in `border`, inclusive of its edges.
fn draw_inset(canvas: &mut RgbImage, border: Rgb<u8>) {
    let left = INSET_MARGIN;
    let top = INSET_MARGIN;
    let right = CANVAS_WIDTH - INSET_MARGIN;
    let bottom = CANVAS_HEIGHT - INSET_MARGIN;

    for y in top..=bottom {
        for x in left..=right {
            let on_border = x < left + BORDER_WIDTH
                || x > right - BORDER_WIDTH
                || y < top + BORDER_WIDTH
                || y > bottom - BORDER_WIDTH;
            canvas.put_pixel(x, y, if on_border { border } else { WHITE });
        }
    }
}

/// Names longer than the limit are cut and end with an ellipsis.
pub fn display_name(nama: &str) -> String {
    if nama.chars().count() > NAME_DISPLAY_LIMIT {
        let cut: String = nama.chars().take(NAME_DISPLAY_LIMIT).collect();
        format!("{}...", cut)
    } else {
        nama.to_string()
    }
}
