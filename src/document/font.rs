//! Font lookup for placeholder text.
//!
//! Candidates are tried in order and any failure moves on to the next one.
//! The chain always ends in [`Typeface::Bitmap`], a 5x7 pixel font compiled
//! into the binary, so resolving a typeface never fails.

use std::fmt;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use rusttype::{point, Font, Scale};
use thiserror::Error;

pub const HELVETICA_PATH: &str = "/System/Library/Fonts/Helvetica.ttc";
pub const DEJAVU_SANS_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

const GLYPH_WIDTH: i32 = 5;
const GLYPH_HEIGHT: i32 = 7;
const GLYPH_SPACING: i32 = 1;
/// Requested pixel size per bitmap scale step; sizes under 18 draw at scale 1.
const BITMAP_CELL_SIZE: f32 = 12.0;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} is not a usable font")]
    Parse(PathBuf),
}

/// One entry in the font fallback chain.
pub trait FontCandidate: Send + Sync {
    fn describe(&self) -> String;
    fn load(&self) -> Result<Typeface, FontError>;
}

/// A TrueType/OpenType file on disk. Collections load their first face.
pub struct FontFile {
    path: PathBuf,
}

impl FontFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl FontCandidate for FontFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Typeface, FontError> {
        let data = std::fs::read(&self.path).map_err(|source| FontError::Io {
            path: self.path.clone(),
            source,
        })?;
        Font::try_from_vec(data)
            .map(Typeface::Outline)
            .ok_or_else(|| FontError::Parse(self.path.clone()))
    }
}

/// Ordered list of font candidates.
#[derive(Default)]
pub struct FontChain {
    candidates: Vec<Box<dyn FontCandidate>>,
}

impl FontChain {
    /// A chain with no candidates; resolves straight to the bitmap font.
    pub fn new() -> Self {
        Self::default()
    }

    /// Helvetica on macOS, then DejaVu Sans on Linux.
    pub fn platform_default() -> Self {
        Self::new()
            .with_candidate(FontFile::new(HELVETICA_PATH))
            .with_candidate(FontFile::new(DEJAVU_SANS_PATH))
    }

    pub fn with_candidate(mut self, candidate: impl FontCandidate + 'static) -> Self {
        self.candidates.push(Box::new(candidate));
        self
    }

    /// Try `candidate` before everything already in the chain.
    pub fn prefer(mut self, candidate: impl FontCandidate + 'static) -> Self {
        self.candidates.insert(0, Box::new(candidate));
        self
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn resolve(&self) -> Typeface {
        for candidate in &self.candidates {
            match candidate.load() {
                Ok(typeface) => {
                    log::debug!("Using font {}", candidate.describe());
                    return typeface;
                }
                Err(e) => log::debug!("Skipping font candidate: {}", e),
            }
        }
        log::debug!("No font file usable, falling back to built-in bitmap font");
        Typeface::Bitmap
    }
}

pub enum Typeface {
    Outline(Font<'static>),
    Bitmap,
}

impl fmt::Debug for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Typeface::Outline(_) => f.write_str("Typeface::Outline"),
            Typeface::Bitmap => f.write_str("Typeface::Bitmap"),
        }
    }
}

impl Typeface {
    pub fn is_builtin(&self) -> bool {
        matches!(self, Typeface::Bitmap)
    }

    /// Draw `text` centered (horizontally and vertically) on `center`.
    pub fn draw_centered(
        &self,
        canvas: &mut RgbImage,
        text: &str,
        center: (i32, i32),
        size: f32,
        color: Rgb<u8>,
    ) {
        match self {
            Typeface::Outline(font) => draw_outline(canvas, font, text, center, size, color),
            Typeface::Bitmap => draw_bitmap(canvas, text, center, size, color),
        }
    }
}

fn draw_outline(
    canvas: &mut RgbImage,
    font: &Font<'static>,
    text: &str,
    center: (i32, i32),
    size: f32,
    color: Rgb<u8>,
) {
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);

    let width = font
        .layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0);

    let origin_x = center.0 as f32 - width / 2.0;
    let baseline = center.1 as f32 + (v_metrics.ascent + v_metrics.descent) / 2.0;

    for glyph in font.layout(text, scale, point(origin_x, baseline)) {
        if let Some(bounds) = glyph.pixel_bounding_box() {
            glyph.draw(|x, y, coverage| {
                blend(
                    canvas,
                    bounds.min.x + x as i32,
                    bounds.min.y + y as i32,
                    color,
                    coverage,
                );
            });
        }
    }
}

/// Integer scale for the bitmap font at a requested pixel size.
pub fn bitmap_scale(size: f32) -> i32 {
    ((size / BITMAP_CELL_SIZE).round() as i32).max(1)
}

/// Width in pixels of `text` rendered with the bitmap font.
pub fn bitmap_text_width(text: &str, size: f32) -> i32 {
    let chars = text.chars().count() as i32;
    if chars == 0 {
        return 0;
    }
    let scale = bitmap_scale(size);
    chars * (GLYPH_WIDTH + GLYPH_SPACING) * scale - GLYPH_SPACING * scale
}

fn draw_bitmap(canvas: &mut RgbImage, text: &str, center: (i32, i32), size: f32, color: Rgb<u8>) {
    let scale = bitmap_scale(size);
    let left = center.0 - bitmap_text_width(text, size) / 2;
    let top = center.1 - GLYPH_HEIGHT * scale / 2;

    for (index, ch) in text.chars().enumerate() {
        let glyph_left = left + index as i32 * (GLYPH_WIDTH + GLYPH_SPACING) * scale;
        for (row, bits) in glyph(ch).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let x0 = glyph_left + col * scale;
                let y0 = top + row as i32 * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        blend(canvas, x0 + dx, y0 + dy, color, 1.0);
                    }
                }
            }
        }
    }
}

fn blend(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i32 || y >= canvas.height() as i32 {
        return;
    }
    let coverage = coverage.clamp(0.0, 1.0);
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    for channel in 0..3 {
        let mixed = color[channel] as f32 * coverage + pixel[channel] as f32 * (1.0 - coverage);
        pixel[channel] = mixed.round() as u8;
    }
}

/// Rows of a 5x7 glyph, most significant of the low five bits is the left column.
/// Lowercase letters share the uppercase shapes.
fn glyph(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ' ' => [0x00; 7],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        '\'' => [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '[' => [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E],
        ']' => [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E],
        _ => [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F],
    }
}
