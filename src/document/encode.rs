//! JPEG encoding with a descending quality search toward a byte budget.
//!
//! Output is 4:2:0 with Huffman tables built per image.

use image::RgbImage;
use jpeg_encoder::{ColorType, Encoder, EncodingError, SamplingFactor};
use thiserror::Error;

pub const DEFAULT_QUALITY_LEVELS: [u8; 5] = [50, 40, 30, 20, 15];
/// Slack allowed above the target before trying a lower quality.
pub const DEFAULT_MARGIN_BYTES: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedJpeg {
    pub bytes: Vec<u8>,
    pub quality: u8,
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("canvas {width}x{height} is larger than a JPEG frame allows")]
    TooLarge { width: u32, height: u32 },
    #[error(transparent)]
    Jpeg(#[from] EncodingError),
}

pub fn encode_jpeg(canvas: &RgbImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = canvas.dimensions();
    let too_large = || EncodeError::TooLarge { width, height };
    let frame_width = u16::try_from(width).map_err(|_| too_large())?;
    let frame_height = u16::try_from(height).map_err(|_| too_large())?;

    let mut bytes = Vec::new();
    let mut encoder = Encoder::new(&mut bytes, quality);
    encoder.set_sampling_factor(SamplingFactor::R_4_2_0);
    encoder.set_optimized_huffman_tables(true);
    encoder.encode(canvas.as_raw(), frame_width, frame_height, ColorType::Rgb)?;
    Ok(bytes)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualitySearch {
    /// Tried in order; expected to be descending.
    pub levels: Vec<u8>,
    pub margin_bytes: usize,
}

impl Default for QualitySearch {
    fn default() -> Self {
        Self {
            levels: DEFAULT_QUALITY_LEVELS.to_vec(),
            margin_bytes: DEFAULT_MARGIN_BYTES,
        }
    }
}

impl QualitySearch {
    pub fn with_margin(mut self, margin_bytes: usize) -> Self {
        self.margin_bytes = margin_bytes;
        self
    }

    /// First level whose output fits `target_bytes + margin_bytes`, or the
    /// last level tried when none fits.
    pub fn encode(
        &self,
        canvas: &RgbImage,
        target_bytes: usize,
    ) -> Result<EncodedJpeg, EncodeError> {
        let levels: &[u8] = if self.levels.is_empty() {
            &DEFAULT_QUALITY_LEVELS
        } else {
            &self.levels
        };
        let limit = target_bytes.saturating_add(self.margin_bytes);

        let mut chosen = EncodedJpeg {
            bytes: Vec::new(),
            quality: 0,
        };
        for &quality in levels {
            chosen = EncodedJpeg {
                bytes: encode_jpeg(canvas, quality)?,
                quality,
            };
            if chosen.bytes.len() <= limit {
                break;
            }
            log::trace!(
                "JPEG at quality {} is {} bytes, over the {} byte limit",
                quality,
                chosen.bytes.len(),
                limit
            );
        }
        Ok(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn noisy_canvas() -> RgbImage {
        RgbImage::from_fn(200, 150, |x, y| {
            let v = ((x * 31 + y * 17) ^ (x * y)) % 256;
            Rgb([v as u8, (v * 3 % 256) as u8, (255 - v) as u8])
        })
    }

    #[test]
    fn test_generous_target_accepts_first_level() {
        let canvas = RgbImage::from_pixel(200, 150, Rgb([76, 175, 80]));
        let encoded = QualitySearch::default().encode(&canvas, 64 * 1024).unwrap();
        assert_eq!(encoded.quality, 50);
        assert_eq!(&encoded.bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_unreachable_target_uses_lowest_quality() {
        let canvas = noisy_canvas();
        let search = QualitySearch::default().with_margin(0);
        let encoded = search.encode(&canvas, 1).unwrap();

        assert_eq!(encoded.quality, 15);
        assert_eq!(encoded.bytes, encode_jpeg(&canvas, 15).unwrap());
    }

    #[test]
    fn test_size_does_not_grow_as_quality_drops() {
        let canvas = noisy_canvas();
        let sizes: Vec<usize> = DEFAULT_QUALITY_LEVELS
            .iter()
            .map(|&q| encode_jpeg(&canvas, q).unwrap().len())
            .collect();

        for pair in sizes.windows(2) {
            assert!(pair[1] <= pair[0], "sizes {:?}", sizes);
        }
    }

    #[test]
    fn test_flat_card_fits_two_kilobytes_at_first_level() {
        let canvas = RgbImage::from_fn(200, 150, |x, y| {
            if (10..=190).contains(&x) && (10..=140).contains(&y) {
                Rgb([255, 255, 255])
            } else {
                Rgb([33, 150, 243])
            }
        });
        let encoded = QualitySearch::default().encode(&canvas, 2048).unwrap();

        assert_eq!(encoded.quality, 50);
        assert!(encoded.bytes.len() <= 2048, "{} bytes", encoded.bytes.len());
        let decoded = image::load_from_memory(&encoded.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 150));
    }

    #[test]
    fn test_oversized_canvas_is_rejected() {
        let canvas = RgbImage::new(u16::MAX as u32 + 1, 1);
        let err = encode_jpeg(&canvas, 50).unwrap_err();
        assert!(matches!(err, EncodeError::TooLarge { width: 65536, height: 1 }));
    }

    #[test]
    fn test_empty_levels_fall_back_to_defaults() {
        let canvas = noisy_canvas();
        let search = QualitySearch {
            levels: Vec::new(),
            margin_bytes: 0,
        };
        let encoded = search.encode(&canvas, 1).unwrap();
        assert_eq!(encoded.quality, 15);
    }
}
