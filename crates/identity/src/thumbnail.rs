//! Deterministic reference extractor.
//!
//! Decodes the image, shrinks it to a 16x8 grayscale thumbnail, then
//! mean-centers and L2-normalizes the pixel intensities into a
//! 128-dimension descriptor. Images without any contrast produce no
//! detection. This is a development stand-in with the same output contract
//! as a real face recognizer; it does not locate faces.

use image::imageops::FilterType;

use crate::{BoundingBox, Detection, EmbeddingExtractor, ExtractError};

pub const THUMBNAIL_WIDTH: u32 = 16;
pub const THUMBNAIL_HEIGHT: u32 = 8;
/// Length of every descriptor this extractor emits.
pub const DESCRIPTOR_LEN: usize = (THUMBNAIL_WIDTH * THUMBNAIL_HEIGHT) as usize;

const DEFAULT_MIN_CONTRAST: f32 = 1e-3;

#[derive(Debug, Clone)]
pub struct ThumbnailExtractor {
    min_contrast: f32,
}

impl Default for ThumbnailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ThumbnailExtractor {
    pub fn new() -> Self {
        Self {
            min_contrast: DEFAULT_MIN_CONTRAST,
        }
    }

    /// Minimum L2 norm of the centered thumbnail below which the image is
    /// considered blank.
    pub fn with_min_contrast(mut self, min_contrast: f32) -> Self {
        self.min_contrast = min_contrast;
        self
    }
}

impl EmbeddingExtractor for ThumbnailExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<Vec<Detection>, ExtractError> {
        if bytes.is_empty() {
            return Err(ExtractError::UnreadableImage("empty payload".into()));
        }

        let img = image::load_from_memory(bytes)
            .map_err(|e| ExtractError::UnreadableImage(e.to_string()))?;
        let (width, height) = (img.width(), img.height());

        let thumb = img
            .resize_exact(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT, FilterType::Triangle)
            .to_luma8();
        let pixels: Vec<f32> = thumb
            .into_raw()
            .into_iter()
            .map(|p| f32::from(p) / 255.0)
            .collect();

        let mean = pixels.iter().sum::<f32>() / pixels.len() as f32;
        let mut descriptor: Vec<f32> = pixels.iter().map(|p| p - mean).collect();
        let norm = descriptor.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm < self.min_contrast {
            return Ok(Vec::new());
        }
        for v in &mut descriptor {
            *v /= norm;
        }

        Ok(vec![Detection {
            descriptor,
            bounds: Some(BoundingBox {
                x: 0,
                y: 0,
                width,
                height,
            }),
        }])
    }

    fn name(&self) -> &str {
        "thumbnail"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png(img: RgbImage) -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    fn gradient(invert: bool) -> Vec<u8> {
        png(RgbImage::from_fn(64, 32, |x, _| {
            let v = (x * 4) as u8;
            let v = if invert { 255 - v } else { v };
            image::Rgb([v, v, v])
        }))
    }

    #[test]
    fn gradient_yields_one_unit_descriptor() {
        let detections = ThumbnailExtractor::new().extract(&gradient(false)).unwrap();
        assert_eq!(detections.len(), 1);

        let d = &detections[0];
        assert_eq!(d.descriptor.len(), DESCRIPTOR_LEN);
        let norm: f32 = d.descriptor.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
        assert_eq!(
            d.bounds,
            Some(BoundingBox {
                x: 0,
                y: 0,
                width: 64,
                height: 32
            })
        );
    }

    #[test]
    fn same_bytes_same_descriptor() {
        let extractor = ThumbnailExtractor::new();
        let bytes = gradient(false);
        assert_eq!(
            extractor.extract(&bytes).unwrap(),
            extractor.extract(&bytes).unwrap()
        );
    }

    #[test]
    fn inverted_image_is_far_away() {
        let extractor = ThumbnailExtractor::new();
        let a = extractor.extract(&gradient(false)).unwrap().remove(0);
        let b = extractor.extract(&gradient(true)).unwrap().remove(0);
        let dist = matcher::squared_euclidean(&a.descriptor, &b.descriptor).unwrap();
        assert!(dist > 3.9, "distance was {dist}");
    }

    #[test]
    fn flat_image_has_no_detection() {
        let flat = png(RgbImage::from_pixel(20, 20, image::Rgb([128, 128, 128])));
        assert!(ThumbnailExtractor::new().extract(&flat).unwrap().is_empty());
    }

    #[test]
    fn garbage_is_unreadable() {
        let extractor = ThumbnailExtractor::new();
        assert!(matches!(
            extractor.extract(b"definitely not an image"),
            Err(ExtractError::UnreadableImage(_))
        ));
        assert!(matches!(
            extractor.extract(&[]),
            Err(ExtractError::UnreadableImage(_))
        ));
    }
}
