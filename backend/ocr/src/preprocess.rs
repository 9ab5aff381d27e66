//! Light image preprocessing ahead of OCR.
//!
//! Receipt screenshots are often low-contrast and small; Tesseract's accuracy
//! drops sharply on both. The pipeline is grayscale → contrast stretch →
//! sharpen → upscale-if-small, mirroring what works for phone screenshots.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// 3×3 sharpen kernel.
const SHARPEN: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

#[derive(Debug, Clone)]
pub struct PreprocessParams {
    /// Images narrower than this are upscaled before OCR.
    pub min_width: u32,
    /// Upscale factor applied to small images.
    pub scale_factor: f32,
}

impl Default for PreprocessParams {
    fn default() -> Self {
        Self { min_width: 800, scale_factor: 1.5 }
    }
}

/// Prepare a receipt image for text recognition.
pub fn preprocess(img: &DynamicImage, params: &PreprocessParams) -> DynamicImage {
    let gray = stretch_contrast(img.to_luma8());
    let sharpened = DynamicImage::ImageLuma8(gray).filter3x3(&SHARPEN);

    let (w, h) = sharpened.dimensions();
    if w < params.min_width {
        let nw = (w as f32 * params.scale_factor) as u32;
        let nh = (h as f32 * params.scale_factor) as u32;
        sharpened.resize(nw, nh, FilterType::Triangle)
    } else {
        sharpened
    }
}

/// Linear contrast stretch over the full 0–255 range.
fn stretch_contrast(mut gray: image::GrayImage) -> image::GrayImage {
    let (mut lo, mut hi) = (u8::MAX, u8::MIN);
    for p in gray.pixels() {
        lo = lo.min(p.0[0]);
        hi = hi.max(p.0[0]);
    }
    if hi > lo {
        let range = (hi - lo) as f32;
        for p in gray.pixels_mut() {
            p.0[0] = (((p.0[0] - lo) as f32 / range) * 255.0) as u8;
        }
    }
    gray
}
