pub mod engine;
pub mod preprocess;

pub use engine::{OcrEngine, TesseractCli};
pub use preprocess::{preprocess, PreprocessParams};

/// Attachment extensions that enter the OCR pipeline.
pub fn is_image_filename(name: &str) -> bool {
    let ext = name.rsplit('.').next().unwrap_or("").to_lowercase();
    matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "webp" | "bmp")
}
