//! OCR engine boundary.
//!
//! The engine is a trait so the pipeline can be exercised without a real
//! recognizer; the shipped implementation shells out to the `tesseract`
//! binary, feeding it PNG bytes on stdin and reading plain text on stdout.

use std::io::Cursor;
use std::process::Stdio;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize text in a preprocessed image. The returned string may be
    /// empty or noisy; numeric extraction deals with that downstream.
    async fn recognize(&self, image: &DynamicImage) -> Result<String>;
}

/// Tesseract CLI backend.
pub struct TesseractCli {
    command: String,
    language: String,
}

impl TesseractCli {
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self { command: command.into(), language: language.into() }
    }
}

#[async_trait]
impl OcrEngine for TesseractCli {
    async fn recognize(&self, image: &DynamicImage) -> Result<String> {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .context("Failed to encode image for OCR")?;

        let mut child = Command::new(&self.command)
            .arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to launch OCR command '{}'", self.command))?;

        let mut stdin = child
            .stdin
            .take()
            .context("OCR child process has no stdin")?;
        stdin.write_all(&png).await.context("Failed to stream image to OCR")?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .context("OCR process did not complete")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("tesseract exited with {}: {}", output.status, stderr.trim());
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(bytes = png.len(), chars = text.len(), "OCR completed");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedText(&'static str);

    #[async_trait]
    impl OcrEngine for FixedText {
        async fn recognize(&self, _image: &DynamicImage) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn engine_trait_is_object_safe() {
        let engine: Box<dyn OcrEngine> = Box::new(FixedText("TOTAL 12,50"));
        let img = DynamicImage::ImageRgb8(image::RgbImage::new(1, 1));
        assert_eq!(engine.recognize(&img).await.unwrap(), "TOTAL 12,50");
    }

    #[tokio::test]
    async fn missing_binary_is_an_error_not_a_panic() {
        let engine = TesseractCli::new("definitely-not-a-real-ocr-binary", "eng");
        let img = DynamicImage::ImageRgb8(image::RgbImage::new(1, 1));
        assert!(engine.recognize(&img).await.is_err());
    }
}
