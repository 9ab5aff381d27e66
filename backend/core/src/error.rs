use thiserror::Error;

/// Top-level error type for the TallyForge runtime.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("image decode failed: {0}")]
    ImageDecode(String),

    #[error("ocr failed: {0}")]
    Ocr(String),

    #[error("report delivery failed: {0}")]
    ReportDelivery(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
