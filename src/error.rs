//! Error handling for the resume tailoring pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeTailorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Language model error: {0}")]
    LanguageModel(String),

    #[error("JD analysis parse failed: {message} | text: {raw}")]
    AnalysisParse { message: String, raw: String },

    #[error("Language model call timed out after {0}s")]
    Timeout(u64),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl ResumeTailorError {
    /// Whether the error came from a model call that ran out of time
    pub fn is_timeout(&self) -> bool {
        matches!(self, ResumeTailorError::Timeout(_))
    }
}

pub type Result<T> = std::result::Result<T, ResumeTailorError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ResumeTailorError {
    fn from(err: anyhow::Error) -> Self {
        ResumeTailorError::Processing(err.to_string())
    }
}

/// TOML errors only come from the config and input layers
impl From<toml::de::Error> for ResumeTailorError {
    fn from(err: toml::de::Error) -> Self {
        ResumeTailorError::Configuration(format!("Failed to parse TOML: {}", err))
    }
}
