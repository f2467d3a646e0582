use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClaimError {
    #[error("Invalid JWT token: {0}")]
    InvalidCredential(String),

    #[error("Upload failed: {0}")]
    UploadFailed(u16),

    #[error("Claim failed: {0}")]
    SubmitFailed(u16),

    #[error("Invalid expense date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ClaimError>;
