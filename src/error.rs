//! Error handling for the application

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] envy::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
