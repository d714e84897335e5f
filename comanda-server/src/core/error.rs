use thiserror::Error;

/// Startup and serving errors (request errors use [`crate::utils::AppError`])
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Startup failed: {0}")]
    Startup(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<crate::utils::AppError> for ServerError {
    fn from(err: crate::utils::AppError) -> Self {
        ServerError::Startup(err.message)
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
