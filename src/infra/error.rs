use thiserror::Error;

use crate::config::LoadError;

use super::http::ApiError;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("configuration error: {0}")]
    Configuration(#[from] LoadError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("http client setup failed: {0}")]
    HttpClient(#[from] ApiError),
}

impl InfraError {
    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }
}
