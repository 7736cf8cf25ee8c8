use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server error: status {status} body {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to parse body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(status: StatusCode, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// HTTP status of a completed but unsuccessful exchange.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            Self::Url(_) | Self::Decode(_) => None,
        }
    }

    pub fn is_unprocessable(&self) -> bool {
        matches!(
            self,
            Self::Status { status, .. } if *status == StatusCode::UNPROCESSABLE_ENTITY
        )
    }

    /// Response body as JSON. Bodies that are not valid JSON come back as a string value.
    pub fn body_json(&self) -> Option<Value> {
        match self {
            Self::Status { body, .. } => Some(
                serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.clone())),
            ),
            _ => None,
        }
    }
}
