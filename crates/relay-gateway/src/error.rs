use relay_core::error::{ProviderError, RelayError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gateway returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse gateway response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("gateway response had no content")]
    EmptyContent,

    #[error("gateway not configured: {0}")]
    Config(String),
}

impl From<GatewayError> for ProviderError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Status { status: 429, .. } => ProviderError::RateLimited,
            GatewayError::Status { status: 402, .. } => ProviderError::QuotaExhausted,
            GatewayError::Status { status, .. } => {
                ProviderError::Failed(format!("AI service error: HTTP {status}"))
            }
            GatewayError::EmptyContent => ProviderError::Empty,
            other => ProviderError::Failed(other.to_string()),
        }
    }
}

impl From<GatewayError> for RelayError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Config(msg) => RelayError::Config(msg),
            other => RelayError::Provider(other.into()),
        }
    }
}
