use thiserror::Error;

/// A failed `Action` schema check. The first failing check wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("invalid action type: {0}")]
    InvalidAction(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid scriptType: {0}")]
    InvalidScriptType(String),
}

/// Failure reported by the text generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("rate limit exceeded, please try again later")]
    RateLimited,

    #[error("AI credits exhausted, please add credits to your workspace")]
    QuotaExhausted,

    #[error("empty AI response")]
    Empty,

    #[error("{0}")]
    Failed(String),
}

impl ProviderError {
    /// Only rate limiting is worth retrying from the caller's side.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    BadRequest(String),

    #[error("invalid JSON response from AI")]
    MalformedJson { candidate: String },

    /// The candidate parsed but broke the schema; `candidate` is kept so the
    /// caller can see what the assistant actually sent.
    #[error("{violation}")]
    Schema {
        #[source]
        violation: SchemaViolation,
        candidate: String,
    },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("backend configuration error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Store(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl RelayError {
    /// Diagnostic payload carried alongside the short error message, if any.
    pub fn details(&self) -> Option<String> {
        match self {
            Self::MalformedJson { candidate } | Self::Schema { candidate, .. } => {
                Some(candidate.clone())
            }
            Self::Config(msg) | Self::Store(msg) => Some(msg.clone()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
