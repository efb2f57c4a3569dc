use std::time::Duration;

use async_trait::async_trait;
use relay_core::config::GatewayConfig;
use relay_core::error::{ProviderError, RelayError};
use relay_core::generator::{GenerationRequest, Generator};

use crate::types::{ChatCompletion, ChatCompletionRequest};
use crate::{GatewayError, Result};

// ─── GatewayClient ────────────────────────────────────────────────────────

/// Client for `POST {base_url}/chat/completions`.
///
/// No retries: rate-limit and quota responses are classified and returned to
/// the caller untouched.
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GatewayClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Build a client from config, reading the API key from the environment.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let api_key = config.api_key().map_err(|e| match e {
            RelayError::Config(msg) => GatewayError::Config(msg),
            other => GatewayError::Config(other.to_string()),
        })?;
        Self::new(
            config.base_url.clone(),
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Send one completion request and return the first choice's text.
    pub async fn complete(&self, request: &GenerationRequest) -> Result<String> {
        let body = ChatCompletionRequest::from(request);
        tracing::debug!(model = %body.model, "calling AI gateway");

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error response".to_string());
            tracing::error!(status = status.as_u16(), body = %body, "AI gateway error");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let completion: ChatCompletion = serde_json::from_slice(&bytes)?;
        match completion.first_content() {
            Some(text) => Ok(text.to_string()),
            None => {
                tracing::error!("no content in AI response");
                Err(GatewayError::EmptyContent)
            }
        }
    }
}

#[async_trait]
impl Generator for GatewayClient {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<String, ProviderError> {
        self.complete(&request).await.map_err(ProviderError::from)
    }
}
