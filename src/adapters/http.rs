use crate::config::{NaminatorConfig, RetryConfig};
use crate::domain::messages::{ApiErrorEnvelope, MessageRequest, MessageResponse};
use crate::domain::ports::MessagesApi;
use crate::utils::error::{NaminatorError, Result};
use async_trait::async_trait;
use reqwest::Client;

pub const MESSAGES_PATH: &str = "/v1/messages";

#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    base_url: String,
    api_key: String,
    anthropic_version: String,
    retry: RetryConfig,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let mut config = NaminatorConfig::default();
        config.api.api_key = Some(api_key.into());
        Self::from_config(&config)
    }

    pub fn from_config(config: &NaminatorConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            api_key,
            anthropic_version: config.api.anthropic_version.clone(),
            retry: config.retry.clone(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, MESSAGES_PATH)
    }

    async fn send_once(&self, request: &MessageRequest) -> Result<MessageResponse> {
        let endpoint = self.endpoint();
        tracing::debug!("Making API request to: {}", endpoint);

        let response = self
            .client
            .post(&endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.anthropic_version)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), &body));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str::<MessageResponse>(&body)?)
    }
}

fn status_error(status: u16, body: &str) -> NaminatorError {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => NaminatorError::ApiStatusError {
            status,
            error_type: envelope.error.error_type,
            message: envelope.error.message,
        },
        Err(_) => NaminatorError::ApiStatusError {
            status,
            error_type: "unknown".to_string(),
            message: body.to_string(),
        },
    }
}

#[async_trait]
impl MessagesApi for AnthropicClient {
    async fn create_message(&self, request: &MessageRequest) -> Result<MessageResponse> {
        let mut attempt = 0;
        loop {
            match self.send_once(request).await {
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for(attempt);
                    tracing::warn!(
                        "🔄 Request failed ({}), retrying in {:?} ({}/{})",
                        e,
                        delay,
                        attempt + 1,
                        self.retry.max_retries
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
