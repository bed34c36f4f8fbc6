//! OpenRouter adapter for the [`LlmGateway`] port.

use super::wire::{ChatMessage, ChatRequest, ChatResponse, response_format};
use async_trait::async_trait;
use council_application::{ApiCredential, Completion, CompletionRequest, GatewayError, LlmGateway};
use council_domain::{ModelId, TokenUsage};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, warn};

/// Default OpenRouter API root.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Connection settings for [`OpenRouterGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRouterConfig {
    pub base_url: String,
    /// Sent as `HTTP-Referer`
    pub site_url: String,
    /// Sent as `X-Title`
    pub app_name: String,
    pub timeout: Duration,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            site_url: "https://llm-council.local".to_string(),
            app_name: "LLM Council".to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Gateway talking to an OpenAI-compatible chat/completions endpoint.
pub struct OpenRouterGateway {
    client: Client,
    config: OpenRouterConfig,
}

impl OpenRouterGateway {
    pub fn new(config: OpenRouterConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OpenRouterConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorized(&self, builder: RequestBuilder, credential: &ApiCredential) -> RequestBuilder {
        builder
            .bearer_auth(credential.expose())
            .header("HTTP-Referer", &self.config.site_url)
            .header("X-Title", &self.config.app_name)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, GatewayError> {
        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
        warn!(status = status.as_u16(), "Provider returned an error");
        Err(GatewayError::Provider {
            status: status.as_u16(),
            message,
        })
    }

    async fn chat(
        &self,
        body: &ChatRequest<'_>,
        credential: &ApiCredential,
    ) -> Result<Completion, GatewayError> {
        let builder = self.authorized(
            self.client.post(self.endpoint("chat/completions")).json(body),
            credential,
        );
        let response = self.send(builder).await?;
        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GatewayError::InvalidResponse("no content in response".to_string()))?;
        let usage = parsed.usage.map(TokenUsage::from).unwrap_or_default();
        Ok(Completion::new(text, usage))
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::ConnectionError(e.to_string())
    }
}

#[async_trait]
impl LlmGateway for OpenRouterGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GatewayError> {
        debug!(
            model = %request.model,
            structured = request.contract.is_some(),
            "OpenRouter request"
        );
        let body = ChatRequest {
            model: request.model.as_str(),
            messages: vec![ChatMessage::user(&request.prompt)],
            response_format: request.contract.map(response_format),
            max_tokens: None,
        };
        let completion = self.chat(&body, &request.credential).await?;
        debug!(
            model = %request.model,
            tokens = completion.usage.total,
            "OpenRouter response"
        );
        Ok(completion)
    }

    async fn check_credentials(&self, credential: &ApiCredential) -> Result<(), GatewayError> {
        let builder = self.authorized(self.client.get(self.endpoint("key")), credential);
        self.send(builder).await.map(|_| ())
    }

    async fn check_model(
        &self,
        model: &ModelId,
        credential: &ApiCredential,
    ) -> Result<(), GatewayError> {
        let body = ChatRequest {
            model: model.as_str(),
            messages: vec![ChatMessage::user("ping")],
            response_format: None,
            max_tokens: Some(1),
        };
        self.chat(&body, credential).await.map(|_| ())
    }
}
