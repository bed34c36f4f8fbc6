//! LLM Gateway port
//!
//! Defines the interface for communicating with LLM providers. Every call
//! is an atomic request/response: no streaming, no session state.

use async_trait::async_trait;
use council_domain::{ModelId, TokenUsage};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The provider answered with a non-success status. `message` is the
    /// provider's own error text, unmodified.
    #[error("Provider error {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// API credential for one run.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential(String);

impl ApiCredential {
    /// Wrap a credential, returning `None` for blank input.
    pub fn new(secret: impl Into<String>) -> Option<Self> {
        let secret = secret.into().trim().to_string();
        (!secret.is_empty()).then_some(Self(secret))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(***)")
    }
}

/// Structured-output contract a call should be constrained to.
///
/// The adapter turns this into a provider-specific schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputContract {
    /// A [`CritiqueResult`](council_domain::CritiqueResult) object
    Critique,
    /// A [`Blueprint`](council_domain::Blueprint) object
    Blueprint,
}

impl OutputContract {
    pub fn name(&self) -> &'static str {
        match self {
            OutputContract::Critique => "critique_result",
            OutputContract::Blueprint => "blueprint",
        }
    }
}

/// A single completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: ModelId,
    pub prompt: String,
    pub contract: Option<OutputContract>,
    pub credential: ApiCredential,
}

impl CompletionRequest {
    pub fn new(model: ModelId, prompt: impl Into<String>, credential: ApiCredential) -> Self {
        Self {
            model,
            prompt: prompt.into(),
            contract: None,
            credential,
        }
    }

    pub fn with_contract(mut self, contract: OutputContract) -> Self {
        self.contract = Some(contract);
        self
    }
}

/// Provider reply to a [`CompletionRequest`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub usage: TokenUsage,
}

impl Completion {
    pub fn new(text: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            text: text.into(),
            usage,
        }
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with LLM providers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one prompt and wait for the complete reply.
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GatewayError>;

    /// Verify that a credential is accepted by the provider.
    async fn check_credentials(&self, credential: &ApiCredential) -> Result<(), GatewayError>;

    /// Verify that a model id is served by the provider.
    async fn check_model(
        &self,
        model: &ModelId,
        credential: &ApiCredential,
    ) -> Result<(), GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_rejects_blank() {
        assert!(ApiCredential::new("   ").is_none());
        assert_eq!(ApiCredential::new(" sk-1 ").unwrap().expose(), "sk-1");
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = ApiCredential::new("sk-or-v1-secret").unwrap();
        assert_eq!(format!("{:?}", credential), "ApiCredential(***)");
    }

    #[test]
    fn test_provider_error_keeps_message() {
        let err = GatewayError::Provider {
            status: 401,
            message: "{\"error\":\"No auth credentials found\"}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Provider error 401: {\"error\":\"No auth credentials found\"}"
        );
    }
}
