//! OpenAI-compatible chat/completions wire types.

use council_application::OutputContract;
use council_domain::{Blueprint, CritiqueResult, TokenUsage};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> ChatMessage<'a> {
    pub fn user(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

impl From<Usage> for TokenUsage {
    fn from(usage: Usage) -> Self {
        TokenUsage {
            prompt: usage.prompt_tokens,
            completion: usage.completion_tokens,
            total: usage.total_tokens.max(usage.prompt_tokens + usage.completion_tokens),
        }
    }
}

/// JSON schema for a structured-output contract.
pub(crate) fn contract_schema(contract: OutputContract) -> Value {
    let schema = match contract {
        OutputContract::Critique => schemars::schema_for!(CritiqueResult),
        OutputContract::Blueprint => schemars::schema_for!(Blueprint),
    };
    serde_json::to_value(schema).unwrap_or_else(|_| json!({ "type": "object" }))
}

/// `response_format` body for a structured call.
///
/// Not strict: optional blueprint fields are absent from `required`, which
/// strict mode rejects.
pub(crate) fn response_format(contract: OutputContract) -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": contract.name(),
            "strict": false,
            "schema": contract_schema(contract),
        }
    })
}
