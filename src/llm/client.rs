//! Language model capability consumed by the pipeline
//!
//! The pipeline never talks to a concrete model. Every LLM-facing stage takes a
//! `&dyn LanguageModel`, so callers can inject a network client, the built-in
//! deterministic stub, or a scripted test double.

use crate::error::{Result, ResumeTailorError};
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Per-call sampling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl CompletionConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature.clamp(0.0, 2.0));
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub text: String,
}

impl Completion {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Text completion capability: ordered chat messages in, text out.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Identifier used in logs and reports
    fn id(&self) -> &str;

    async fn complete(
        &self,
        messages: &[Message],
        config: Option<&CompletionConfig>,
    ) -> Result<Completion>;
}

/// Run one completion with an upper bound on wall-clock time.
///
/// Elapsed calls map to `ResumeTailorError::Timeout`; each stage decides whether
/// that is fatal or recoverable.
pub async fn complete_with_timeout(
    model: &dyn LanguageModel,
    messages: &[Message],
    config: Option<&CompletionConfig>,
    timeout: Duration,
) -> Result<Completion> {
    debug!(
        "Calling language model '{}' with {} messages",
        model.id(),
        messages.len()
    );
    match tokio::time::timeout(timeout, model.complete(messages, config)).await {
        Ok(result) => result,
        Err(_) => Err(ResumeTailorError::Timeout(timeout.as_secs())),
    }
}

/// Strip a Markdown code fence around a JSON payload, if the model added one
pub fn extract_json_payload(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowModel;

    #[async_trait]
    impl LanguageModel for SlowModel {
        fn id(&self) -> &str {
            "slow"
        }

        async fn complete(
            &self,
            _messages: &[Message],
            _config: Option<&CompletionConfig>,
        ) -> Result<Completion> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Completion::new("late"))
        }
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let result = complete_with_timeout(
            &SlowModel,
            &[Message::user("hi")],
            None,
            Duration::from_millis(10),
        )
        .await;
        assert!(matches!(result, Err(ResumeTailorError::Timeout(_))));
    }

    #[test]
    fn test_extract_json_payload() {
        assert_eq!(extract_json_payload("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(extract_json_payload("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(extract_json_payload("```\n[1]\n```"), "[1]");
    }

    #[test]
    fn test_temperature_is_clamped() {
        let config = CompletionConfig::new("m").with_temperature(5.0);
        assert_eq!(config.temperature, Some(2.0));
    }
}
