//! The boundary to the language model.
//!
//! The round engine only ever sees `Responder`: an ordered conversation in,
//! one text blob out. Failures are surfaced as `Err` here and folded into
//! `[ERROR]: ...` public text by the engine, so downstream parsing treats
//! every reply uniformly as text.

use crate::conversation::{ChatMessage, ChatRole};
use async_trait::async_trait;
use thiserror::Error;

/// Errors from a responder implementation.
#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("provider error: {0}")]
    Provider(String),
}

impl From<deepseek::Error> for ResponderError {
    fn from(e: deepseek::Error) -> Self {
        ResponderError::Provider(e.to_string())
    }
}

/// Sampling parameters forwarded verbatim to the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    /// Randomness of generation.
    pub temperature: f32,
    /// Nucleus-sampling threshold.
    pub top_p: f32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 1.0,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
        }
    }
}

/// Turns a conversation into free text.
///
/// Implementations must be side-effect free with respect to game state; the
/// engine owns all conversation mutation.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(
        &self,
        conversation: &[ChatMessage],
        sampling: &SamplingConfig,
    ) -> Result<String, ResponderError>;
}

/// Live responder backed by the DeepSeek chat-completions API.
pub struct DeepSeekResponder {
    client: deepseek::DeepSeek,
}

impl DeepSeekResponder {
    pub fn new(client: deepseek::DeepSeek) -> Self {
        Self { client }
    }

    /// Build a responder from the DEEPSEEK_API_KEY environment variable.
    pub fn from_env() -> Result<Self, ResponderError> {
        Ok(Self {
            client: deepseek::DeepSeek::from_env()?,
        })
    }
}

#[async_trait]
impl Responder for DeepSeekResponder {
    async fn respond(
        &self,
        conversation: &[ChatMessage],
        sampling: &SamplingConfig,
    ) -> Result<String, ResponderError> {
        let messages = conversation
            .iter()
            .map(|m| deepseek::Message {
                role: match m.role {
                    ChatRole::System => deepseek::Role::System,
                    ChatRole::User => deepseek::Role::User,
                    ChatRole::Assistant => deepseek::Role::Assistant,
                },
                content: m.content.clone(),
            })
            .collect();

        let request = deepseek::Request::new(messages)
            .with_temperature(sampling.temperature)
            .with_top_p(sampling.top_p)
            .with_presence_penalty(sampling.presence_penalty)
            .with_frequency_penalty(sampling.frequency_penalty);

        let response = self.client.complete(request).await?;
        Ok(response.content.trim().to_string())
    }
}
