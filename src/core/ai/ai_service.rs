use super::models::{AiConfig, AiMessage};
use crate::core::errors::CommandError;
use async_trait::async_trait;
use std::error::Error;
use thiserror::Error;

#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Sends a chat completion request to the AI provider and returns the
    /// text of the first choice.
    async fn chat_complete(
        &self,
        messages: &[AiMessage],
        config: &AiConfig,
    ) -> Result<String, Box<dyn Error + Send + Sync>>;
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("{0}")]
    Provider(String),

    #[error("The AI returned no content")]
    EmptyResponse,
}

impl From<AiError> for CommandError {
    fn from(err: AiError) -> Self {
        CommandError::RemoteService(err.to_string())
    }
}

pub struct AiService<P: AiProvider> {
    provider: P,
    system_prompt: String,
    config: AiConfig,
}

impl<P: AiProvider> AiService<P> {
    pub fn new(provider: P, system_prompt: String, config: AiConfig) -> Self {
        Self {
            provider,
            system_prompt,
            config,
        }
    }

    /// One-shot reply: system prompt + the user's message, no history.
    pub async fn reply(&self, prompt: &str) -> Result<String, AiError> {
        let messages = [
            AiMessage::system(self.system_prompt.clone()),
            AiMessage::user(prompt),
        ];

        let content = self
            .provider
            .chat_complete(&messages, &self.config)
            .await
            .map_err(|e| AiError::Provider(e.to_string()))?;

        let answer = content.trim();
        if answer.is_empty() {
            return Err(AiError::EmptyResponse);
        }
        Ok(answer.to_string())
    }
}
