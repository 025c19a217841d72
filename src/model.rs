use anyhow::{Result, bail};
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::Config;
use crate::providers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Ollama,
}

impl Provider {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            other => {
                warn!(provider = %other, "unsupported model provider configured");
                bail!(
                    "Unsupported MODEL_PROVIDER='{}'. Supported providers: ollama.",
                    other
                )
            }
        }
    }
}

pub async fn chat(client: &Client, cfg: &Config, messages: &[Message]) -> Result<String> {
    match Provider::parse(&cfg.model_provider)? {
        Provider::Ollama => {
            debug!(
                provider = "ollama",
                model = %cfg.model,
                message_count = messages.len(),
                "dispatching model chat request"
            );
            providers::ollama::chat(client, cfg, messages).await
        }
    }
}
