// src/client.rs
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Proxy};

use crate::config::AiConfig;
use crate::providers::{anthropic, openai, Wire};
#[cfg(test)]
use crate::providers::Provider;
use crate::types::CatalogModel;

pub const PROXY_ENV: &str = "GIT_COMMIT_AI_PROXY";

/// Something that turns a system prompt and user prompt into completion text.
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String>;

    /// Model key shown to the user.
    fn model(&self) -> &str;
}

pub fn http_client() -> Result<Client> {
    let mut builder = Client::builder().timeout(std::time::Duration::from_secs(120));

    if let Ok(proxy_url) = std::env::var(PROXY_ENV) {
        let proxy_url = proxy_url.trim();
        if !proxy_url.is_empty() {
            builder = builder.proxy(Proxy::all(proxy_url)?);
        }
    }

    Ok(builder.build()?)
}

pub struct LlmClient {
    http: Client,
    config: AiConfig,
}

impl LlmClient {
    pub fn new(config: AiConfig) -> Result<Self> {
        Ok(Self { http: http_client()?, config })
    }

    #[cfg(test)]
    fn provider(&self) -> Provider {
        self.config.provider
    }

    fn wire(&self) -> Wire {
        self.config.provider.wire()
    }

    pub async fn list_models(&self) -> Result<Vec<CatalogModel>> {
        openai::list_models(&self.http, &self.config.base_url, &self.config.api_key).await
    }
}

#[async_trait]
impl Completer for LlmClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let c = &self.config;
        match self.wire() {
            Wire::Anthropic => {
                anthropic::chat(&self.http, &c.base_url, &c.api_key, &c.model, c.max_tokens, c.temperature, system, user)
                    .await
            }
            Wire::OpenAi => {
                openai::chat(&self.http, &c.base_url, &c.api_key, &c.model, c.max_tokens, c.temperature, system, user)
                    .await
            }
        }
    }

    fn model(&self) -> &str {
        &self.config.model_key
    }
}
