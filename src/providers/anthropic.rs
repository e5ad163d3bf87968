// src/providers/anthropic.rs
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use super::openai::api_error;
use crate::error::AiError;
use crate::types::*;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[allow(clippy::too_many_arguments)]
pub async fn chat(
    http: &Client,
    base_url: &str,
    api_key: &str,
    model: &str,
    max_tokens: u32,
    temperature: f32,
    system: &str,
    user: &str,
) -> Result<String> {
    let url = format!("{}/messages", base_url);
    debug!(%url, model, "sending messages request");

    let request = MessagesRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user(user)],
        system: system.to_string(),
        max_tokens,
        temperature,
    };

    let response = http
        .post(&url)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .header("x-api-key", api_key)
        .json(&request)
        .send()
        .await
        .context("Failed to send request")?;

    let status = response.status();
    let body = response.text().await.context("Failed to read response body")?;

    if !status.is_success() {
        return Err(api_error(status.as_u16(), &body).into());
    }

    let resp: MessagesResponse =
        serde_json::from_str(&body).context("Failed to parse messages response")?;

    first_text(resp).ok_or_else(|| AiError::EmptyCompletion.into())
}

pub fn first_text(resp: MessagesResponse) -> Option<String> {
    resp.content
        .into_iter()
        .find_map(|c| c.text)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
