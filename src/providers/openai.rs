// src/providers/openai.rs
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use crate::error::AiError;
use crate::types::*;

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
    let url = format!("{}/chat/completions", base_url);
    debug!(%url, model, "sending chat completion");

    let request = ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
        max_tokens,
        temperature,
    };

    let response = http
        .post(&url)
        .header("Accept", "application/json")
        .bearer_auth(api_key)
        .json(&request)
        .send()
        .await
        .context("Failed to send request")?;

    let status = response.status();
    let body = response.text().await.context("Failed to read response body")?;

    if !status.is_success() {
        return Err(api_error(status.as_u16(), &body).into());
    }

    let resp: ChatCompletionResponse =
        serde_json::from_str(&body).context("Failed to parse response")?;

    first_choice(resp).ok_or_else(|| AiError::EmptyCompletion.into())
}

pub fn first_choice(resp: ChatCompletionResponse) -> Option<String> {
    resp.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Builds an `AiError::Api`, preferring the provider's `error.message` field.
pub fn api_error(status: u16, body: &str) -> AiError {
    let message = serde_json::from_str::<ApiError>(body)
        .ok()
        .and_then(|e| e.error)
        .and_then(|d| d.message)
        .unwrap_or_else(|| body.chars().take(500).collect());
    AiError::Api { status, message }
}

pub async fn list_models(http: &Client, base_url: &str, api_key: &str) -> Result<Vec<CatalogModel>> {
    let url = format!("{}/models", base_url);
    debug!(%url, "fetching model catalog");

    let response = http
        .get(&url)
        .header("Accept", "application/json")
        .bearer_auth(api_key)
        .send()
        .await
        .context("Failed to send request")?;

    let status = response.status();
    let body = response.text().await.context("Failed to read response body")?;

    if !status.is_success() {
        return Err(api_error(status.as_u16(), &body).into());
    }

    let resp: CatalogResponse =
        serde_json::from_str(&body).context("Failed to parse models response")?;
    Ok(resp.data)
}
