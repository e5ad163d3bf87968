// src/commands/model.rs
use anyhow::Result;
use console::style;
use tracing::warn;

use crate::catalog::{free_openrouter_models, ModelCatalogCache};
use crate::client::LlmClient;
use crate::config::{AiConfig, ENV_MODEL};
use crate::display;
use crate::providers::{self, Provider};
use crate::types::CatalogModel;

/// Numbered `  1. <key>` lines.
pub fn numbered(keys: &[String]) -> Vec<String> {
    keys.iter()
        .enumerate()
        .map(|(i, key)| format!("  {}. {}", i + 1, key))
        .collect()
}

pub fn openrouter_keys(models: &[CatalogModel]) -> Vec<String> {
    models
        .iter()
        .map(|m| format!("{}/{}", Provider::OpenRouter.id(), m.id))
        .collect()
}

async fn fetch_free_models(api_key: &str, current: &str, refresh: bool) -> Vec<CatalogModel> {
    let cache = ModelCatalogCache::default_location();
    if refresh {
        if let Some(c) = &cache {
            if let Err(e) = c.invalidate() {
                warn!(error = %e, "failed to invalidate model cache");
            }
        }
    }

    let model = match providers::split_model_key(current) {
        Some((Provider::OpenRouter, m)) => m,
        _ => "openrouter/auto",
    };
    let client = match AiConfig::openrouter(api_key, model).map_err(anyhow::Error::from).and_then(LlmClient::new) {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "cannot build OpenRouter client");
            return Vec::new();
        }
    };
    free_openrouter_models(&client, cache.as_ref()).await
}

/// Lists the registered model keys and, with an OpenRouter key, the free
/// OpenRouter catalog.
pub async fn cmd_model(current: &str, openrouter_key: Option<String>, refresh: bool) -> Result<()> {
    display::header("🤖 Available AI Models");

    let keys = providers::model_keys();
    println!("{}", style("Supported model keys:").green());
    for line in numbered(&keys) {
        println!("{}", line);
    }
    println!();

    match openrouter_key {
        Some(key) => {
            let free = fetch_free_models(&key, current, refresh).await;
            if free.is_empty() {
                display::warning("No free OpenRouter models available.");
            } else {
                println!("{}", style(format!("Free OpenRouter models ({}):", free.len())).green());
                for line in numbered(&openrouter_keys(&free)) {
                    println!("{}", line);
                }
            }
        }
        None => display::warning("Set OPENROUTER_API_KEY to list free OpenRouter models."),
    }

    println!();
    println!("{}", style("Usage:").yellow());
    println!("  Set environment variable: export {}=<model-key>", ENV_MODEL);
    println!("  Or use command line option: git-commit-ai generate --model <model-key>");
    println!();
    display::notice(&format!("Current model: {}", current));
    Ok(())
}
