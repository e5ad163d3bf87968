// src/commands/config.rs
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::config::{resolve_model_key, AiConfig, Config, Overrides};
use crate::display;

/// Shows the first few characters of a secret.
pub fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(8).collect();
    format!("{}...", visible)
}

/// Copies every override given on the command line into `file`.
/// Returns whether anything changed.
pub fn apply_overrides(file: &mut Config, cli: &Overrides) -> bool {
    let mut changed = false;
    if let Some(model) = &cli.model {
        file.model = Some(model.clone());
        changed = true;
    }
    if let Some(provider) = &cli.provider {
        file.provider = Some(provider.clone());
        changed = true;
    }
    if cli.max_tokens.is_some() {
        file.max_tokens = cli.max_tokens;
        changed = true;
    }
    if cli.temperature.is_some() {
        file.temperature = cli.temperature;
        changed = true;
    }
    if let Some(url) = &cli.base_url {
        file.base_url = Some(url.clone());
        changed = true;
    }
    changed
}

/// `config --save`: persists the global options as new defaults.
pub fn save_overrides(path: &Path, cli: &Overrides) -> Result<bool> {
    let mut file = Config::load_from(path);
    if !apply_overrides(&mut file, cli) {
        return Ok(false);
    }
    file.save_to(path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(true)
}

pub fn cmd_config(cli: &Overrides, save: bool, env: impl Fn(&str) -> Option<String>) -> Result<()> {
    let path = Config::path();

    if save {
        let path = path.as_deref().context("Cannot locate home directory for config file")?;
        if save_overrides(path, cli)? {
            display::success(&format!("Saved defaults to {}", path.display()));
        } else {
            display::warning("Nothing to save. Pass --model, --provider, --max-tokens, --temperature or --base-url.");
        }
    }

    let file = match &path {
        Some(p) => Config::load_from(p),
        None => Config::default(),
    };

    display::header("⚙️  Configuration");
    println!(
        "Config file: {}",
        path.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(unknown)".into())
    );
    println!("model:       {}", resolve_model_key(cli, &file, &env));

    match AiConfig::resolve(cli, &file, &env) {
        Ok(ai) => {
            println!("provider:    {}", ai.provider);
            println!("wire model:  {}", ai.model);
            println!("base_url:    {}", ai.base_url);
            println!("max_tokens:  {}", ai.max_tokens);
            println!("temperature: {}", ai.temperature);
            println!("api_key:     {} (env: {})", mask_key(&ai.api_key), ai.provider.api_key_env());
        }
        Err(e) => println!("{}", style(format!("⚠️  {}", e)).yellow()),
    }
    Ok(())
}
