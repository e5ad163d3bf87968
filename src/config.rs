// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::error::AiError;
use crate::providers::{self, Provider, OPENROUTER_URL};

pub const DEFAULT_MODEL: &str = "openrouter/mistralai/mistral-7b-instruct:free";
pub const DEFAULT_MAX_TOKENS: u32 = 200;
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

pub const ENV_MODEL: &str = "GIT_COMMIT_AI_MODEL";
pub const ENV_OPENROUTER_MODEL: &str = "OPENROUTER_MODEL";
pub const ENV_MAX_TOKENS: &str = "GIT_COMMIT_AI_MAX_TOKENS";
pub const ENV_TEMPERATURE: &str = "GIT_COMMIT_AI_TEMPERATURE";
pub const ENV_BASE_URL: &str = "GIT_COMMIT_AI_BASE_URL";

// =============================================================================
// CONFIG FILE
// =============================================================================
pub const CONFIG_DIRNAME: &str = ".git-commit-ai";
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Config {
    pub model: Option<String>,
    pub provider: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub base_url: Option<String>,
}

impl Config {
    pub fn dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(CONFIG_DIRNAME))
    }

    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join(CONFIG_FILENAME))
    }

    pub fn load() -> Self {
        match Self::path() {
            Some(p) => Self::load_from(&p),
            None => Self::default(),
        }
    }

    /// Missing files yield defaults; unreadable TOML is reported and ignored.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring invalid config file");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }
}

// =============================================================================
// AI CONFIG
// =============================================================================

/// Values given on the command line; they win over everything else.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub model: Option<String>,
    pub provider: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiConfig {
    pub provider: Provider,
    /// Key as the user wrote it, e.g. `cerebras/zai-glm-4.6`.
    pub model_key: String,
    /// Id sent on the wire.
    pub model: String,
    pub api_key: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl AiConfig {
    /// OpenRouter configuration with default tuning.
    pub fn openrouter(api_key: &str, model: &str) -> Result<Self, AiError> {
        if api_key.trim().is_empty() {
            return Err(AiError::EmptyApiKey);
        }
        if model.trim().is_empty() {
            return Err(AiError::MissingModel);
        }
        Ok(Self {
            provider: Provider::OpenRouter,
            model_key: format!("{}/{}", Provider::OpenRouter.id(), model),
            model: model.to_string(),
            api_key: api_key.to_string(),
            base_url: OPENROUTER_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        })
    }

    /// Resolves the run's AI settings.
    ///
    /// Priority: CLI > environment > config file > defaults. The provider comes
    /// from the model key prefix when it names one, else from `--provider`, the
    /// config file, or OpenRouter.
    pub fn resolve(
        cli: &Overrides,
        file: &Config,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AiError> {
        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        let model_key = resolve_model_key(cli, file, &env);
        if model_key.is_empty() {
            return Err(AiError::MissingModel);
        }

        let (provider, model) = match providers::split_model_key(&model_key) {
            Some((p, m)) => (p, m.to_string()),
            None => {
                let name = cli.provider.as_deref().or(file.provider.as_deref());
                let provider = match name {
                    Some(n) => Provider::from_id(n).ok_or_else(|| AiError::UnknownProvider(n.to_string()))?,
                    None => Provider::OpenRouter,
                };
                (provider, model_key.clone())
            }
        };
        if model.is_empty() {
            return Err(AiError::MissingModel);
        }

        let registered = provider.models();
        if !registered.is_empty() && !registered.contains(&model.as_str()) {
            return Err(AiError::UnknownModel {
                model: model_key.clone(),
                available: providers::model_keys().join(", "),
            });
        }

        let wire_model = if provider == Provider::Vachin {
            env(providers::vachin_endpoint_var(&model).as_str()).unwrap_or_else(|| model.clone())
        } else {
            model.clone()
        };

        let base_url = match provider.default_base_url() {
            Some(url) => url.to_string(),
            None => cli
                .base_url
                .clone()
                .or_else(|| env(ENV_BASE_URL))
                .or_else(|| file.base_url.clone())
                .ok_or_else(|| AiError::MissingBaseUrl(provider.id().to_string()))?,
        };

        let var = provider.api_key_env();
        let api_key = env(var).ok_or_else(|| AiError::MissingApiKey { var: var.to_string() })?;

        let max_tokens = cli
            .max_tokens
            .or_else(|| parse_env(&env, ENV_MAX_TOKENS))
            .or(file.max_tokens)
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let temperature = cli
            .temperature
            .or_else(|| parse_env(&env, ENV_TEMPERATURE))
            .or(file.temperature)
            .unwrap_or(DEFAULT_TEMPERATURE);

        debug!(provider = %provider, model = %wire_model, max_tokens, temperature, "resolved AI config");

        Ok(Self {
            provider,
            model_key,
            model: wire_model,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_tokens,
            temperature,
        })
    }
}

/// The model key alone, without touching provider credentials.
pub fn resolve_model_key(cli: &Overrides, file: &Config, env: impl Fn(&str) -> Option<String>) -> String {
    let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());
    cli.model
        .clone()
        .or_else(|| env(ENV_MODEL))
        .or_else(|| env(ENV_OPENROUTER_MODEL))
        .or_else(|| file.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
        .trim()
        .to_string()
}

fn parse_env<T: std::str::FromStr>(env: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = env(name)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = name, value = %raw, "ignoring unparsable value");
            None
        }
    }
}

/// Reads the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

// =============================================================================
// MODULE TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn openrouter_config_rejects_empty_key() {
        assert!(matches!(AiConfig::openrouter("", "test-model"), Err(AiError::EmptyApiKey)));
        assert!(matches!(AiConfig::openrouter("  ", "test-model"), Err(AiError::EmptyApiKey)));
    }

    #[test]
    fn openrouter_config_echoes_inputs() {
        let config = AiConfig::openrouter("test-key", "test-model").unwrap();
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.model, "test-model");
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
    }

    #[test]
    fn resolve_uses_defaults() {
        let env = env_of(&[("OPENROUTER_API_KEY", "or-key")]);
        let config = AiConfig::resolve(&Overrides::default(), &Config::default(), env).unwrap();
        assert_eq!(config.provider, Provider::OpenRouter);
        assert_eq!(config.model, "mistralai/mistral-7b-instruct:free");
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(config.base_url, OPENROUTER_URL);
    }

    #[test]
    fn model_key_resolves_without_credentials() {
        let file = Config { model: Some("cerebras/zai-glm-4.6".into()), ..Default::default() };
        assert_eq!(resolve_model_key(&Overrides::default(), &file, env_of(&[])), "cerebras/zai-glm-4.6");
        assert_eq!(resolve_model_key(&Overrides::default(), &Config::default(), env_of(&[])), DEFAULT_MODEL);
        let env = env_of(&[("GIT_COMMIT_AI_MODEL", "  "), ("OPENROUTER_MODEL", "openrouter/x")]);
        assert_eq!(resolve_model_key(&Overrides::default(), &file, env), "openrouter/x");
    }

    #[test]
    fn resolve_missing_key_names_variable() {
        let cli = Overrides { model: Some("cerebras/zai-glm-4.6".into()), ..Default::default() };
        match AiConfig::resolve(&cli, &Config::default(), env_of(&[])) {
            Err(AiError::MissingApiKey { var }) => assert_eq!(var, "CEREBRAS_API_KEY"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn resolve_env_model_and_tuning() {
        let env = env_of(&[
            ("GIT_COMMIT_AI_MODEL", "kimi/kimi-for-coding"),
            ("KIMI_API_KEY", "kimi-key"),
            ("GIT_COMMIT_AI_MAX_TOKENS", "512"),
            ("GIT_COMMIT_AI_TEMPERATURE", "0.7"),
        ]);
        let config = AiConfig::resolve(&Overrides::default(), &Config::default(), env).unwrap();
        assert_eq!(config.provider, Provider::Kimi);
        assert_eq!(config.model, "kimi-for-coding");
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.temperature, 0.7);
    }

    #[test]
    fn resolve_cli_beats_env_beats_file() {
        let env = env_of(&[
            ("GIT_COMMIT_AI_MODEL", "zai-coding-plan/glm-4.5"),
            ("ZAI_API_KEY", "zai"),
            ("CEREBRAS_API_KEY", "cb"),
            ("GIT_COMMIT_AI_MAX_TOKENS", "300"),
        ]);
        let file = Config {
            model: Some("kimi/kimi-for-coding".into()),
            max_tokens: Some(100),
            temperature: Some(0.9),
            ..Default::default()
        };
        let from_env = AiConfig::resolve(&Overrides::default(), &file, &env).unwrap();
        assert_eq!(from_env.model_key, "zai-coding-plan/glm-4.5");
        assert_eq!(from_env.max_tokens, 300);
        assert_eq!(from_env.temperature, 0.9);

        let cli = Overrides {
            model: Some("cerebras/zai-glm-4.6".into()),
            max_tokens: Some(42),
            ..Default::default()
        };
        let from_cli = AiConfig::resolve(&cli, &file, &env).unwrap();
        assert_eq!(from_cli.provider, Provider::Cerebras);
        assert_eq!(from_cli.max_tokens, 42);
    }

    #[test]
    fn resolve_openrouter_model_env() {
        let env = env_of(&[("OPENROUTER_MODEL", "meta-llama/llama-3.3-70b-instruct:free"), ("OPENROUTER_API_KEY", "k")]);
        let config = AiConfig::resolve(&Overrides::default(), &Config::default(), env).unwrap();
        assert_eq!(config.provider, Provider::OpenRouter);
        assert_eq!(config.model, "meta-llama/llama-3.3-70b-instruct:free");
    }

    #[test]
    fn resolve_unparsable_env_tuning_falls_back() {
        let env = env_of(&[("OPENROUTER_API_KEY", "k"), ("GIT_COMMIT_AI_MAX_TOKENS", "lots")]);
        let config = AiConfig::resolve(&Overrides::default(), &Config::default(), env).unwrap();
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn resolve_unknown_registered_model() {
        let cli = Overrides { model: Some("cerebras/llama-9000".into()), ..Default::default() };
        let env = env_of(&[("CEREBRAS_API_KEY", "cb")]);
        match AiConfig::resolve(&cli, &Config::default(), env) {
            Err(AiError::UnknownModel { model, available }) => {
                assert_eq!(model, "cerebras/llama-9000");
                assert!(available.contains("cerebras/zai-glm-4.6"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn resolve_bare_model_uses_provider_flag() {
        let cli = Overrides {
            model: Some("glm-4.6".into()),
            provider: Some("zai".into()),
            ..Default::default()
        };
        let env = env_of(&[("ZAI_API_KEY", "z")]);
        let config = AiConfig::resolve(&cli, &Config::default(), env).unwrap();
        assert_eq!(config.provider, Provider::ZaiCodingPlan);
        assert_eq!(config.base_url, "https://api.z.ai/api/coding/paas/v4");
    }

    #[test]
    fn resolve_rejects_unknown_provider_flag() {
        let cli = Overrides {
            model: Some("gpt-4".into()),
            provider: Some("nope".into()),
            ..Default::default()
        };
        assert!(matches!(
            AiConfig::resolve(&cli, &Config::default(), env_of(&[])),
            Err(AiError::UnknownProvider(_))
        ));
    }

    #[test]
    fn resolve_generic_provider_needs_base_url() {
        let cli = Overrides { model: Some("openai-compatible/local-model".into()), ..Default::default() };
        let env = env_of(&[("GIT_COMMIT_AI_API_KEY", "x")]);
        assert!(matches!(
            AiConfig::resolve(&cli, &Config::default(), &env),
            Err(AiError::MissingBaseUrl(_))
        ));

        let cli = Overrides { base_url: Some("http://localhost:8080/v1/".into()), ..cli };
        let config = AiConfig::resolve(&cli, &Config::default(), &env).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.model, "local-model");
    }

    #[test]
    fn resolve_vachin_uses_endpoint_id() {
        let cli = Overrides { model: Some("vachin/kat-coder-pro".into()), ..Default::default() };
        let env = env_of(&[("VC_API_KEY", "vc"), ("VC_KAT_CODER_PRO_ENDPOINT", "ep-123")]);
        let config = AiConfig::resolve(&cli, &Config::default(), env).unwrap();
        assert_eq!(config.model, "ep-123");
        assert_eq!(config.model_key, "vachin/kat-coder-pro");
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILENAME);
        let config = Config {
            model: Some("kimi/kimi-for-coding".into()),
            temperature: Some(0.2),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path);
        assert_eq!(loaded.model, config.model);
        assert_eq!(loaded.temperature, Some(0.2));
        assert!(loaded.max_tokens.is_none());
    }

    #[test]
    fn config_invalid_toml_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "model = [not toml").unwrap();
        assert!(Config::load_from(&path).model.is_none());
        assert!(Config::load_from(&dir.path().join("missing.toml")).model.is_none());
    }
}
