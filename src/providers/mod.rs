// src/providers/mod.rs
pub mod anthropic;
pub mod openai;

use std::fmt;

// =============================================================================
// PROVIDER CONSTANTS
// =============================================================================
pub const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1";
pub const CEREBRAS_URL: &str = "https://api.cerebras.ai/v1";
pub const KIMI_URL: &str = "https://api.kimi.com/coding/v1";
pub const OLLAMA_CLOUD_URL: &str = "https://ollama.com/v1";
pub const ZAI_CODING_PLAN_URL: &str = "https://api.z.ai/api/coding/paas/v4";
pub const VACHIN_URL: &str = "https://vanchin.streamlake.ai/api/gateway/v1/endpoints";

/// Request/response dialect spoken by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wire {
    OpenAi,
    Anthropic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenRouter,
    Cerebras,
    Kimi,
    OllamaCloud,
    ZaiCodingPlan,
    Vachin,
    OpenAiCompatible,
}

impl Provider {
    pub const ALL: [Provider; 7] = [
        Provider::OpenRouter,
        Provider::Cerebras,
        Provider::Kimi,
        Provider::OllamaCloud,
        Provider::ZaiCodingPlan,
        Provider::Vachin,
        Provider::OpenAiCompatible,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Provider::OpenRouter => "openrouter",
            Provider::Cerebras => "cerebras",
            Provider::Kimi => "kimi",
            Provider::OllamaCloud => "ollama-cloud",
            Provider::ZaiCodingPlan => "zai-coding-plan",
            Provider::Vachin => "vachin",
            Provider::OpenAiCompatible => "openai-compatible",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "openrouter" => Some(Provider::OpenRouter),
            "cerebras" => Some(Provider::Cerebras),
            "kimi" => Some(Provider::Kimi),
            "ollama-cloud" | "ollama" => Some(Provider::OllamaCloud),
            "zai-coding-plan" | "zai" => Some(Provider::ZaiCodingPlan),
            "vachin" => Some(Provider::Vachin),
            "openai-compatible" | "openai" | "custom" => Some(Provider::OpenAiCompatible),
            _ => None,
        }
    }

    /// Fixed endpoint; `None` for the generic provider, whose URL is configured.
    pub fn default_base_url(self) -> Option<&'static str> {
        match self {
            Provider::OpenRouter => Some(OPENROUTER_URL),
            Provider::Cerebras => Some(CEREBRAS_URL),
            Provider::Kimi => Some(KIMI_URL),
            Provider::OllamaCloud => Some(OLLAMA_CLOUD_URL),
            Provider::ZaiCodingPlan => Some(ZAI_CODING_PLAN_URL),
            Provider::Vachin => Some(VACHIN_URL),
            Provider::OpenAiCompatible => None,
        }
    }

    pub fn api_key_env(self) -> &'static str {
        match self {
            Provider::OpenRouter => "OPENROUTER_API_KEY",
            Provider::Cerebras => "CEREBRAS_API_KEY",
            Provider::Kimi => "KIMI_API_KEY",
            Provider::OllamaCloud => "OLLAMA_API_KEY",
            Provider::ZaiCodingPlan => "ZAI_API_KEY",
            Provider::Vachin => "VC_API_KEY",
            Provider::OpenAiCompatible => "GIT_COMMIT_AI_API_KEY",
        }
    }

    pub fn wire(self) -> Wire {
        match self {
            Provider::Kimi => Wire::Anthropic,
            _ => Wire::OpenAi,
        }
    }

    /// Statically registered models. An empty list means any model id is accepted.
    pub fn models(self) -> &'static [&'static str] {
        match self {
            Provider::Cerebras => &["zai-glm-4.6"],
            Provider::Kimi => &["kimi-for-coding"],
            Provider::OllamaCloud => &[
                "deepseek-v3.1:671b",
                "gpt-oss:20b",
                "gpt-oss:120b",
                "kimi-k2:1t",
                "qwen3-coder:480b",
                "glm-4.6",
                "minimax-m2",
                "kimi-k2-thinking",
            ],
            Provider::ZaiCodingPlan => &["glm-4.6", "glm-4.5", "glm-4.5-air", "glm-4.5-flash"],
            Provider::Vachin => &["kat-coder-pro", "kat-coder-air"],
            Provider::OpenRouter | Provider::OpenAiCompatible => &[],
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Every statically registered `<provider>/<model>` key.
pub fn model_keys() -> Vec<String> {
    Provider::ALL
        .iter()
        .flat_map(|p| p.models().iter().map(move |m| format!("{}/{}", p.id(), m)))
        .collect()
}

/// Splits `<provider>/<model>`; keys without a known provider prefix yield `None`.
pub fn split_model_key(key: &str) -> Option<(Provider, &str)> {
    let (prefix, model) = key.split_once('/')?;
    let provider = Provider::from_id(prefix)?;
    Some((provider, model))
}

/// Vachin models are addressed by per-account endpoint ids such as
/// `VC_KAT_CODER_PRO_ENDPOINT`.
pub fn vachin_endpoint_var(model: &str) -> String {
    format!("VC_{}_ENDPOINT", model.to_uppercase().replace(['-', '.', ':'], "_"))
}
