// src/cli.rs
use clap::{Parser, Subcommand};

use crate::config::Overrides;

#[derive(Parser)]
#[command(
    name = "git-commit-ai",
    version,
    about = "AI-powered git commit message generator using conventional commit guidelines",
    after_help = "EXAMPLES:
    git-commit-ai                                   # Generate, review and commit staged changes
    git-commit-ai generate --dry-run                # Only show the generated message
    git-commit-ai g -y --push                       # Commit and push without prompting
    git-commit-ai --model cerebras/zai-glm-4.6 gen  # Pick a provider/model
    git-commit-ai commit --all                      # Stage everything and commit
    git-commit-ai model --refresh                   # Re-fetch free OpenRouter models"
)]
pub struct Cli {
    /// Model key as <provider>/<model> (overrides GIT_COMMIT_AI_MODEL)
    #[arg(short = 'm', long, global = true)]
    pub model: Option<String>,

    /// Provider for a model given without a provider prefix
    #[arg(
        long,
        global = true,
        value_parser = [
            "openrouter", "cerebras", "kimi", "ollama-cloud", "ollama",
            "zai-coding-plan", "zai", "vachin", "openai-compatible", "openai", "custom",
        ]
    )]
    pub provider: Option<String>,

    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    #[arg(long, global = true)]
    pub temperature: Option<f32>,

    /// Base URL for the openai-compatible provider
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Enable debug output
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            model: self.model.clone(),
            provider: self.provider.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            base_url: self.base_url.clone(),
        }
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Generate a conventional commit message for staged changes (default)
    #[command(visible_aliases = ["gen", "g"])]
    Generate {
        /// Generate message without committing
        #[arg(long)]
        dry_run: bool,

        /// Auto-accept generated message without prompting
        #[arg(short = 'y', long)]
        yes: bool,

        /// Push after committing without asking
        #[arg(short = 'p', long)]
        push: bool,
    },

    /// Generate a message and commit immediately
    #[command(visible_alias = "c")]
    Commit {
        /// No-op: staged changes are always used unless --all is given
        #[arg(long, conflicts_with = "all")]
        staged: bool,

        /// Stage all changes before committing (`git add -A`)
        #[arg(short = 'a', long)]
        all: bool,
    },

    /// Show current git status and staged changes
    #[command(visible_alias = "s")]
    Status,

    /// List available model keys
    #[command(visible_alias = "m")]
    Model {
        /// Ignore the cached OpenRouter catalog
        #[arg(long)]
        refresh: bool,
    },

    /// Print the version
    #[command(visible_alias = "v")]
    Version,

    /// Show the resolved configuration
    Config {
        /// Store the given global options in the config file
        #[arg(long)]
        save: bool,
    },
}
