// src/main.rs
mod catalog;
mod cli;
mod client;
mod commands;
mod config;
mod conventional;
mod display;
mod error;
mod git;
mod interactive;
mod prompts;
mod providers;
mod types;

use anyhow::Result;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::{debug, level_filters::LevelFilter, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use client::LlmClient;
use commands::GenerateOptions;
use config::{process_env, resolve_model_key, AiConfig, Config};
use error::GitError;
use git::SystemGit;
use interactive::{install_interrupt_handler, TerminalPrompter};

/// WARN unless RUST_LOG says otherwise; `--debug` raises the global level.
fn log_filter(debug: bool, rust_log: Option<&str>) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(rust_log.unwrap_or_default());
    if debug {
        filter.add_directive(Level::DEBUG.into())
    } else {
        filter
    }
}

fn init_tracing(debug: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(debug, rust_log.as_deref()))
        .try_init();
}

fn build_client(cli: &Cli, file: &Config) -> Result<LlmClient> {
    let config = AiConfig::resolve(&cli.overrides(), file, process_env)?;
    LlmClient::new(config)
}

async fn run(mut cli: Cli) -> Result<()> {
    let file = Config::load();
    let git = SystemGit;

    let command = cli
        .command
        .take()
        .unwrap_or(Commands::Generate { dry_run: false, yes: false, push: false });
    debug!(?command, "dispatching");

    match command {
        Commands::Generate { dry_run, yes, push } => {
            install_interrupt_handler();
            let client = build_client(&cli, &file)?;
            let opts = GenerateOptions { dry_run, yes, push, debug: cli.debug };
            commands::run_generate(&git, &client, &TerminalPrompter, opts).await?;
        }
        Commands::Commit { all, staged: _ } => {
            let client = build_client(&cli, &file)?;
            commands::cmd_commit(&git, &client, all).await?;
        }
        Commands::Status => {
            commands::cmd_status(&git)?;
        }
        Commands::Model { refresh } => {
            let current = resolve_model_key(&cli.overrides(), &file, process_env);
            let key = process_env("OPENROUTER_API_KEY").filter(|k| !k.trim().is_empty());
            commands::cmd_model(&current, key, refresh).await?;
        }
        Commands::Version => commands::cmd_version(),
        Commands::Config { save } => {
            commands::cmd_config(&cli.overrides(), save, process_env)?;
        }
    }
    Ok(())
}

fn report(err: &anyhow::Error, debug: bool) {
    println!("{}", style(format!("❌ {:#}", err)).red());
    if debug {
        println!("{}", style(format!("{:?}", err)).yellow());
    }
    if matches!(err.downcast_ref::<GitError>(), Some(GitError::NothingStaged)) {
        println!("{}", style("💡 Tip: Use \"git add <files>\" to stage your changes first.").yellow());
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.debug);
    let debug = cli.debug;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e, debug);
            ExitCode::FAILURE
        }
    }
}
