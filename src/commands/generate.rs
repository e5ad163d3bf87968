// src/commands/generate.rs
use anyhow::{Context, Result};
use console::style;
use tracing::{debug, info};

use crate::client::Completer;
use crate::conventional::{clean_message, is_valid_conventional_commit, parse_conventional_commit};
use crate::display::{self, display_change_summary, display_commit_message};
use crate::error::{GitError, ReviewError};
use crate::git::{staged_changes, truncate_diff, ChangeSummary, GitClient};
use crate::interactive::{review_message, CancelReason, Prompter, ReviewState};
use crate::prompts::{build_commit_prompt, COMMIT_SYSTEM_PROMPT, MAX_DIFF_CHARS};

const DEBUG_PREVIEW_CHARS: usize = 500;

#[derive(Debug, Default, Clone, Copy)]
pub struct GenerateOptions {
    pub dry_run: bool,
    pub yes: bool,
    pub push: bool,
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    DryRun(String),
    Committed { message: String, pushed: bool },
    Cancelled,
}

/// Repository check plus the staged summary and diff.
pub(crate) fn collect_changes(git: &dyn GitClient) -> Result<(ChangeSummary, String), GitError> {
    if !git.is_repository() {
        return Err(GitError::NotARepository);
    }
    staged_changes(git)
}

/// Asks the model for a message and cleans it up. A message that is not a
/// conventional commit is kept with a warning.
pub(crate) async fn generate_message(
    completer: &dyn Completer,
    summary: &ChangeSummary,
    diff: &str,
) -> Result<String> {
    let diff = truncate_diff(diff.to_string(), MAX_DIFF_CHARS);
    let prompt = build_commit_prompt(summary, &diff);
    debug!(model = completer.model(), prompt_len = prompt.len(), "requesting commit message");

    let raw = completer
        .complete(COMMIT_SYSTEM_PROMPT, &prompt)
        .await
        .context("AI generation failed")?;
    let message = clean_message(&raw);

    if is_valid_conventional_commit(&message) {
        let parsed = parse_conventional_commit(&message);
        debug!(commit_type = ?parsed.commit_type, scope = ?parsed.scope, "generated conventional commit");
    } else {
        display::warning("⚠️  Generated message doesn't follow conventional commit format exactly.");
    }
    Ok(message)
}

fn preview(diff: &str) -> &str {
    match diff.char_indices().nth(DEBUG_PREVIEW_CHARS) {
        Some((i, _)) => &diff[..i],
        None => diff,
    }
}

pub async fn run_generate(
    git: &dyn GitClient,
    completer: &dyn Completer,
    prompter: &dyn Prompter,
    opts: GenerateOptions,
) -> Result<GenerateOutcome> {
    display::header("🚀 Git Commit AI - Conventional Commit Generator");

    let (summary, diff) = collect_changes(git)?;
    display_change_summary(&summary);

    if opts.debug {
        println!("{}", style("Debug: Git diff preview:").yellow());
        println!("{}", style(format!("{}...", preview(&diff))).yellow());
        println!("{}", style(format!("Debug: Using model: {}", completer.model())).yellow());
        println!();
    }

    let message = generate_message(completer, &summary, &diff).await?;
    display_commit_message(&message);

    if opts.dry_run {
        display::notice("🏃 Dry run completed. Use without --dry-run to commit.");
        return Ok(GenerateOutcome::DryRun(message));
    }

    let message = if opts.yes {
        message
    } else {
        match review_message(prompter, &message)? {
            ReviewState::Submitted(m) => m,
            ReviewState::Cancelled(CancelReason::EmptyMessage) => return Err(ReviewError::EmptyMessage.into()),
            _ => {
                display::notice("📋 Commit cancelled. No commit was made.");
                return Ok(GenerateOutcome::Cancelled);
            }
        }
    };

    let out = git.commit(&message).map_err(ReviewError::CommitFailed)?;
    if !out.trim().is_empty() {
        println!("{}", out.trim_end());
    }
    display::success("✅ Successfully committed!");
    info!(%message, "committed");

    let push = if opts.push {
        true
    } else if opts.yes {
        false
    } else {
        prompter.confirm("Push changes to remote?", true)?
    };

    if !push {
        if !opts.yes {
            display::notice("📋 Push cancelled.");
        }
        return Ok(GenerateOutcome::Committed { message, pushed: false });
    }

    let out = git.push().map_err(ReviewError::PushFailed)?;
    if !out.trim().is_empty() {
        println!("{}", out.trim_end());
    }
    display::success("🚀 Successfully pushed changes!");
    Ok(GenerateOutcome::Committed { message, pushed: true })
}
