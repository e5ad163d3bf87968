// src/commands/status.rs
use anyhow::Result;

use crate::display::{self, display_change_summary};
use crate::error::GitError;
use crate::git::{change_summary, ChangeSummary, GitClient};

pub fn cmd_status(git: &dyn GitClient) -> Result<ChangeSummary> {
    if !git.is_repository() {
        return Err(GitError::NotARepository.into());
    }

    let summary = change_summary(git)?;
    display::header("📊 Git Status Summary");
    display_change_summary(&summary);

    if summary.is_empty() {
        display::notice("💡 Stage some changes with \"git add\" to generate a commit message.");
    } else {
        display::success(&format!(
            "Ready to generate commit message for {} file(s).",
            summary.total_files
        ));
        display::notice("Run \"git-commit-ai generate\" to create a commit message.");
    }
    Ok(summary)
}
