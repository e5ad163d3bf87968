// src/commands/commit.rs
use anyhow::Result;
use tracing::info;

use super::generate::{collect_changes, generate_message};
use crate::client::Completer;
use crate::display;
use crate::error::{GitError, ReviewError};
use crate::git::GitClient;

/// Generates a message and commits straight away, without review or push.
/// Returns the committed message.
pub async fn cmd_commit(git: &dyn GitClient, completer: &dyn Completer, all: bool) -> Result<String> {
    if !git.is_repository() {
        return Err(GitError::NotARepository.into());
    }

    if all {
        println!("Staging all changes...");
        git.stage_all()?;
    }

    let (summary, diff) = collect_changes(git)?;

    println!("Generating commit message...");
    let message = generate_message(completer, &summary, &diff).await?;
    println!("\n{}\n", message);

    git.commit(&message).map_err(ReviewError::CommitFailed)?;
    display::success("Changes committed successfully!");
    info!(%message, "committed");
    Ok(message)
}

// =============================================================================
// MODULE TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::generate::tests::FakeCompleter;
    use crate::git::tests::FakeGit;

    #[tokio::test]
    async fn commits_generated_message() {
        let git = FakeGit::staged("M\tsrc/lib.rs\n", "diff --git a/src/lib.rs b/src/lib.rs\n+x\n");
        let completer = FakeCompleter::replying("'fix(core): handle empty input'");
        let message = cmd_commit(&git, &completer, false).await.unwrap();
        assert_eq!(message, "fix(core): handle empty input");
        assert_eq!(git.commits.borrow().as_slice(), ["fix(core): handle empty input".to_string()]);
        assert!(!*git.staged_all.borrow());
    }

    #[tokio::test]
    async fn all_stages_before_reading_changes() {
        let git = FakeGit::staged("A\tREADME.md\n", "diff --git a/README.md b/README.md\n+hi\n");
        let completer = FakeCompleter::replying("docs: add readme");
        cmd_commit(&git, &completer, true).await.unwrap();
        assert!(*git.staged_all.borrow());
        assert_eq!(git.commits.borrow().len(), 1);
    }

    #[tokio::test]
    async fn nothing_staged_is_an_error() {
        let git = FakeGit::staged("", "");
        let completer = FakeCompleter::replying("feat: x");
        let err = cmd_commit(&git, &completer, false).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<GitError>(), Some(GitError::NothingStaged)));
        assert!(git.commits.borrow().is_empty());
        assert!(completer.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn outside_repository_fails() {
        let git = FakeGit::default();
        let completer = FakeCompleter::replying("feat: x");
        let err = cmd_commit(&git, &completer, true).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<GitError>(), Some(GitError::NotARepository)));
        assert!(!*git.staged_all.borrow());
    }

    #[tokio::test]
    async fn commit_failure_propagates() {
        let git = FakeGit { fail_commit: true, ..FakeGit::staged("M\ta.rs\n", "diff\n+a\n") };
        let completer = FakeCompleter::replying("fix: a");
        let err = cmd_commit(&git, &completer, false).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<ReviewError>(), Some(ReviewError::CommitFailed(_))));
    }
}
