// src/git.rs
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

// =============================================================================
// CHANGE MODEL
// =============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    Unmerged,
    Other,
}

impl ChangeKind {
    pub fn from_status(status: &str) -> Self {
        match status {
            "A" => ChangeKind::Added,
            "M" => ChangeKind::Modified,
            "D" => ChangeKind::Deleted,
            "R" => ChangeKind::Renamed,
            "C" => ChangeKind::Copied,
            "U" => ChangeKind::Unmerged,
            _ => ChangeKind::Other,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Renamed => "renamed",
            ChangeKind::Copied => "copied",
            ChangeKind::Unmerged => "unmerged",
            ChangeKind::Other => "changed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub status: String,
    pub filename: String,
    pub status_description: String,
}

impl FileChange {
    pub fn kind(&self) -> ChangeKind {
        ChangeKind::from_status(&self.status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    pub files: Vec<FileChange>,
    pub total_files: usize,
    pub all_deletions: bool,
}

impl ChangeSummary {
    pub fn new(files: Vec<FileChange>) -> Self {
        let all_deletions = !files.is_empty() && files.iter().all(|f| f.status == "D");
        Self {
            total_files: files.len(),
            files,
            all_deletions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

pub fn status_description(status: &str) -> &'static str {
    ChangeKind::from_status(status).description()
}

/// Parses one `git diff --name-status` line.
///
/// Rename and copy lines carry a similarity score (`R100\told\tnew`); the
/// status is reduced to its letter and the destination path is kept.
pub fn parse_name_status_line(line: &str) -> Option<FileChange> {
    let mut fields = line.split('\t');
    let raw_status = fields.next()?.trim();
    let paths: Vec<&str> = fields.collect();
    let filename = *paths.last()?;

    let status = match raw_status.chars().next() {
        Some(c @ ('R' | 'C')) if raw_status[1..].chars().all(|d| d.is_ascii_digit()) => c.to_string(),
        _ => raw_status.to_string(),
    };

    Some(FileChange {
        status_description: status_description(&status).to_string(),
        status,
        filename: filename.to_string(),
    })
}

pub fn parse_name_status(output: &str) -> ChangeSummary {
    let files = output
        .trim()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| {
            let change = parse_name_status_line(l);
            if change.is_none() {
                debug!(line = l, "skipping malformed name-status line");
            }
            change
        })
        .collect();
    ChangeSummary::new(files)
}

// =============================================================================
// GIT CLIENT
// =============================================================================

/// The git operations the commit pipeline needs.
pub trait GitClient {
    fn is_repository(&self) -> bool;
    /// Raw `git diff --cached --name-status` output.
    fn name_status(&self) -> Result<String, GitError>;
    /// Staged unified diff without deleted files.
    fn diff_cached(&self) -> Result<String, GitError>;
    fn stage_all(&self) -> Result<(), GitError>;
    /// Returns git's stdout on success.
    fn commit(&self, message: &str) -> Result<String, GitError>;
    fn push(&self) -> Result<String, GitError>;
}

/// Shells out to the `git` binary on `PATH` in the current directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemGit;

impl GitClient for SystemGit {
    fn is_repository(&self) -> bool {
        Command::new("git")
            .args(["rev-parse", "--git-dir"])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn name_status(&self) -> Result<String, GitError> {
        run_git(&["diff", "--cached", "--name-status"])
    }

    fn diff_cached(&self) -> Result<String, GitError> {
        run_git(&["diff", "--cached", "--diff-filter=d"])
    }

    fn stage_all(&self) -> Result<(), GitError> {
        run_git(&["add", "-A"]).map(|_| ())
    }

    fn commit(&self, message: &str) -> Result<String, GitError> {
        run_git(&["commit", "-m", message])
    }

    fn push(&self) -> Result<String, GitError> {
        run_git(&["push"])
    }
}

pub fn run_git(args: &[&str]) -> Result<String, GitError> {
    debug!(?args, "running git");
    let output = Command::new("git")
        .args(args)
        .output()
        .map_err(GitError::Spawn)?;

    if !output.status.success() {
        return Err(GitError::Command {
            args: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

// =============================================================================
// PIPELINE HELPERS
// =============================================================================
pub fn change_summary(git: &dyn GitClient) -> Result<ChangeSummary, GitError> {
    Ok(parse_name_status(&git.name_status()?))
}

pub fn staged_diff(git: &dyn GitClient) -> Result<String, GitError> {
    let diff = git.diff_cached()?;
    if diff.trim().is_empty() {
        return Err(GitError::NothingStaged);
    }
    Ok(diff)
}

/// Collects the summary and, unless every change is a deletion, the diff.
pub fn staged_changes(git: &dyn GitClient) -> Result<(ChangeSummary, String), GitError> {
    let summary = change_summary(git)?;
    if summary.all_deletions {
        return Ok((summary, String::new()));
    }
    let diff = staged_diff(git)?;
    Ok((summary, diff))
}

pub fn truncate_diff(diff: String, max: usize) -> String {
    if diff.len() <= max {
        return diff;
    }
    let mut cut = max;
    while !diff.is_char_boundary(cut) {
        cut -= 1;
    }
    let mut t = diff[..cut].to_string();
    if let Some(p) = t.rfind("\ndiff --git") {
        if p > max / 2 {
            t.truncate(p);
        }
    }
    t.push_str("\n\n[... truncated ...]");
    t
}
