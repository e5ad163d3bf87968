// src/conventional.rs
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static VALID_COMMIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(feat|fix|docs|style|refactor|test|chore|perf|ci|build)(\(.+\))?: .{1,50}$")
        .expect("conventional commit pattern compiles")
});

static COMMIT_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(feat|fix|docs|style|refactor|test|chore|perf|ci|build)(\((.+)\))?: (.+)$")
        .expect("conventional commit pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Test,
    Chore,
    Perf,
    Ci,
    Build,
}

impl CommitType {
    pub const ALL: [CommitType; 10] = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Docs,
        CommitType::Style,
        CommitType::Refactor,
        CommitType::Test,
        CommitType::Chore,
        CommitType::Perf,
        CommitType::Ci,
        CommitType::Build,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
            CommitType::Perf => "perf",
            CommitType::Ci => "ci",
            CommitType::Build => "build",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalCommit {
    pub commit_type: Option<CommitType>,
    pub scope: Option<String>,
    pub description: String,
    pub is_valid: bool,
}

/// Strict check used to warn about generated messages: header description is
/// capped at 50 characters.
pub fn is_valid_conventional_commit(message: &str) -> bool {
    VALID_COMMIT.is_match(message)
}

pub fn parse_conventional_commit(message: &str) -> ConventionalCommit {
    let Some(caps) = COMMIT_PARTS.captures(message) else {
        return ConventionalCommit {
            commit_type: None,
            scope: None,
            description: message.to_string(),
            is_valid: false,
        };
    };

    ConventionalCommit {
        commit_type: CommitType::parse(&caps[1]),
        scope: caps.get(3).map(|m| m.as_str().to_string()),
        description: caps[4].to_string(),
        is_valid: true,
    }
}

/// Trims model output and drops one wrapping quote from each end.
pub fn clean_message(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix(['"', '\'']).unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix(['"', '\'']).unwrap_or(trimmed);
    trimmed.to_string()
}
