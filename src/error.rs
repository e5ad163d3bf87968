// src/error.rs
use thiserror::Error;

/// Errors from the git subprocess layer.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not in a git repository.")]
    NotARepository,

    #[error("No staged changes found. Please stage your changes with \"git add\" first.")]
    NothingStaged,

    #[error("Failed to execute git: {0}")]
    Spawn(std::io::Error),

    #[error("Git error (git {args}): {stderr}")]
    Command { args: String, stderr: String },
}

/// Errors from configuration resolution and AI dispatch.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("API key is required.")]
    EmptyApiKey,

    #[error("{var} not found. Add it to your .env file or export it in your shell.")]
    MissingApiKey { var: String },

    #[error("Model is required. Set GIT_COMMIT_AI_MODEL in your .env file or use --model.")]
    MissingModel,

    #[error("Model \"{model}\" not found. Available models: {available}")]
    UnknownModel { model: String, available: String },

    #[error("Unknown provider \"{0}\"")]
    UnknownProvider(String),

    #[error("No base URL configured for {0}. Set GIT_COMMIT_AI_BASE_URL or use --base-url.")]
    MissingBaseUrl(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("No response content from API")]
    EmptyCompletion,
}

/// Outcomes of the review step that end the run with a failure.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Empty commit message. Commit cancelled.")]
    EmptyMessage,

    #[error("Commit failed: {0}")]
    CommitFailed(GitError),

    #[error("Push failed: {0}")]
    PushFailed(GitError),
}
