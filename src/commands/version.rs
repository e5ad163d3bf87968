// src/commands/version.rs

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_line() -> String {
    format!("git-commit-ai {}", VERSION)
}

pub fn cmd_version() {
    println!("{}", version_line());
}
