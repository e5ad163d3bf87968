// src/display.rs
use console::{style, StyledObject};

use crate::git::{ChangeKind, ChangeSummary, FileChange};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Red,
    Yellow,
}

/// Added files are green, deletions red, everything else yellow.
pub fn status_color(kind: ChangeKind) -> StatusColor {
    match kind {
        ChangeKind::Added => StatusColor::Green,
        ChangeKind::Deleted => StatusColor::Red,
        _ => StatusColor::Yellow,
    }
}

fn paint(file: &FileChange) -> StyledObject<&str> {
    let s = style(file.status.as_str());
    match status_color(file.kind()) {
        StatusColor::Green => s.green(),
        StatusColor::Red => s.red(),
        StatusColor::Yellow => s.yellow(),
    }
}

pub fn format_change_line(file: &FileChange) -> String {
    format!("  {} {} ({})", paint(file), file.filename, file.status_description)
}

pub fn display_change_summary(summary: &ChangeSummary) {
    if summary.is_empty() {
        println!("{}", style("No staged changes found.").yellow());
        return;
    }

    println!(
        "{}",
        style(format!("\n📁 Files to be committed ({}):", summary.total_files)).blue().bold()
    );
    for file in &summary.files {
        println!("{}", format_change_line(file));
    }
    println!();
}

pub fn display_commit_message(message: &str) {
    println!("{}", style("\n✨ Generated Commit Message:").green());
    println!("{}", style(format!("\"{}\"", message)).white());
    println!();
}

pub fn header(text: &str) {
    println!("{}", style(format!("\n{}\n", text)).cyan().bold());
}

pub fn notice(text: &str) {
    println!("{}", style(text).blue());
}

pub fn success(text: &str) {
    println!("{}", style(text).green());
}

pub fn warning(text: &str) {
    println!("{}", style(text).yellow());
}
