//! Output formatting
//!
//! Answers carry lightweight markup: `## headings`, `**bold**` and fenced
//! code blocks. They are turned into terminal styling here; everything
//! else prints as-is.

use owo_colors::OwoColorize;
use regex::{Captures, Regex};
use std::sync::LazyLock;

pub const THIN_SEPARATOR: &str = "------------------------------------------------------------";

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6}\s+(.*)$").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

/// Convert markup to styled terminal text
pub fn render_markup(content: &str) -> String {
    let mut out = Vec::new();
    let mut in_code = false;

    for line in content.lines() {
        if line.trim_start().starts_with("```") {
            in_code = !in_code;
            continue;
        }

        if in_code {
            out.push(format!("    {}", line.bright_white()));
        } else if let Some(caps) = HEADING.captures(line) {
            let heading = &caps[1];
            out.push(heading.bold().bright_cyan().to_string());
        } else {
            let styled = BOLD.replace_all(line, |c: &Captures<'_>| (&c[1]).bold().to_string());
            out.push(styled.into_owned());
        }
    }

    out.join("\n")
}

/// Display an answer
pub fn display_response(content: &str) {
    println!();
    println!("{}", render_markup(content));
    println!();
    println!("{}", THIN_SEPARATOR.dimmed());
}

/// Display a warning the learner can act on
pub fn display_warning(message: &str) {
    println!();
    println!("{} {}", "[WARNING]".yellow(), message.yellow());
    println!();
}

/// Display an informational note
pub fn display_info(message: &str) {
    println!("{} {}", "[INFO]".cyan(), message);
}

/// Display an error
pub fn display_error(message: &str) {
    eprintln!();
    eprintln!("{} {}", "[ERROR]".red(), message.red());
    eprintln!();
}
