//! Input safety filter
//!
//! Two passes run before anything else sees a query:
//! - conversational stripping: greetings and small talk become empty input
//! - safety gating: empty input and banned keywords are blocked
//!
//! Banned keywords match as substrings anywhere in the text, so "skill"
//! is blocked because it contains "kill". Over-blocking is accepted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Greetings and small talk that carry no learning question
const CONVERSATIONAL_PHRASES: &[&str] = &[
    "hi",
    "hello",
    "how are you",
    "what's up",
    "good morning",
    "good evening",
    "good afternoon",
    "hey",
    "tell me about yourself",
    "who are you",
    "can you hear me",
    "how do you do",
    "what is your name",
    "are you there",
];

/// A phrase prefix only counts as small talk if the input is shorter than this many extra chars
const CONVERSATIONAL_SLACK: usize = 10;

const BANNED_KEYWORDS: &[&str] = &[
    "violence", "abuse", "hate", "racism", "sexism", "drugs", "alcohol", "porn", "nude", "kill",
    "murder", "gun", "knife", "bomb", "suicide", "rape", "molest", "nsfw", "onlyfans", "torture",
    "sniper", "snuff", "terror", "incest", "gore",
];

/// Notice shown to the user when a query is blocked
pub const BLOCKED_NOTICE: &str = "This input was blocked. Try rephrasing.";

/// Why a query was blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// Nothing left to answer after stripping small talk
    Empty,
    /// Contains a banned keyword
    Unsafe,
}

impl BlockReason {
    pub fn code(&self) -> &'static str {
        match self {
            BlockReason::Empty => "BLOCKED_EMPTY",
            BlockReason::Unsafe => "BLOCKED_UNSAFE",
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Result of screening a raw query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterResult {
    /// Safe to process; original casing preserved
    Clean(String),
    /// Terminal: the pipeline must stop here
    Blocked(BlockReason),
}

impl FilterResult {
    pub fn is_blocked(&self) -> bool {
        matches!(self, FilterResult::Blocked(_))
    }
}

/// Replace greetings and small talk with an empty string.
///
/// Anything else is returned untouched.
pub fn strip_conversational(text: &str) -> &str {
    let q = text.trim().to_lowercase();
    let len = q.chars().count();

    for phrase in CONVERSATIONAL_PHRASES {
        if q == *phrase {
            return "";
        }
        if q.starts_with(phrase) && len < phrase.chars().count() + CONVERSATIONAL_SLACK {
            return "";
        }
    }

    text
}

/// Block empty input and input containing a banned keyword
pub fn safety_gate(prompt: &str) -> FilterResult {
    if prompt.trim().is_empty() {
        return FilterResult::Blocked(BlockReason::Empty);
    }

    let lower = prompt.to_lowercase();
    if let Some(word) = BANNED_KEYWORDS.iter().find(|w| lower.contains(*w)) {
        tracing::debug!("Blocked query on keyword '{}'", word);
        return FilterResult::Blocked(BlockReason::Unsafe);
    }

    FilterResult::Clean(prompt.to_string())
}

/// Run both filter passes over a raw query
pub fn screen(raw: &str) -> FilterResult {
    safety_gate(strip_conversational(raw))
}
