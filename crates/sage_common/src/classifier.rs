//! Query category classifier
//!
//! Keyword sets are checked in strict priority order: code, factual, math.
//! The first set with any substring hit wins; nothing matching means concept.
//! "area of" sits in the factual set and "area" in the math set, so
//! "area of a country" is factual. Keep the order.

use serde::{Deserialize, Serialize};
use std::fmt;

const CODE_KEYWORDS: &[&str] = &["code", "function", "write a program of", "generate code", "script"];

const FACTUAL_KEYWORDS: &[&str] = &[
    "capital of",
    "currency of",
    "population of",
    "where is",
    "who is",
    "speed of",
    "length of",
    "when did",
    "founded in",
    "area of",
    "height of",
    "what is the time",
    "time in",
];

const MATH_KEYWORDS: &[&str] = &[
    "solve",
    "calculate",
    "evaluate",
    "find the value",
    "perimeter",
    "volume",
    "area",
    "lcm",
    "hcf",
    "add",
    "subtract",
    "multiply",
    "divide",
    "log",
    "mean",
    "median",
    "mode",
    "integral",
    "derivative",
    "matrix",
    "factorial",
    "equation",
    "square root",
    "probability",
    "%",
];

/// What kind of question the user asked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptCategory {
    Code,
    Factual,
    Math,
    Concept,
}

impl PromptCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptCategory::Code => "code",
            PromptCategory::Factual => "factual",
            PromptCategory::Math => "math",
            PromptCategory::Concept => "concept",
        }
    }
}

impl fmt::Display for PromptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a cleaned query. Pure and total.
pub fn classify(text: &str) -> PromptCategory {
    let q = text.to_lowercase();
    let hit = |keywords: &[&str]| keywords.iter().any(|k| q.contains(k));

    if hit(CODE_KEYWORDS) {
        PromptCategory::Code
    } else if hit(FACTUAL_KEYWORDS) {
        PromptCategory::Factual
    } else if hit(MATH_KEYWORDS) {
        PromptCategory::Math
    } else {
        PromptCategory::Concept
    }
}
