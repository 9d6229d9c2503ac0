//! Age bands for concept explanations

use serde::{Deserialize, Serialize};

/// Youngest accepted learner age
pub const MIN_AGE: u8 = 3;
/// Oldest accepted learner age
pub const MAX_AGE: u8 = 80;
/// Age used when none is configured
pub const DEFAULT_AGE: u8 = 12;

/// Clamp a raw age into the accepted range
pub fn clamp_age(age: i64) -> u8 {
    age.clamp(MIN_AGE as i64, MAX_AGE as i64) as u8
}

/// Seven contiguous bands covering every age, ordered youngest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    EarlyChild,   // ..=5
    YoungChild,   // 6..=8
    OlderChild,   // 9..=11
    MiddleSchool, // 12..=14
    HighSchool,   // 15..=17
    College,      // 18..=22
    Adult,        // 23..
}

impl AgeBand {
    pub const ALL: [AgeBand; 7] = [
        AgeBand::EarlyChild,
        AgeBand::YoungChild,
        AgeBand::OlderChild,
        AgeBand::MiddleSchool,
        AgeBand::HighSchool,
        AgeBand::College,
        AgeBand::Adult,
    ];

    /// Band for an age. Upper bounds are inclusive.
    pub fn from_age(age: u8) -> Self {
        match age {
            0..=5 => AgeBand::EarlyChild,
            6..=8 => AgeBand::YoungChild,
            9..=11 => AgeBand::OlderChild,
            12..=14 => AgeBand::MiddleSchool,
            15..=17 => AgeBand::HighSchool,
            18..=22 => AgeBand::College,
            _ => AgeBand::Adult,
        }
    }

    /// Tone and style directive placed at the top of a concept prompt
    pub fn directive(&self) -> &'static str {
        match self {
            AgeBand::EarlyChild => {
                "Use fun comparisons and very simple words. Keep it cheerful and short."
            }
            AgeBand::YoungChild => {
                "Use clear, everyday examples and avoid big words. Think like school conversations."
            }
            AgeBand::OlderChild => {
                "Give step-by-step explanations with real-life examples kids relate to."
            }
            AgeBand::MiddleSchool => {
                "Speak like a middle school teacher. Use age-relevant words and make it practical."
            }
            AgeBand::HighSchool => {
                "Teach like a high school teacher. Explain the logic clearly and give good examples."
            }
            AgeBand::College => {
                "Sound like a college professor—use proper terminology but keep it concise."
            }
            AgeBand::Adult => {
                "Explain like you're talking to an adult learner. Focus on clarity and real-world value."
            }
        }
    }
}
