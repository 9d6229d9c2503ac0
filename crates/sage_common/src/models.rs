//! Selectable generation models

use crate::error::SageError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Models the assistant is allowed to delegate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModelId {
    #[default]
    #[serde(rename = "gemma:2b")]
    Gemma2b,
    #[serde(rename = "mistral")]
    Mistral,
}

impl ModelId {
    pub const ALL: [ModelId; 2] = [ModelId::Gemma2b, ModelId::Mistral];

    /// Identifier as Ollama knows it
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Gemma2b => "gemma:2b",
            ModelId::Mistral => "mistral",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = SageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ModelId::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| SageError::UnknownModel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_models() {
        assert_eq!("gemma:2b".parse::<ModelId>().unwrap(), ModelId::Gemma2b);
        assert_eq!(" Mistral ".parse::<ModelId>().unwrap(), ModelId::Mistral);
        assert!(matches!("gpt-4".parse::<ModelId>(), Err(SageError::UnknownModel(_))));
    }

    #[test]
    fn test_default_is_gemma() {
        assert_eq!(ModelId::default().as_str(), "gemma:2b");
    }
}
