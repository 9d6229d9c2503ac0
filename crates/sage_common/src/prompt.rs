//! Prompt composition
//!
//! Each category gets a fixed persona + rules template. Concept prompts
//! are led by the learner's age band directive instead of a persona.

use crate::age::AgeBand;
use crate::classifier::PromptCategory;
use serde::{Deserialize, Serialize};

/// Appended to a composed prompt when the learner asks for a clearer answer
pub const CLARITY_INSTRUCTION: &str =
    "Rephrase this for more clarity, correct detail, and simpler explanation.";

/// Instruction text handed to the generation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedPrompt {
    pub category: PromptCategory,
    pub text: String,
}

impl ComposedPrompt {
    /// Same prompt with the clarity rephrase instruction appended
    pub fn with_clarity_request(&self) -> Self {
        Self {
            category: self.category,
            text: format!("{}\n\n{}", self.text, CLARITY_INSTRUCTION),
        }
    }
}

/// Build the prompt for a query. `age` only matters for concept queries.
pub fn compose(category: PromptCategory, text: &str, age: u8) -> ComposedPrompt {
    let body = match category {
        PromptCategory::Code => code_prompt(text),
        PromptCategory::Factual => factual_prompt(text),
        PromptCategory::Math => math_prompt(text),
        PromptCategory::Concept => concept_prompt(text, AgeBand::from_age(age)),
    };

    ComposedPrompt {
        category,
        text: body.trim().to_string(),
    }
}

fn code_prompt(task: &str) -> String {
    format!(
        r#"
You are a skilled coding teacher.

TASK:
- Write only working code, no greetings.
- Add a 1-2 line explanation in plain language.
- Do not speculate. If unsure, say: "I am not sure."

USER TASK: {}
"#,
        task
    )
}

fn factual_prompt(question: &str) -> String {
    format!(
        r#"
You are an expert academic answerer.

TASK:
- Give a precise one-line factual answer.
- No intros or definitions. Just the fact.
- If unknown or disputed, reply: "I do not know."

QUESTION: {}
"#,
        question
    )
}

fn math_prompt(problem: &str) -> String {
    format!(
        r#"
You are a top-tier math tutor.

TASK:
- Solve step-by-step using formulas.
- Avoid guesses or vague explanations.
- Always provide clear math notation.

PROBLEM: {}
"#,
        problem
    )
}

fn concept_prompt(topic: &str, band: AgeBand) -> String {
    format!(
        r#"
{}

TOPIC:
{}

RULES:
- Use clean headings and bullet points.
- No greetings or "As an AI" style talk.
- Examples only when helpful. Be crisp and clear.
"#,
        band.directive(),
        topic
    )
}
