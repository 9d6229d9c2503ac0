//! Command handlers for sagectl

use crate::errors::{
    EXIT_GENERAL_ERROR, EXIT_INPUT_BLOCKED, EXIT_LLM_UNAVAILABLE, EXIT_SUCCESS,
};
use crate::feedback::{self, BETTER_QUESTION, HELPFUL_QUESTION, REWORD_ADVICE, THANKS};
use crate::output::{display_info, display_response, display_warning};
use crate::spinner::Spinner;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use sage_common::config::config_path;
use sage_common::{
    ClarityFollowUp, LearningPipeline, LearningRequest, LlmClient, ModelId, OllamaClient,
    PipelineOutcome, SageConfig, GENERATION_FAILURE_APOLOGY,
};
use std::io::{self, BufRead, IsTerminal};
use tracing::debug;

/// How the learner judged a generated answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackResult {
    Helpful,
    ClearerAfterRetry,
    StillUnclear,
}

/// Options for `sagectl ask`
#[derive(Debug, Clone)]
pub struct AskOptions {
    pub query: String,
    pub age: Option<u8>,
    pub model: Option<ModelId>,
    pub no_feedback: bool,
}

/// Answer one question
pub fn ask(opts: AskOptions) -> Result<i32> {
    let config = SageConfig::load();
    if config.learner.age_was_clamped() {
        debug!(
            "Configured default_age {} clamped to {}",
            config.learner.default_age,
            config.learner.effective_age()
        );
    }

    let age = opts.age.unwrap_or_else(|| config.learner.effective_age());
    let model = match opts.model {
        Some(model) => model,
        None => config.llm.model_id().unwrap_or_default(),
    };
    debug!("Asking {} for a {}-year-old learner", model, age);

    let client = OllamaClient::new(&config.llm)?;
    let endpoint = client.endpoint().to_string();
    let pipeline = LearningPipeline::new(client);
    let request = LearningRequest::new(opts.query, age as i64, model);

    let spinner = Spinner::new("Thinking...");
    let outcome = pipeline.run(&request);
    spinner.stop();

    let code = match outcome {
        PipelineOutcome::Blocked { .. } => {
            display_warning(outcome.message());
            EXIT_INPUT_BLOCKED
        }
        PipelineOutcome::Solved { ref solution } => {
            debug!("Solved locally by {}", solution.solver);
            display_response(&solution.text);
            EXIT_SUCCESS
        }
        PipelineOutcome::Unanswered { apology, .. } => {
            display_warning(apology);
            if apology == GENERATION_FAILURE_APOLOGY {
                display_info(&format!("Is Ollama running at {}?", endpoint));
                EXIT_LLM_UNAVAILABLE
            } else {
                EXIT_GENERAL_ERROR
            }
        }
        PipelineOutcome::Generated {
            answer, follow_up, ..
        } => {
            display_response(&answer);
            if let Some(follow_up) = follow_up {
                if !opts.no_feedback && io::stdin().is_terminal() {
                    let mut stdin = io::stdin().lock();
                    collect_feedback(&pipeline, follow_up, &mut stdin)
                        .context("Failed to read feedback")?;
                }
            }
            EXIT_SUCCESS
        }
    };

    Ok(code)
}

/// Ask whether the answer helped; on "no", regenerate once and ask again.
pub fn collect_feedback<C: LlmClient, R: BufRead>(
    pipeline: &LearningPipeline<C>,
    follow_up: ClarityFollowUp,
    reader: &mut R,
) -> io::Result<FeedbackResult> {
    if feedback::read_yes_no(reader, HELPFUL_QUESTION)? {
        println!("{}", THANKS.green());
        return Ok(FeedbackResult::Helpful);
    }

    let spinner = Spinner::new("Updating...");
    let clearer = pipeline.regenerate(follow_up);
    spinner.stop();
    display_response(&clearer);

    if feedback::read_yes_no(reader, BETTER_QUESTION)? {
        println!("{}", THANKS.green());
        Ok(FeedbackResult::ClearerAfterRetry)
    } else {
        println!("{}", REWORD_ADVICE.yellow());
        Ok(FeedbackResult::StillUnclear)
    }
}

/// List selectable models, marking the configured one
pub fn models() -> Result<i32> {
    let config = SageConfig::load();
    let current = config.llm.model_id().unwrap_or_default();

    println!("{}", "Available models".bold());
    for model in ModelId::ALL {
        if model == current {
            println!("  {} {}", "*".green(), model.to_string().green());
        } else {
            println!("    {}", model);
        }
    }
    Ok(EXIT_SUCCESS)
}

/// Report whether the generation service answers
pub fn status() -> Result<i32> {
    let config = SageConfig::load();
    let client = OllamaClient::new(&config.llm)?;

    println!("{}", "Sage status".bold());
    println!("  Endpoint:  {}", client.endpoint());
    println!("  Model:     {}", config.llm.model_id().unwrap_or_default());
    println!("  Timeout:   {}s", config.llm.effective_timeout_secs());
    println!("  Age:       {}", config.learner.effective_age());

    if client.is_available() {
        println!("  Ollama:    {}", "reachable".green());
        Ok(EXIT_SUCCESS)
    } else {
        println!("  Ollama:    {}", "unreachable".red());
        Ok(EXIT_LLM_UNAVAILABLE)
    }
}

pub const GUIDE: &str = r#"## How to use
- Pick a model with **--model** (gemma:2b or mistral)
- Make sure Ollama is running on `localhost:11434` (check with **sagectl status**)
- Give your **age** with --age and ask about any **topic**:
```
sagectl ask --age 10 "Why is the sky blue?"
sagectl ask "20% of 50"
```
- Percentages, simple shapes and arithmetic are worked out right away
- If an answer is unclear, answer **n** and Sage will explain it once more"#;

/// Print usage instructions
pub fn guide() -> Result<i32> {
    display_response(GUIDE);
    Ok(EXIT_SUCCESS)
}

/// Show the effective configuration and where it comes from
pub fn config() -> Result<i32> {
    let config = SageConfig::load();
    match config_path() {
        Some(path) if path.exists() => println!("# {}", path.display()),
        Some(path) => println!("# {} (not found, using defaults)", path.display()),
        None => println!("# no config directory, using defaults"),
    }
    println!("{}", config.to_toml()?);
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sage_common::{FakeLlmClient, LlmError};
    use std::io::Cursor;

    fn generated(pipeline: &LearningPipeline<FakeLlmClient>) -> ClarityFollowUp {
        let request = LearningRequest::new("Explain volcanoes", 9, ModelId::Gemma2b);
        match pipeline.run(&request) {
            PipelineOutcome::Generated {
                follow_up: Some(f), ..
            } => f,
            other => panic!("expected a generated answer, got {:?}", other),
        }
    }

    #[test]
    fn test_helpful_answer_is_not_regenerated() {
        let pipeline = LearningPipeline::new(FakeLlmClient::always("Lava!"));
        let follow_up = generated(&pipeline);

        let result = collect_feedback(&pipeline, follow_up, &mut Cursor::new("y\n")).unwrap();
        assert_eq!(result, FeedbackResult::Helpful);
        assert_eq!(pipeline.client().call_count(), 1);
    }

    #[test]
    fn test_unhelpful_answer_is_regenerated_once() {
        let pipeline = LearningPipeline::new(FakeLlmClient::new(vec![
            Ok("Lava!".to_string()),
            Ok("Melted rock comes up.".to_string()),
        ]));
        let follow_up = generated(&pipeline);

        let result = collect_feedback(&pipeline, follow_up, &mut Cursor::new("n\nn\n")).unwrap();
        assert_eq!(result, FeedbackResult::StillUnclear);
        assert_eq!(pipeline.client().call_count(), 2);
    }

    #[test]
    fn test_clearer_after_retry() {
        let pipeline = LearningPipeline::new(FakeLlmClient::always("Lava!"));
        let follow_up = generated(&pipeline);

        let result = collect_feedback(&pipeline, follow_up, &mut Cursor::new("no\nyes\n")).unwrap();
        assert_eq!(result, FeedbackResult::ClearerAfterRetry);
    }

    #[test]
    fn test_failed_regeneration_still_asks() {
        let pipeline = LearningPipeline::new(FakeLlmClient::new(vec![
            Ok("Lava!".to_string()),
            Err(LlmError::EmptyResponse),
        ]));
        let follow_up = generated(&pipeline);

        let result = collect_feedback(&pipeline, follow_up, &mut Cursor::new("n\nn\n")).unwrap();
        assert_eq!(result, FeedbackResult::StillUnclear);
        assert_eq!(pipeline.client().call_count(), 2);
    }

    #[test]
    fn test_guide_mentions_commands() {
        assert!(GUIDE.contains("sagectl ask"));
        assert!(GUIDE.contains("localhost:11434"));
    }
}
