//! Learning pipeline
//!
//! raw query -> safety filter -> classifier -> (math: solver chain) -> prompt -> LLM
//!
//! Each run is independent: the request goes in, an outcome comes out, and
//! nothing is remembered between runs. A blocked query stops before the
//! classifier. A locally solved math query never reaches the LLM.

use crate::classifier::{classify, PromptCategory};
use crate::filter::{self, BlockReason, FilterResult, BLOCKED_NOTICE};
use crate::llm_client::LlmClient;
use crate::models::ModelId;
use crate::prompt::{compose, ComposedPrompt};
use crate::solvers::{Solution, SolverChain};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Shown when the generation service fails
pub const GENERATION_FAILURE_APOLOGY: &str =
    "Sorry, I couldn't generate a response right now. Please try again.";

/// Shown when the generation service answers with nothing
pub const NO_EXPLANATION_APOLOGY: &str = "Sorry, no explanation was generated.";

/// One learner question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningRequest {
    pub query: String,
    pub age: u8,
    pub model: ModelId,
}

impl LearningRequest {
    /// Build a request; age is clamped to 3-80
    pub fn new(query: impl Into<String>, age: i64, model: ModelId) -> Self {
        Self {
            query: query.into(),
            age: crate::age::clamp_age(age),
            model,
        }
    }
}

/// The one permitted "explain it more clearly" retry.
///
/// Not `Clone`: [`LearningPipeline::regenerate`] consumes it, so a
/// generated answer can be regenerated at most once.
#[derive(Debug)]
pub struct ClarityFollowUp {
    model: ModelId,
    prompt: ComposedPrompt,
}

impl ClarityFollowUp {
    pub fn prompt(&self) -> &ComposedPrompt {
        &self.prompt
    }
}

/// What happened to a request
#[derive(Debug)]
pub enum PipelineOutcome {
    /// Rejected by the safety filter; nothing else ran
    Blocked { reason: BlockReason },

    /// Answered by a local math solver
    Solved { solution: Solution },

    /// Answered by the LLM
    Generated {
        category: PromptCategory,
        answer: String,
        follow_up: Option<ClarityFollowUp>,
    },

    /// The LLM failed or returned nothing
    Unanswered {
        category: PromptCategory,
        apology: &'static str,
    },
}

impl PipelineOutcome {
    /// Text to show the learner
    pub fn message(&self) -> &str {
        match self {
            PipelineOutcome::Blocked { .. } => BLOCKED_NOTICE,
            PipelineOutcome::Solved { solution } => &solution.text,
            PipelineOutcome::Generated { answer, .. } => answer,
            PipelineOutcome::Unanswered { apology, .. } => apology,
        }
    }

    pub fn category(&self) -> Option<PromptCategory> {
        match self {
            PipelineOutcome::Blocked { .. } => None,
            PipelineOutcome::Solved { .. } => Some(PromptCategory::Math),
            PipelineOutcome::Generated { category, .. }
            | PipelineOutcome::Unanswered { category, .. } => Some(*category),
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, PipelineOutcome::Blocked { .. })
    }
}

/// Sequences filter, classifier, solvers, composer and LLM delegation
pub struct LearningPipeline<C: LlmClient> {
    client: C,
    solvers: SolverChain,
}

impl<C: LlmClient> LearningPipeline<C> {
    pub fn new(client: C) -> Self {
        Self::with_solvers(client, SolverChain::default())
    }

    pub fn with_solvers(client: C, solvers: SolverChain) -> Self {
        Self { client, solvers }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn run(&self, request: &LearningRequest) -> PipelineOutcome {
        let text = match filter::screen(&request.query) {
            FilterResult::Clean(text) => text,
            FilterResult::Blocked(reason) => {
                info!("Query blocked: {}", reason);
                return PipelineOutcome::Blocked { reason };
            }
        };

        let category = classify(&text);
        debug!("Query classified as {}", category);

        if category == PromptCategory::Math {
            if let Some(solution) = self.solvers.solve(&text) {
                return PipelineOutcome::Solved { solution };
            }
            debug!("No local solver applied, delegating math query");
        }

        let prompt = compose(category, &text, request.age);
        self.delegate(request.model, prompt)
    }

    /// Ask again with the clarity instruction appended. Consumes the follow-up.
    pub fn regenerate(&self, follow_up: ClarityFollowUp) -> String {
        let clearer = follow_up.prompt.with_clarity_request();
        info!("Regenerating {} answer for clarity", clearer.category);

        match self.client.complete(follow_up.model.as_str(), &clearer.text) {
            Ok(answer) if !answer.trim().is_empty() => answer,
            Ok(_) => NO_EXPLANATION_APOLOGY.to_string(),
            Err(e) => {
                warn!("Regeneration failed: {}", e);
                GENERATION_FAILURE_APOLOGY.to_string()
            }
        }
    }

    fn delegate(&self, model: ModelId, prompt: ComposedPrompt) -> PipelineOutcome {
        let category = prompt.category;
        info!("Delegating {} prompt to {}", category, model);

        match self.client.complete(model.as_str(), &prompt.text) {
            Ok(answer) if !answer.trim().is_empty() => PipelineOutcome::Generated {
                category,
                answer,
                follow_up: Some(ClarityFollowUp { model, prompt }),
            },
            Ok(_) => PipelineOutcome::Unanswered {
                category,
                apology: NO_EXPLANATION_APOLOGY,
            },
            Err(e) => {
                warn!("Generation failed: {}", e);
                PipelineOutcome::Unanswered {
                    category,
                    apology: GENERATION_FAILURE_APOLOGY,
                }
            }
        }
    }
}
