//! Sage Common - learning assistant core
//!
//! Safety filtering, query classification, local math solving and prompt
//! composition. The only outbound call is the LLM completion in `llm_client`.

pub mod age;
pub mod classifier;
pub mod config;
pub mod error;
pub mod filter;
pub mod llm_client;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod solvers;

pub use age::AgeBand;
pub use classifier::{classify, PromptCategory};
pub use config::SageConfig;
pub use error::SageError;
pub use filter::{screen, BlockReason, FilterResult, BLOCKED_NOTICE};
pub use llm_client::{FakeLlmClient, LlmClient, LlmError, OllamaClient};
pub use models::ModelId;
pub use pipeline::{
    ClarityFollowUp, LearningPipeline, LearningRequest, PipelineOutcome,
    GENERATION_FAILURE_APOLOGY, NO_EXPLANATION_APOLOGY,
};
pub use prompt::{compose, ComposedPrompt};
pub use solvers::{Solution, Solver, SolverChain};
