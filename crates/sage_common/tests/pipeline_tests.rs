//! End-to-end pipeline tests
//!
//! Drives LearningPipeline with a fake LLM and an instrumented solver to
//! check which stages run for each kind of query.

use sage_common::{
    solvers::{GeometrySolver, PercentageSolver, SymbolicSolver},
    BlockReason, FakeLlmClient, LearningPipeline, LearningRequest, LlmError, ModelId,
    PipelineOutcome, PromptCategory, Solver, SolverChain, GENERATION_FAILURE_APOLOGY,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Wraps a real solver and counts how often the chain reaches it
struct Counting {
    inner: Box<dyn Solver>,
    calls: Arc<AtomicUsize>,
}

impl Solver for Counting {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn solve(&self, query: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.solve(query)
    }
}

/// Default chain order, each solver instrumented
fn counted_chain() -> (SolverChain, Vec<Arc<AtomicUsize>>) {
    let inner: Vec<Box<dyn Solver>> = vec![
        Box::new(GeometrySolver),
        Box::new(PercentageSolver),
        Box::new(SymbolicSolver),
    ];
    let counters: Vec<Arc<AtomicUsize>> = (0..inner.len()).map(|_| Arc::new(AtomicUsize::new(0))).collect();
    let solvers = inner
        .into_iter()
        .zip(&counters)
        .map(|(inner, calls)| {
            Box::new(Counting {
                inner,
                calls: Arc::clone(calls),
            }) as Box<dyn Solver>
        })
        .collect();
    (SolverChain::new(solvers), counters)
}

fn calls(counters: &[Arc<AtomicUsize>]) -> Vec<usize> {
    counters.iter().map(|c| c.load(Ordering::SeqCst)).collect()
}

fn ask(query: &str) -> LearningRequest {
    LearningRequest::new(query, 12, ModelId::Gemma2b)
}

#[test]
fn blocked_input_reaches_no_solver_and_no_llm() {
    let (chain, counters) = counted_chain();
    let pipeline = LearningPipeline::with_solvers(FakeLlmClient::always("unused"), chain);

    // Math-looking but unsafe
    let outcome = pipeline.run(&ask("calculate 20% of the gun price 50"));
    assert!(matches!(outcome, PipelineOutcome::Blocked { reason: BlockReason::Unsafe }));

    let outcome = pipeline.run(&ask("   "));
    assert!(matches!(outcome, PipelineOutcome::Blocked { reason: BlockReason::Empty }));

    assert_eq!(calls(&counters), vec![0, 0, 0], "no solver may run for blocked input");
    assert_eq!(pipeline.client().call_count(), 0, "no LLM call for blocked input");
}

#[test]
fn non_math_queries_skip_the_solver_chain() {
    let (chain, counters) = counted_chain();
    let pipeline = LearningPipeline::with_solvers(FakeLlmClient::always("Lima."), chain);

    let outcome = pipeline.run(&ask("What is the capital of Peru?"));
    assert_eq!(outcome.category(), Some(PromptCategory::Factual));
    assert_eq!(outcome.message(), "Lima.");
    assert_eq!(calls(&counters), vec![0, 0, 0]);
    assert_eq!(pipeline.client().call_count(), 1);
}

#[test]
fn geometry_answer_stops_the_chain() {
    let (chain, counters) = counted_chain();
    let pipeline = LearningPipeline::with_solvers(FakeLlmClient::always("unused"), chain);

    let outcome = pipeline.run(&ask("volume of cylinder radius 2 height 5"));
    assert_eq!(
        outcome.message(),
        "Volume of cylinder = π × 2.0² × 5.0 = 62.83 cubic units"
    );
    assert_eq!(calls(&counters), vec![1, 0, 0]);
    assert_eq!(pipeline.client().call_count(), 0);
}

#[test]
fn percentage_answer_after_geometry_misses() {
    let (chain, counters) = counted_chain();
    let pipeline = LearningPipeline::with_solvers(FakeLlmClient::always("unused"), chain);

    let outcome = pipeline.run(&ask("20% of 50"));
    assert_eq!(outcome.message(), "20.0% of 50.0:\n20.0 ÷ 100 = 0.20\n0.20 × 50.0 = 10.00");
    assert_eq!(calls(&counters), vec![1, 1, 0]);
}

#[test]
fn unsolved_math_falls_through_to_the_llm() {
    let (chain, counters) = counted_chain();
    let pipeline = LearningPipeline::with_solvers(FakeLlmClient::always("Step 1: ..."), chain);

    let outcome = pipeline.run(&ask("find the derivative of x squared"));
    assert!(matches!(
        outcome,
        PipelineOutcome::Generated { category: PromptCategory::Math, .. }
    ));
    assert_eq!(calls(&counters), vec![1, 1, 1], "every solver tried once");
    assert_eq!(pipeline.client().call_count(), 1);
}

#[test]
fn deeply_nested_math_falls_through_without_crashing() {
    let (chain, counters) = counted_chain();
    let pipeline = LearningPipeline::with_solvers(FakeLlmClient::always("It is log 2."), chain);
    let query = format!("{}log(2){}", "(".repeat(200_000), ")".repeat(200_000));

    let outcome = pipeline.run(&ask(&query));
    assert!(matches!(
        outcome,
        PipelineOutcome::Generated { category: PromptCategory::Math, .. }
    ));
    assert_eq!(calls(&counters), vec![1, 1, 1]);
}

#[test]
fn area_of_phrasing_is_factual_and_skips_geometry() {
    // "area of" hits the factual keywords first
    let (chain, counters) = counted_chain();
    let pipeline = LearningPipeline::with_solvers(FakeLlmClient::always("16"), chain);

    let outcome = pipeline.run(&ask("area of square side 4"));
    assert_eq!(outcome.category(), Some(PromptCategory::Factual));
    assert_eq!(calls(&counters), vec![0, 0, 0]);
    assert!(pipeline.client().prompts()[0].1.starts_with("You are an expert academic answerer."));
}

#[test]
fn regeneration_happens_once_per_answer() {
    let pipeline = LearningPipeline::new(FakeLlmClient::new(vec![
        Ok("Photosynthesis is how plants eat.".to_string()),
        Ok("Plants turn sunlight into food.".to_string()),
    ]));

    let outcome = pipeline.run(&LearningRequest::new("Photosynthesis", 8, ModelId::Gemma2b));
    let PipelineOutcome::Generated { follow_up: Some(follow_up), .. } = outcome else {
        panic!("expected a generated answer with a follow-up");
    };

    let clearer = pipeline.regenerate(follow_up);
    assert_eq!(clearer, "Plants turn sunlight into food.");
    assert_eq!(pipeline.client().call_count(), 2);
}

#[test]
fn failed_generation_offers_no_follow_up() {
    let pipeline = LearningPipeline::new(FakeLlmClient::always_error(LlmError::HttpError(
        "connection refused".to_string(),
    )));

    let outcome = pipeline.run(&ask("Why do leaves change colour?"));
    assert!(matches!(outcome, PipelineOutcome::Unanswered { .. }));
    assert_eq!(outcome.message(), GENERATION_FAILURE_APOLOGY);
}

#[test]
fn same_request_same_outcome() {
    let pipeline = LearningPipeline::new(FakeLlmClient::always("unused"));
    let first = pipeline.run(&ask("20% of 50")).message().to_string();
    let second = pipeline.run(&ask("20% of 50")).message().to_string();
    assert_eq!(first, second);
}
