//! Local math solvers
//!
//! Math queries are tried against a fixed chain of solvers before any
//! prompt is sent to the model. Cheap pattern solvers come first; the
//! symbolic evaluator is last because it rejects most prose.
//!
//! A solver that cannot handle a query returns `None`. That is the normal
//! outcome, never an error, and the chain simply moves on.

pub mod expr;
pub mod geometry;
pub mod percentage;
pub mod symbolic;

pub use geometry::GeometrySolver;
pub use percentage::PercentageSolver;
pub use symbolic::SymbolicSolver;

use serde::{Deserialize, Serialize};

/// A strategy that may answer a math query locally
pub trait Solver: Send + Sync {
    /// Short name used in logs and solutions
    fn name(&self) -> &'static str;

    /// Derivation text, or `None` when the query does not apply
    fn solve(&self, query: &str) -> Option<String>;
}

/// Answer produced by one solver in the chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub solver: String,
    pub text: String,
}

/// Ordered list of solvers; first answer wins
pub struct SolverChain {
    solvers: Vec<Box<dyn Solver>>,
}

impl SolverChain {
    pub fn new(solvers: Vec<Box<dyn Solver>>) -> Self {
        Self { solvers }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.solvers.iter().map(|s| s.name()).collect()
    }

    pub fn solve(&self, query: &str) -> Option<Solution> {
        for solver in &self.solvers {
            match solver.solve(query) {
                Some(text) => {
                    tracing::debug!("Solver '{}' answered locally", solver.name());
                    return Some(Solution {
                        solver: solver.name().to_string(),
                        text,
                    });
                }
                None => tracing::trace!("Solver '{}' does not apply", solver.name()),
            }
        }
        None
    }
}

impl Default for SolverChain {
    /// Geometry, then percentage, then symbolic
    fn default() -> Self {
        Self::new(vec![
            Box::new(GeometrySolver),
            Box::new(PercentageSolver),
            Box::new(SymbolicSolver),
        ])
    }
}

/// Print an operand the way a learner expects to see it echoed back:
/// shortest digits with a fractional part, so 4 reads as "4.0" and 2.5 as
/// "2.5". Decimal exponents outside -4..16 switch to "1e+16" / "1.5e-05".
pub(crate) fn fmt_operand(value: f64) -> String {
    let sci = format!("{:e}", value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if (-4..16).contains(&exp) {
        let fixed = format!("{}", value);
        if fixed.contains('.') {
            fixed
        } else {
            format!("{fixed}.0")
        }
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    }
}

/// Parse a captured number. Captures only ever hold digits and one dot.
pub(crate) fn capture_f64(caps: &regex::Captures<'_>, group: usize) -> Option<f64> {
    caps.get(group)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, Option<&'static str>);

    impl Solver for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn solve(&self, _query: &str) -> Option<String> {
            self.1.map(str::to_string)
        }
    }

    #[test]
    fn test_default_order() {
        assert_eq!(SolverChain::default().names(), vec!["geometry", "percentage", "symbolic"]);
    }

    #[test]
    fn test_first_answer_wins() {
        let chain = SolverChain::new(vec![
            Box::new(Fixed("a", None)),
            Box::new(Fixed("b", Some("from b"))),
            Box::new(Fixed("c", Some("from c"))),
        ]);
        let solution = chain.solve("anything").unwrap();
        assert_eq!(solution.solver, "b");
        assert_eq!(solution.text, "from b");
    }

    #[test]
    fn test_all_absent_is_none() {
        let chain = SolverChain::new(vec![Box::new(Fixed("a", None)), Box::new(Fixed("b", None))]);
        assert!(chain.solve("anything").is_none());
        assert!(SolverChain::new(Vec::new()).solve("1 + 1").is_none());
    }

    #[test]
    fn test_geometry_runs_before_symbolic() {
        let solution = SolverChain::default().solve("area of square side 4").unwrap();
        assert_eq!(solution.solver, "geometry");
    }

    #[test]
    fn test_percentage_runs_before_symbolic() {
        // "20%50" would also be a modulo expression
        let solution = SolverChain::default().solve("20%50").unwrap();
        assert_eq!(solution.solver, "percentage");
    }

    #[test]
    fn test_symbolic_is_the_fallback() {
        let solution = SolverChain::default().solve("2 + 2 * 3").unwrap();
        assert_eq!(solution.solver, "symbolic");
        assert!(SolverChain::default().solve("explain the median of a dataset").is_none());
    }

    #[test]
    fn test_fmt_operand() {
        assert_eq!(fmt_operand(4.0), "4.0");
        assert_eq!(fmt_operand(2.5), "2.5");
        assert_eq!(fmt_operand(0.1), "0.1");
        assert_eq!(fmt_operand(100.0), "100.0");
        assert_eq!(fmt_operand(0.0), "0.0");
        assert_eq!(fmt_operand(0.0001), "0.0001");
        assert_eq!(fmt_operand(9999999999999998.0), "9999999999999998.0");
    }

    #[test]
    fn test_fmt_operand_exponent_form() {
        assert_eq!(fmt_operand(1e16), "1e+16");
        assert_eq!(fmt_operand(12345678901234567890.0), "1.2345678901234567e+19");
        assert_eq!(fmt_operand(0.00001), "1e-05");
        assert_eq!(fmt_operand(0.000015), "1.5e-05");
        assert_eq!(fmt_operand(1e300), "1e+300");
    }
}
