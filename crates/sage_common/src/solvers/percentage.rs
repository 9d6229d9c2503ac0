//! "<p>% of <base>" solver

use super::{capture_f64, fmt_operand, Solver};
use regex::Regex;
use std::sync::LazyLock;

/// `of` is optional, so "15% 80" also matches
static PERCENT_OF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(\.\d+)?)%\s*(of)?\s*(\d+(\.\d+)?)").expect("percent pattern must compile")
});

pub struct PercentageSolver;

impl Solver for PercentageSolver {
    fn name(&self) -> &'static str {
        "percentage"
    }

    fn solve(&self, query: &str) -> Option<String> {
        let q = query.trim().to_lowercase();
        let caps = PERCENT_OF.captures(&q)?;
        let percent = capture_f64(&caps, 1)?;
        let base = capture_f64(&caps, 4)?;

        let fraction = percent / 100.0;
        let result = fraction * base;
        let (p, b) = (fmt_operand(percent), fmt_operand(base));

        Some(format!(
            "{p}% of {b}:\n{p} ÷ 100 = {fraction:.2}\n{fraction:.2} × {b} = {result:.2}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twenty_percent_of_fifty() {
        let answer = PercentageSolver.solve("20% of 50").unwrap();
        assert_eq!(answer, "20.0% of 50.0:\n20.0 ÷ 100 = 0.20\n0.20 × 50.0 = 10.00");
        assert_eq!(answer.lines().count(), 3);
    }

    #[test]
    fn test_of_is_optional() {
        let answer = PercentageSolver.solve("what is 15% 80").unwrap();
        assert!(answer.starts_with("15.0% of 80.0:"));
        assert!(answer.ends_with("= 12.00"));
    }

    #[test]
    fn test_decimal_operands() {
        let answer = PercentageSolver.solve("Calculate 12.4% of 40").unwrap();
        assert_eq!(answer, "12.4% of 40.0:\n12.4 ÷ 100 = 0.12\n0.12 × 40.0 = 4.96");
    }

    #[test]
    fn test_no_percent_is_none() {
        assert_eq!(PercentageSolver.solve("20 of 50"), None);
        assert_eq!(PercentageSolver.solve("what is a percent"), None);
        assert_eq!(PercentageSolver.solve("50%"), None);
    }
}
