//! Whole-query expression solver
//!
//! Treats the entire query as an arithmetic expression. Natural language
//! almost never parses, and every parse or evaluation failure is `None`.

use super::expr;
use super::Solver;

/// Significant digits shown for evaluated results
const SIGNIFICANT_DIGITS: usize = 15;

/// Decimal exponents strictly inside this window print in fixed notation
const FIXED_MIN_EXP: i32 = -5;
const FIXED_MAX_EXP: i32 = 15;

pub struct SymbolicSolver;

impl Solver for SymbolicSolver {
    fn name(&self) -> &'static str {
        "symbolic"
    }

    fn solve(&self, query: &str) -> Option<String> {
        match expr::evaluate(query) {
            Ok(value) => Some(format!("{} = {}", query, format_numeric(value))),
            Err(e) => {
                tracing::trace!("Not an expression: {}", e);
                None
            }
        }
    }
}

/// Print with a fixed number of significant digits, keeping trailing zeros:
/// 8 -> "8.00000000000000", 0.5 -> "0.500000000000000", 1e20 -> "1.00000000000000e+20"
pub fn format_numeric(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let sci = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value.abs());
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if exp > FIXED_MIN_EXP && exp < FIXED_MAX_EXP {
        if exp >= 0 {
            let (int_part, frac_part) = digits.split_at(exp as usize + 1);
            if frac_part.is_empty() {
                format!("{sign}{int_part}")
            } else {
                format!("{sign}{int_part}.{frac_part}")
            }
        } else {
            let zeros = "0".repeat((-exp - 1) as usize);
            format!("{sign}0.{zeros}{digits}")
        }
    } else {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        format!("{sign}{mantissa}e{exp_sign}{}", exp.abs())
    }
}
