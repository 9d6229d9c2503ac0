//! Geometry solver
//!
//! Rules are tried in table order and the first matching pattern wins:
//! square area, rectangle area, cube volume, circle area, cylinder volume.
//! Queries are lower-cased and trimmed before matching.

use super::{capture_f64, fmt_operand, Solver};
use regex::{Captures, Regex};
use std::f64::consts::PI;
use std::sync::LazyLock;

/// One recognised phrasing and the formula it feeds
struct GeometryRule {
    name: &'static str,
    /// Alternative phrasings, tried in order
    patterns: Vec<Regex>,
    formula: fn(&Captures<'_>) -> Option<String>,
}

static GEOMETRY_RULES: LazyLock<Vec<GeometryRule>> = LazyLock::new(|| {
    let re = |p: &str| Regex::new(p).expect("geometry pattern must compile");
    vec![
        GeometryRule {
            name: "square_area",
            patterns: vec![re(
                r"(?:area of )?square.*?(?:side|sides|length)\s*(?:is\s*)?(\d+(\.\d+)?)",
            )],
            formula: square_area,
        },
        // "bredth" is a common misspelling
        GeometryRule {
            name: "rectangle_area",
            patterns: vec![re(
                r"area of rectangle.*?(?:length|side)\s*(\d+(\.\d+)?).*?(?:breadth|bredth|width)\s*(\d+(\.\d+)?)",
            )],
            formula: rectangle_area,
        },
        GeometryRule {
            name: "cube_volume",
            patterns: vec![re(r"volume of cube.*?(?:side|sides|length)\s*(\d+(\.\d+)?)")],
            formula: cube_volume,
        },
        GeometryRule {
            name: "circle_area",
            patterns: vec![re(
                r"(?:area of )?circle.*?(?:radius|r)\s*(?:is\s*)?(\d+(\.\d+)?)",
            )],
            formula: circle_area,
        },
        GeometryRule {
            name: "cylinder_volume",
            patterns: vec![
                re(r"volume of cylinder.*?(?:radius|r)\s*(\d+(\.\d+)?).*?(?:height|h)\s*(\d+(\.\d+)?)"),
                re(r"volume of cylinder.*?whose.*?(?:radius|r)\s*is\s*(\d+(\.\d+)?).*?(?:height|h)\s*is\s*(\d+(\.\d+)?)"),
            ],
            formula: cylinder_volume,
        },
    ]
});

fn square_area(caps: &Captures<'_>) -> Option<String> {
    let s = capture_f64(caps, 1)?;
    let side = fmt_operand(s);
    Some(format!("Area of square = {side} × {side} = {:.2} square units", s * s))
}

fn rectangle_area(caps: &Captures<'_>) -> Option<String> {
    let l = capture_f64(caps, 1)?;
    let b = capture_f64(caps, 3)?;
    Some(format!(
        "Area of rectangle = {} × {} = {:.2} square units",
        fmt_operand(l),
        fmt_operand(b),
        l * b
    ))
}

fn cube_volume(caps: &Captures<'_>) -> Option<String> {
    let s = capture_f64(caps, 1)?;
    Some(format!("Volume of cube = {}³ = {:.2} cubic units", fmt_operand(s), s.powi(3)))
}

fn circle_area(caps: &Captures<'_>) -> Option<String> {
    let r = capture_f64(caps, 1)?;
    Some(format!("Area of circle = π × {}² = {:.2} square units", fmt_operand(r), PI * r * r))
}

fn cylinder_volume(caps: &Captures<'_>) -> Option<String> {
    let r = capture_f64(caps, 1)?;
    let h = capture_f64(caps, 3)?;
    Some(format!(
        "Volume of cylinder = π × {}² × {} = {:.2} cubic units",
        fmt_operand(r),
        fmt_operand(h),
        PI * r * r * h
    ))
}

/// Square, rectangle, cube, circle and cylinder formulas
pub struct GeometrySolver;

impl Solver for GeometrySolver {
    fn name(&self) -> &'static str {
        "geometry"
    }

    fn solve(&self, query: &str) -> Option<String> {
        let q = query.trim().to_lowercase();
        for rule in GEOMETRY_RULES.iter() {
            if let Some(caps) = rule.patterns.iter().find_map(|p| p.captures(&q)) {
                tracing::debug!("Geometry rule '{}' matched", rule.name);
                return (rule.formula)(&caps);
            }
        }
        None
    }
}
