//! # Parabola Calculation
//!
//! Properties of a parabola `y = ax² + bx + c`. Four entry forms are
//! accepted via `calculationType`; each is reduced to standard-form
//! coefficients first, then all properties fall out of the same math:
//!
//! - `standard`: coefficients `a`, `b`, `c` (default)
//! - `vertex`: `a` plus vertex `(h, k)`
//! - `intercept`: `a` plus roots `root1`, `root2`
//! - `focus-directrix`: `focusX`, `focusY`, `directrixY`

use serde::Serialize;

use crate::calculators::to_outputs;
use crate::errors::{CalcError, CalcResult};
use crate::format::{format_number, format_point, round_to_precision, GEOMETRY_PRECISION};
use crate::inputs::{FlatInputs, ValueMap};
use crate::registry::Calculator;

#[derive(Debug, Clone)]
pub enum ParabolaInput {
    Standard { a: f64, b: f64, c: f64 },
    Vertex { a: f64, h: f64, k: f64 },
    Intercept { a: f64, root1: f64, root2: f64 },
    FocusDirectrix { focus_x: f64, focus_y: f64, directrix_y: f64 },
}

impl ParabolaInput {
    pub fn from_inputs(inputs: &FlatInputs) -> CalcResult<Self> {
        let calculation_type = inputs.get_str("calculationType").unwrap_or("standard");
        match calculation_type {
            "standard" => Ok(ParabolaInput::Standard {
                a: inputs.require_f64("a")?,
                b: inputs.require_f64("b")?,
                c: inputs.require_f64("c")?,
            }),
            "vertex" => Ok(ParabolaInput::Vertex {
                a: inputs.require_f64("a")?,
                h: inputs.require_f64("h")?,
                k: inputs.require_f64("k")?,
            }),
            "intercept" => Ok(ParabolaInput::Intercept {
                a: inputs.require_f64("a")?,
                root1: inputs.require_f64("root1")?,
                root2: inputs.require_f64("root2")?,
            }),
            "focus-directrix" => Ok(ParabolaInput::FocusDirectrix {
                focus_x: inputs.require_f64("focusX")?,
                focus_y: inputs.require_f64("focusY")?,
                directrix_y: inputs.require_f64("directrixY")?,
            }),
            other => Err(CalcError::invalid_input(
                "calculationType",
                other,
                "must be one of: standard, vertex, intercept, focus-directrix",
            )),
        }
    }

    /// Reduce any entry form to standard-form coefficients.
    fn coefficients(&self) -> CalcResult<(f64, f64, f64)> {
        match *self {
            ParabolaInput::Standard { a, b, c } => Ok((a, b, c)),
            ParabolaInput::Vertex { a, h, k } => Ok((a, -2.0 * a * h, a * h * h + k)),
            ParabolaInput::Intercept { a, root1, root2 } => {
                Ok((a, -a * (root1 + root2), a * root1 * root2))
            }
            ParabolaInput::FocusDirectrix {
                focus_x,
                focus_y,
                directrix_y,
            } => {
                if focus_y == directrix_y {
                    return Err(CalcError::domain(
                        "parabola",
                        "Focus cannot lie on the directrix",
                    ));
                }
                let k = (focus_y + directrix_y) / 2.0;
                let a = 1.0 / (4.0 * (focus_y - k));
                let h = focus_x;
                Ok((a, -2.0 * a * h, a * h * h + k))
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParabolaResult {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub vertex: String,
    pub vertex_x: f64,
    pub vertex_y: f64,
    pub focus: String,
    pub directrix: String,
    pub axis_of_symmetry: String,
    pub discriminant: f64,
    pub y_intercept: f64,
    pub opens: String,
    pub direction: String,
    pub standard_form: String,
    pub vertex_form: String,
}

fn standard_form_display(a: f64, b: f64, c: f64) -> String {
    let mut equation = format!("y = {}x²", format_number(a));
    if b != 0.0 {
        let sign = if b > 0.0 { "+" } else { "-" };
        equation.push_str(&format!(" {} {}x", sign, format_number(b.abs())));
    }
    if c != 0.0 {
        let sign = if c > 0.0 { "+" } else { "-" };
        equation.push_str(&format!(" {} {}", sign, format_number(c.abs())));
    }
    equation
}

fn vertex_form_display(a: f64, h: f64, k: f64) -> String {
    let inner = if h >= 0.0 {
        format!("(x - {})²", format_number(h))
    } else {
        format!("(x + {})²", format_number(-h))
    };
    let mut equation = format!("y = {}{}", format_number(a), inner);
    if k != 0.0 {
        let sign = if k > 0.0 { "+" } else { "-" };
        equation.push_str(&format!(" {} {}", sign, format_number(k.abs())));
    }
    equation
}

pub fn calculate(input: &ParabolaInput) -> CalcResult<ParabolaResult> {
    let (a, b, c) = input.coefficients()?;
    if a == 0.0 {
        return Err(CalcError::domain(
            "parabola",
            "Coefficient a cannot be zero (would not be a parabola)",
        ));
    }

    let h = round_to_precision(-b / (2.0 * a), GEOMETRY_PRECISION);
    let k = round_to_precision(c - b * b / (4.0 * a), GEOMETRY_PRECISION);
    // Focal distance from vertex to focus
    let p = 1.0 / (4.0 * a);
    let opens = if a > 0.0 { "upward" } else { "downward" };

    Ok(ParabolaResult {
        a: round_to_precision(a, GEOMETRY_PRECISION),
        b: round_to_precision(b, GEOMETRY_PRECISION),
        c: round_to_precision(c, GEOMETRY_PRECISION),
        vertex: format_point(h, k),
        vertex_x: h,
        vertex_y: k,
        focus: format_point(h, round_to_precision(k + p, GEOMETRY_PRECISION)),
        directrix: format!(
            "y = {}",
            format_number(round_to_precision(k - p, GEOMETRY_PRECISION))
        ),
        axis_of_symmetry: format!("x = {}", format_number(h)),
        discriminant: round_to_precision(b * b - 4.0 * a * c, GEOMETRY_PRECISION),
        y_intercept: round_to_precision(c, GEOMETRY_PRECISION),
        opens: opens.to_string(),
        direction: opens.to_string(),
        standard_form: standard_form_display(
            round_to_precision(a, GEOMETRY_PRECISION),
            round_to_precision(b, GEOMETRY_PRECISION),
            round_to_precision(c, GEOMETRY_PRECISION),
        ),
        vertex_form: vertex_form_display(round_to_precision(a, GEOMETRY_PRECISION), h, k),
    })
}

pub struct ParabolaCalculator;

impl Calculator for ParabolaCalculator {
    fn key(&self) -> &'static str {
        "PARABOLA_CALCULATOR"
    }

    fn name(&self) -> &'static str {
        "Parabola Calculator"
    }

    fn calculate(&self, inputs: &FlatInputs) -> CalcResult<ValueMap> {
        let input = ParabolaInput::from_inputs(inputs)?;
        to_outputs(&calculate(&input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_form_basic() {
        // y = x² - 4x + 3, vertex (2, -1)
        let result = calculate(&ParabolaInput::Standard {
            a: 1.0,
            b: -4.0,
            c: 3.0,
        })
        .unwrap();
        assert_eq!(result.vertex, "(2, -1)");
        assert_eq!(result.vertex_x, 2.0);
        assert_eq!(result.vertex_y, -1.0);
        assert_eq!(result.axis_of_symmetry, "x = 2");
        assert_eq!(result.discriminant, 4.0);
        assert_eq!(result.y_intercept, 3.0);
        assert_eq!(result.opens, "upward");
        assert_eq!(result.direction, "upward");
        assert_eq!(result.standard_form, "y = 1x² - 4x + 3");
        assert_eq!(result.vertex_form, "y = 1(x - 2)² - 1");
    }

    #[test]
    fn test_focus_and_directrix_of_unit_parabola() {
        // y = x²: focus (0, 1/4), directrix y = -1/4
        let result = calculate(&ParabolaInput::Standard {
            a: 1.0,
            b: 0.0,
            c: 0.0,
        })
        .unwrap();
        assert_eq!(result.focus, "(0, 0.25)");
        assert_eq!(result.directrix, "y = -0.25");
    }

    #[test]
    fn test_downward_opening() {
        let result = calculate(&ParabolaInput::Standard {
            a: -2.0,
            b: 0.0,
            c: 5.0,
        })
        .unwrap();
        assert_eq!(result.opens, "downward");
        assert_eq!(result.direction, "downward");
    }

    #[test]
    fn test_vertex_form_round_trips_to_same_vertex() {
        let result = calculate(&ParabolaInput::Vertex {
            a: 2.0,
            h: 3.0,
            k: -4.0,
        })
        .unwrap();
        assert_eq!(result.vertex, "(3, -4)");
        assert_eq!(result.b, -12.0);
        assert_eq!(result.c, 14.0);
    }

    #[test]
    fn test_intercept_form_expands() {
        // y = (x - 1)(x - 3) = x² - 4x + 3
        let result = calculate(&ParabolaInput::Intercept {
            a: 1.0,
            root1: 1.0,
            root2: 3.0,
        })
        .unwrap();
        assert_eq!(result.b, -4.0);
        assert_eq!(result.c, 3.0);
        assert_eq!(result.vertex, "(2, -1)");
    }

    #[test]
    fn test_focus_directrix_recovers_unit_parabola() {
        let result = calculate(&ParabolaInput::FocusDirectrix {
            focus_x: 0.0,
            focus_y: 0.25,
            directrix_y: -0.25,
        })
        .unwrap();
        assert_eq!(result.a, 1.0);
        assert_eq!(result.vertex, "(0, 0)");
    }

    #[test]
    fn test_zero_leading_coefficient_rejected() {
        let err = calculate(&ParabolaInput::Standard {
            a: 0.0,
            b: 1.0,
            c: 2.0,
        })
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("Coefficient a cannot be zero (would not be a parabola)"));
    }

    #[test]
    fn test_focus_on_directrix_rejected() {
        assert!(calculate(&ParabolaInput::FocusDirectrix {
            focus_x: 0.0,
            focus_y: 1.0,
            directrix_y: 1.0,
        })
        .is_err());
    }

    #[test]
    fn test_unknown_calculation_type_rejected() {
        let mut inputs = FlatInputs::new();
        inputs.insert("calculationType", serde_json::json!("polar"));
        assert!(ParabolaCalculator.calculate(&inputs).is_err());
    }
}
