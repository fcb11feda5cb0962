//! # Perimeter Calculation
//!
//! Perimeter of common plane shapes, selected by the `shape` input. Every
//! shape produces the same output set: the numeric perimeter, the formula
//! used, the substituted calculation string, a short shape description, and
//! the perimeter spelled out in words.

use std::f64::consts::PI;

use serde::Serialize;

use crate::calculators::to_outputs;
use crate::errors::{CalcError, CalcResult};
use crate::format::{format_number, number_to_words, round_to_precision, GEOMETRY_PRECISION};
use crate::inputs::{FlatInputs, ValueMap};
use crate::registry::Calculator;

#[derive(Debug, Clone)]
pub enum PerimeterInput {
    Square { side: f64 },
    Rectangle { length: f64, width: f64 },
    Triangle { side_a: f64, side_b: f64, side_c: f64 },
    Circle { radius: f64 },
    CircleFromDiameter { diameter: f64 },
    Parallelogram { base: f64, side: f64 },
    Rhombus { side: f64 },
    Trapezoid { side_a: f64, side_b: f64, side_c: f64, side_d: f64 },
    RegularPolygon { sides: f64, side_length: f64 },
}

fn require_positive(inputs: &FlatInputs, name: &str) -> CalcResult<f64> {
    let value = inputs.require_f64(name)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(
            name,
            value.to_string(),
            "must be positive",
        ));
    }
    Ok(value)
}

impl PerimeterInput {
    pub fn from_inputs(inputs: &FlatInputs) -> CalcResult<Self> {
        // Manifests name the discriminator shapeType; shape is a courtesy alias
        let shape = inputs
            .get_str("shapeType")
            .or_else(|| inputs.get_str("shape"))
            .ok_or_else(|| CalcError::missing_field("shapeType"))?;
        match shape {
            "square" => Ok(PerimeterInput::Square {
                side: require_positive(inputs, "side")?,
            }),
            "rectangle" => Ok(PerimeterInput::Rectangle {
                length: require_positive(inputs, "length")?,
                width: require_positive(inputs, "width")?,
            }),
            "triangle" => Ok(PerimeterInput::Triangle {
                side_a: require_positive(inputs, "sideA")?,
                side_b: require_positive(inputs, "sideB")?,
                side_c: require_positive(inputs, "sideC")?,
            }),
            "circle" => {
                // Accept either radius or diameter, radius winning when both appear
                if inputs.has_value("radius") {
                    Ok(PerimeterInput::Circle {
                        radius: require_positive(inputs, "radius")?,
                    })
                } else if inputs.has_value("diameter") {
                    Ok(PerimeterInput::CircleFromDiameter {
                        diameter: require_positive(inputs, "diameter")?,
                    })
                } else {
                    Err(CalcError::missing_field("radius"))
                }
            }
            "parallelogram" => Ok(PerimeterInput::Parallelogram {
                base: require_positive(inputs, "base")?,
                side: require_positive(inputs, "side")?,
            }),
            "rhombus" => Ok(PerimeterInput::Rhombus {
                side: require_positive(inputs, "side")?,
            }),
            "trapezoid" => Ok(PerimeterInput::Trapezoid {
                side_a: require_positive(inputs, "sideA")?,
                side_b: require_positive(inputs, "sideB")?,
                side_c: require_positive(inputs, "sideC")?,
                side_d: require_positive(inputs, "sideD")?,
            }),
            "regular-polygon" => {
                let sides = require_positive(inputs, "numberOfSides")?;
                if sides.fract() != 0.0 || sides < 3.0 {
                    return Err(CalcError::invalid_input(
                        "numberOfSides",
                        sides.to_string(),
                        "must be a whole number of at least 3",
                    ));
                }
                Ok(PerimeterInput::RegularPolygon {
                    sides,
                    side_length: require_positive(inputs, "sideLength")?,
                })
            }
            other => Err(CalcError::invalid_input(
                "shape",
                other,
                "must be one of: square, rectangle, triangle, circle, parallelogram, rhombus, trapezoid, regular-polygon",
            )),
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        if let PerimeterInput::Triangle {
            side_a,
            side_b,
            side_c,
        } = *self
        {
            if side_a + side_b <= side_c || side_a + side_c <= side_b || side_b + side_c <= side_a {
                return Err(CalcError::domain(
                    "perimeter",
                    "Invalid triangle: the sum of any two sides must be greater than the third side",
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerimeterResult {
    pub shape: String,
    pub perimeter: f64,
    pub formula: String,
    pub calculation: String,
    pub shape_info: String,
    pub perimeter_in_words: String,
}

pub fn calculate(input: &PerimeterInput) -> CalcResult<PerimeterResult> {
    input.validate()?;

    let (shape, perimeter, formula, calculation, shape_info) = match *input {
        PerimeterInput::Square { side } => (
            "square",
            4.0 * side,
            "P = 4s".to_string(),
            format!("P = 4 × {}", format_number(side)),
            "A square has four equal sides".to_string(),
        ),
        PerimeterInput::Rectangle { length, width } => (
            "rectangle",
            2.0 * (length + width),
            "P = 2(l + w)".to_string(),
            format!(
                "P = 2 × ({} + {})",
                format_number(length),
                format_number(width)
            ),
            "A rectangle has two pairs of equal sides".to_string(),
        ),
        PerimeterInput::Triangle {
            side_a,
            side_b,
            side_c,
        } => (
            "triangle",
            side_a + side_b + side_c,
            "P = a + b + c".to_string(),
            format!(
                "P = {} + {} + {}",
                format_number(side_a),
                format_number(side_b),
                format_number(side_c)
            ),
            "A triangle's perimeter is the sum of its three sides".to_string(),
        ),
        PerimeterInput::Circle { radius } => (
            "circle",
            2.0 * PI * radius,
            "P = 2πr".to_string(),
            format!("P = 2 × π × {}", format_number(radius)),
            "A circle's perimeter is its circumference".to_string(),
        ),
        PerimeterInput::CircleFromDiameter { diameter } => (
            "circle",
            PI * diameter,
            "P = πd".to_string(),
            format!("P = π × {}", format_number(diameter)),
            "A circle's perimeter is its circumference".to_string(),
        ),
        PerimeterInput::Parallelogram { base, side } => (
            "parallelogram",
            2.0 * (base + side),
            "P = 2(b + s)".to_string(),
            format!("P = 2 × ({} + {})", format_number(base), format_number(side)),
            "A parallelogram has two pairs of equal opposite sides".to_string(),
        ),
        PerimeterInput::Rhombus { side } => (
            "rhombus",
            4.0 * side,
            "P = 4s".to_string(),
            format!("P = 4 × {}", format_number(side)),
            "A rhombus has four equal sides".to_string(),
        ),
        PerimeterInput::Trapezoid {
            side_a,
            side_b,
            side_c,
            side_d,
        } => (
            "trapezoid",
            side_a + side_b + side_c + side_d,
            "P = a + b + c + d".to_string(),
            format!(
                "P = {} + {} + {} + {}",
                format_number(side_a),
                format_number(side_b),
                format_number(side_c),
                format_number(side_d)
            ),
            "A trapezoid's perimeter is the sum of its four sides".to_string(),
        ),
        PerimeterInput::RegularPolygon { sides, side_length } => (
            "regular-polygon",
            sides * side_length,
            "P = n × s".to_string(),
            format!("P = {} × {}", format_number(sides), format_number(side_length)),
            "A regular polygon has equal sides and equal angles".to_string(),
        ),
    };

    let perimeter = round_to_precision(perimeter, GEOMETRY_PRECISION);

    Ok(PerimeterResult {
        shape: shape.to_string(),
        perimeter,
        formula,
        calculation: format!("{} = {}", calculation, format_number(perimeter)),
        shape_info,
        perimeter_in_words: number_to_words(perimeter),
    })
}

pub struct PerimeterCalculator;

impl Calculator for PerimeterCalculator {
    fn key(&self) -> &'static str {
        "PERIMETER_CALCULATOR"
    }

    fn name(&self) -> &'static str {
        "Perimeter Calculator"
    }

    fn calculate(&self, inputs: &FlatInputs) -> CalcResult<ValueMap> {
        let input = PerimeterInput::from_inputs(inputs)?;
        to_outputs(&calculate(&input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_square() {
        let result = calculate(&PerimeterInput::Square { side: 5.0 }).unwrap();
        assert_eq!(result.perimeter, 20.0);
        assert_eq!(result.formula, "P = 4s");
        assert_eq!(result.calculation, "P = 4 × 5 = 20");
        assert_eq!(result.perimeter_in_words, "20");
    }

    #[test]
    fn test_rectangle() {
        let result = calculate(&PerimeterInput::Rectangle {
            length: 8.0,
            width: 3.0,
        })
        .unwrap();
        assert_eq!(result.perimeter, 22.0);
    }

    #[test]
    fn test_triangle_inequality_enforced() {
        let err = calculate(&PerimeterInput::Triangle {
            side_a: 1.0,
            side_b: 1.0,
            side_c: 5.0,
        })
        .unwrap_err();
        assert!(err.to_string().contains(
            "Invalid triangle: the sum of any two sides must be greater than the third side"
        ));
    }

    #[test]
    fn test_valid_triangle() {
        let result = calculate(&PerimeterInput::Triangle {
            side_a: 3.0,
            side_b: 4.0,
            side_c: 5.0,
        })
        .unwrap();
        assert_eq!(result.perimeter, 12.0);
    }

    #[test]
    fn test_circle_circumference() {
        let result = calculate(&PerimeterInput::Circle { radius: 1.0 }).unwrap();
        assert!((result.perimeter - 6.283185).abs() < 1e-6);
        assert!(result.perimeter_in_words.starts_with("approximately"));
    }

    #[test]
    fn test_parallelogram_and_rhombus() {
        let parallelogram = calculate(&PerimeterInput::Parallelogram {
            base: 6.0,
            side: 4.0,
        })
        .unwrap();
        assert_eq!(parallelogram.perimeter, 20.0);

        let rhombus = calculate(&PerimeterInput::Rhombus { side: 7.0 }).unwrap();
        assert_eq!(rhombus.perimeter, 28.0);
    }

    #[test]
    fn test_trapezoid() {
        let result = calculate(&PerimeterInput::Trapezoid {
            side_a: 3.0,
            side_b: 4.0,
            side_c: 5.0,
            side_d: 6.0,
        })
        .unwrap();
        assert_eq!(result.perimeter, 18.0);
    }

    #[test]
    fn test_regular_polygon() {
        let result = calculate(&PerimeterInput::RegularPolygon {
            sides: 6.0,
            side_length: 2.5,
        })
        .unwrap();
        assert_eq!(result.perimeter, 15.0);
    }

    #[test]
    fn test_circle_accepts_diameter_with_diameter_display() {
        let mut inputs = FlatInputs::new();
        inputs.insert("shapeType", json!("circle"));
        inputs.insert("diameter", json!(2));
        let outputs = PerimeterCalculator.calculate(&inputs).unwrap();
        assert!((outputs["perimeter"].as_f64().unwrap() - 6.283185).abs() < 1e-6);
        assert_eq!(outputs["formula"], json!("P = πd"));
        assert_eq!(outputs["calculation"], json!("P = π × 2 = 6.283185"));
    }

    #[test]
    fn test_shape_type_discriminator_in_sections() {
        use crate::inputs::InputPayload;

        let payload = InputPayload::from_value(json!({
            "shape-selection": {"shapeType": "square"},
            "square-dimensions": {"side": 5}
        }))
        .unwrap();
        let outputs = PerimeterCalculator.calculate(&payload.flatten()).unwrap();
        assert_eq!(outputs["perimeter"], json!(20.0));
    }

    #[test]
    fn test_unknown_shape_rejected() {
        let mut inputs = FlatInputs::new();
        inputs.insert("shapeType", json!("dodecahedron"));
        assert!(PerimeterCalculator.calculate(&inputs).is_err());
    }

    #[test]
    fn test_nonpositive_dimension_rejected() {
        let mut inputs = FlatInputs::new();
        inputs.insert("shapeType", json!("square"));
        inputs.insert("side", json!(-2));
        assert!(PerimeterCalculator.calculate(&inputs).is_err());
    }
}
