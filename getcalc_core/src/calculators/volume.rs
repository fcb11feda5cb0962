//! # Volume Calculation
//!
//! Volume of common solids, selected by the `shape` input. Output set
//! mirrors the perimeter calculator: numeric volume, formula, substituted
//! calculation, shape description, and the volume in words.

use std::f64::consts::PI;

use serde::Serialize;

use crate::calculators::to_outputs;
use crate::errors::{CalcError, CalcResult};
use crate::format::{format_number, number_to_words, round_to_precision, GEOMETRY_PRECISION};
use crate::inputs::{FlatInputs, ValueMap};
use crate::registry::Calculator;

#[derive(Debug, Clone)]
pub enum VolumeInput {
    Cube { side: f64 },
    RectangularPrism { length: f64, width: f64, height: f64 },
    Cylinder { radius: f64, height: f64 },
    Sphere { radius: f64 },
    Cone { radius: f64, height: f64 },
    Pyramid { base_length: f64, base_width: f64, height: f64 },
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

impl VolumeInput {
    pub fn from_inputs(inputs: &FlatInputs) -> CalcResult<Self> {
        // Manifests name the discriminator shapeType; shape is a courtesy alias
        let shape = inputs
            .get_str("shapeType")
            .or_else(|| inputs.get_str("shape"))
            .ok_or_else(|| CalcError::missing_field("shapeType"))?;
        match shape {
            "cube" => Ok(VolumeInput::Cube {
                side: require_positive(inputs, "side")?,
            }),
            "rectangular-prism" => Ok(VolumeInput::RectangularPrism {
                length: require_positive(inputs, "length")?,
                width: require_positive(inputs, "width")?,
                height: require_positive(inputs, "height")?,
            }),
            "cylinder" => Ok(VolumeInput::Cylinder {
                radius: require_positive(inputs, "radius")?,
                height: require_positive(inputs, "height")?,
            }),
            "sphere" => Ok(VolumeInput::Sphere {
                radius: require_positive(inputs, "radius")?,
            }),
            "cone" => Ok(VolumeInput::Cone {
                radius: require_positive(inputs, "radius")?,
                height: require_positive(inputs, "height")?,
            }),
            "pyramid" => Ok(VolumeInput::Pyramid {
                base_length: require_positive(inputs, "baseLength")?,
                base_width: require_positive(inputs, "baseWidth")?,
                height: require_positive(inputs, "height")?,
            }),
            other => Err(CalcError::invalid_input(
                "shape",
                other,
                "must be one of: cube, rectangular-prism, cylinder, sphere, cone, pyramid",
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeResult {
    pub shape: String,
    pub volume: f64,
    pub formula: String,
    pub calculation: String,
    pub shape_info: String,
    pub volume_in_words: String,
}

pub fn calculate(input: &VolumeInput) -> CalcResult<VolumeResult> {
    let (shape, volume, formula, calculation, shape_info) = match *input {
        VolumeInput::Cube { side } => (
            "cube",
            side.powi(3),
            "V = s³".to_string(),
            format!("V = {}³", format_number(side)),
            "A cube has equal length, width, and height".to_string(),
        ),
        VolumeInput::RectangularPrism {
            length,
            width,
            height,
        } => (
            "rectangular-prism",
            length * width * height,
            "V = l × w × h".to_string(),
            format!(
                "V = {} × {} × {}",
                format_number(length),
                format_number(width),
                format_number(height)
            ),
            "A rectangular prism is a box shape".to_string(),
        ),
        VolumeInput::Cylinder { radius, height } => (
            "cylinder",
            PI * radius * radius * height,
            "V = πr²h".to_string(),
            format!(
                "V = π × {}² × {}",
                format_number(radius),
                format_number(height)
            ),
            "A cylinder has circular cross-sections".to_string(),
        ),
        VolumeInput::Sphere { radius } => (
            "sphere",
            4.0 / 3.0 * PI * radius.powi(3),
            "V = (4/3)πr³".to_string(),
            format!("V = (4/3) × π × {}³", format_number(radius)),
            "A sphere is perfectly round".to_string(),
        ),
        VolumeInput::Cone { radius, height } => (
            "cone",
            PI * radius * radius * height / 3.0,
            "V = (1/3)πr²h".to_string(),
            format!(
                "V = (1/3) × π × {}² × {}",
                format_number(radius),
                format_number(height)
            ),
            "A cone tapers from a circular base to a point".to_string(),
        ),
        VolumeInput::Pyramid {
            base_length,
            base_width,
            height,
        } => (
            "pyramid",
            base_length * base_width * height / 3.0,
            "V = (1/3) × l × w × h".to_string(),
            format!(
                "V = (1/3) × {} × {} × {}",
                format_number(base_length),
                format_number(base_width),
                format_number(height)
            ),
            "A pyramid tapers from a rectangular base to a point".to_string(),
        ),
    };

    let volume = round_to_precision(volume, GEOMETRY_PRECISION);

    Ok(VolumeResult {
        shape: shape.to_string(),
        volume,
        formula,
        calculation: format!("{} = {}", calculation, format_number(volume)),
        shape_info,
        volume_in_words: number_to_words(volume),
    })
}

pub struct VolumeCalculator;

impl Calculator for VolumeCalculator {
    fn key(&self) -> &'static str {
        "VOLUME_CALCULATOR"
    }

    fn name(&self) -> &'static str {
        "Volume Calculator"
    }

    fn calculate(&self, inputs: &FlatInputs) -> CalcResult<ValueMap> {
        let input = VolumeInput::from_inputs(inputs)?;
        to_outputs(&calculate(&input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cube() {
        let result = calculate(&VolumeInput::Cube { side: 3.0 }).unwrap();
        assert_eq!(result.volume, 27.0);
        assert_eq!(result.calculation, "V = 3³ = 27");
    }

    #[test]
    fn test_rectangular_prism() {
        let result = calculate(&VolumeInput::RectangularPrism {
            length: 2.0,
            width: 3.0,
            height: 4.0,
        })
        .unwrap();
        assert_eq!(result.volume, 24.0);
    }

    #[test]
    fn test_cylinder() {
        let result = calculate(&VolumeInput::Cylinder {
            radius: 3.0,
            height: 5.0,
        })
        .unwrap();
        assert!((result.volume - 141.371669).abs() < 1e-6);
    }

    #[test]
    fn test_sphere() {
        let result = calculate(&VolumeInput::Sphere { radius: 4.0 }).unwrap();
        assert!((result.volume - 268.082573).abs() < 1e-6);
    }

    #[test]
    fn test_cone() {
        let result = calculate(&VolumeInput::Cone {
            radius: 3.0,
            height: 4.0,
        })
        .unwrap();
        assert!((result.volume - 37.699112).abs() < 1e-6);
    }

    #[test]
    fn test_pyramid() {
        let result = calculate(&VolumeInput::Pyramid {
            base_length: 6.0,
            base_width: 5.0,
            height: 4.0,
        })
        .unwrap();
        assert_eq!(result.volume, 40.0);
    }

    #[test]
    fn test_shape_type_discriminator() {
        let mut inputs = FlatInputs::new();
        inputs.insert("shapeType", json!("cube"));
        inputs.insert("side", json!(3));
        let outputs = VolumeCalculator.calculate(&inputs).unwrap();
        assert_eq!(outputs["volume"], json!(27.0));
    }

    #[test]
    fn test_unknown_shape_rejected() {
        let mut inputs = FlatInputs::new();
        inputs.insert("shapeType", json!("torus"));
        assert!(VolumeCalculator.calculate(&inputs).is_err());
    }

    #[test]
    fn test_missing_dimension_rejected() {
        let mut inputs = FlatInputs::new();
        inputs.insert("shapeType", json!("cylinder"));
        inputs.insert("radius", json!(3));
        assert!(VolumeCalculator.calculate(&inputs).is_err());
    }
}
