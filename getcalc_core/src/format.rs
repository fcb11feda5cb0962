//! # Numeric Formatting
//!
//! Rounding and display formatting shared by every calculator strategy.
//! Geometry calculators round to 6 decimal places; display strings render
//! integers without a decimal point and trim trailing zeros.

/// Decimal places used by the geometry calculators.
pub const GEOMETRY_PRECISION: u8 = 6;

/// Round half away from zero at a fixed number of decimal places.
pub fn round_to_precision(value: f64, precision: u8) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (value * scale).round() / scale
}

/// Format a number for display: integers without a decimal point,
/// everything else rounded to 6 places with trailing zeros trimmed.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = round_to_precision(value, GEOMETRY_PRECISION);
    if rounded == rounded.trunc() && rounded.abs() < 1e15 {
        return format!("{}", rounded.trunc() as i64);
    }
    let text = format!("{:.*}", GEOMETRY_PRECISION as usize, rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Format a 2D point as `(x, y)`.
pub fn format_point(x: f64, y: f64) -> String {
    format!("({}, {})", format_number(x), format_number(y))
}

/// Greatest common divisor of two non-negative integers.
pub fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Approximate spoken rendering used by the shape calculators:
/// "zero", an integer string, or "approximately {value}" at 2 places.
pub fn number_to_words(value: f64) -> String {
    if value == 0.0 {
        return "zero".to_string();
    }
    let rounded = round_to_precision(value, 2);
    if rounded == rounded.trunc() {
        format!("{}", rounded.trunc() as i64)
    } else {
        format!("approximately {}", format_number(rounded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to_precision(2.5, 0), 3.0);
        assert_eq!(round_to_precision(-2.5, 0), -3.0);
        assert_eq!(round_to_precision(7.2111025509, 6), 7.211103);
        assert_eq!(round_to_precision(1.0000004, 6), 1.0);
    }

    #[test]
    fn test_format_number_integers() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_format_number_trims_zeros() {
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(0.666666666), "0.666667");
        assert_eq!(format_number(2.1000001), "2.1");
    }

    #[test]
    fn test_format_point() {
        assert_eq!(format_point(2.0, 3.0), "(2, 3)");
        assert_eq!(format_point(-0.5, -6.25), "(-0.5, -6.25)");
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(6, 4), 2);
        assert_eq!(gcd(4, 6), 2);
        assert_eq!(gcd(5, 0), 5);
        assert_eq!(gcd(7, 13), 1);
    }

    #[test]
    fn test_number_to_words() {
        assert_eq!(number_to_words(0.0), "zero");
        assert_eq!(number_to_words(16.0), "16");
        assert_eq!(number_to_words(31.415927), "approximately 31.42");
    }
}
