use crate::{error::DashboardError, types::ScalePreference};

pub const Q18_14_FRACTIONAL_BITS: u32 = 14;
pub const Q20_12_FRACTIONAL_BITS: u32 = 12;

pub const ZERO_CELSIUS_K: f64 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPointFormat {
    fractional_bits: u32,
}

impl FixedPointFormat {
    pub const Q18_14: Self = Self {
        fractional_bits: Q18_14_FRACTIONAL_BITS,
    };
    pub const Q20_12: Self = Self {
        fractional_bits: Q20_12_FRACTIONAL_BITS,
    };

    pub fn from_bits(fractional_bits: u32) -> Option<Self> {
        match fractional_bits {
            Q18_14_FRACTIONAL_BITS => Some(Self::Q18_14),
            Q20_12_FRACTIONAL_BITS => Some(Self::Q20_12),
            _ => None,
        }
    }

    pub fn fractional_bits(self) -> u32 {
        self.fractional_bits
    }

    pub fn scale(self) -> f64 {
        f64::from(1u32 << self.fractional_bits)
    }
}

impl Default for FixedPointFormat {
    fn default() -> Self {
        Self::Q18_14
    }
}

// Surrounding whitespace is ignored; anything else that is not a signed
// decimal integer is rejected here rather than surfacing later as NaN.
pub fn decode_fixed_point(body: &str, format: FixedPointFormat) -> Result<f64, DashboardError> {
    let raw = body
        .trim()
        .parse::<i64>()
        .map_err(|_| DashboardError::Parse {
            body: body.to_string(),
        })?;
    Ok(raw as f64 / format.scale())
}

// Rounds half away from zero (`f64::round`), so 2.5 K shows as 3 and a
// Celsius value of -0.5 shows as -1.
pub fn convert(kelvin: f64, scale: ScalePreference) -> i64 {
    let value = match scale {
        ScalePreference::Kelvin => kelvin,
        ScalePreference::Celsius => kelvin - ZERO_CELSIUS_K,
        ScalePreference::Fahrenheit => 1.8 * (kelvin - ZERO_CELSIUS_K) + 32.0,
    };
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn decodes_integer_over_power_of_two() {
        for format in [FixedPointFormat::Q18_14, FixedPointFormat::Q20_12] {
            for n in [-1_000_000i64, -1, 0, 1, 4481, 286_720, 4_915_200, 11_638_810] {
                let kelvin = decode_fixed_point(&n.to_string(), format).expect("integer body");
                let expected = n as f64 / 2f64.powi(format.fractional_bits() as i32);
                assert!(close(kelvin, expected), "{n} with {format:?}");
            }
        }
    }

    #[test]
    fn q18_14_body_near_zero_kelvin() {
        let kelvin = decode_fixed_point("4481", FixedPointFormat::Q18_14).expect("decodes");
        assert!(close(kelvin, 4481.0 / 16384.0));
        assert!((kelvin - 0.2734).abs() < 1e-4);
        assert_eq!(convert(kelvin, ScalePreference::Kelvin), 0);
    }

    #[test]
    fn q20_12_body_renders_celsius() {
        let kelvin = decode_fixed_point("286720", FixedPointFormat::Q20_12).expect("decodes");
        assert!(close(kelvin, 70.0));
        assert_eq!(convert(kelvin, ScalePreference::Celsius), -203);
    }

    #[test]
    fn trims_trailing_newline() {
        let kelvin = decode_fixed_point("16384\r\n", FixedPointFormat::Q18_14).expect("decodes");
        assert!(close(kelvin, 1.0));
    }

    #[test]
    fn rejects_non_numeric_bodies() {
        for body in ["", "   ", "abc", "12.5", "NaN", "0x10"] {
            assert_eq!(
                decode_fixed_point(body, FixedPointFormat::Q18_14),
                Err(DashboardError::Parse {
                    body: body.to_string()
                }),
                "{body:?}"
            );
        }
    }

    // A lenient prefix parse would read "4481abc" as 4481; the decoder
    // treats it as malformed instead.
    #[test]
    fn rejects_trailing_garbage_that_lenient_integer_parsing_would_accept() {
        assert!(decode_fixed_point("4481abc", FixedPointFormat::Q18_14).is_err());
        assert!(decode_fixed_point("12 34", FixedPointFormat::Q18_14).is_err());
    }

    #[test]
    fn conversion_formulas() {
        let kelvin = 300.0;
        assert_eq!(convert(kelvin, ScalePreference::Kelvin), 300);
        assert_eq!(convert(kelvin, ScalePreference::Celsius), 27);
        assert_eq!(convert(kelvin, ScalePreference::Fahrenheit), 80);

        let freezing = ZERO_CELSIUS_K;
        assert_eq!(convert(freezing, ScalePreference::Celsius), 0);
        assert_eq!(convert(freezing, ScalePreference::Fahrenheit), 32);
        assert_eq!(convert(373.15, ScalePreference::Fahrenheit), 212);
        assert_eq!(convert(0.0, ScalePreference::Celsius), -273);
        assert_eq!(convert(0.0, ScalePreference::Fahrenheit), -460);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(convert(2.5, ScalePreference::Kelvin), 3);
        assert_eq!(convert(3.5, ScalePreference::Kelvin), 4);
        assert_eq!(convert(2.4999, ScalePreference::Kelvin), 2);
        assert_eq!(convert(-2.5, ScalePreference::Kelvin), -3);
    }

    #[test]
    fn only_supported_fractional_bits_build_a_format() {
        assert_eq!(FixedPointFormat::from_bits(14), Some(FixedPointFormat::Q18_14));
        assert_eq!(FixedPointFormat::from_bits(12), Some(FixedPointFormat::Q20_12));
        assert_eq!(FixedPointFormat::from_bits(8), None);
    }
}
