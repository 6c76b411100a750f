//! Fixed point numbers encoded as a `[significand, exponent]` pair.
//!
//! Both elements are written on-chain as unsigned 64-bit integers. They are read back
//! as the signed 64-bit value with the same bit pattern, so an exponent of
//! `0xFFFF_FFFF_FFFF_FFF4` is `-12`.

use std::fmt::Display;

use serde::{Serialize, Serializer};

use crate::{
    error::{Error, Result},
    plutus_data::PlutusData,
};

/// Plutus constructor tag used when re-encoding a fixed point pair.
pub(crate) const FIXED_POINT_TAG: u64 = 124;

/// Largest power of ten that is exactly representable as an `f64`.
const MAX_EXACT_POW10: i64 = 22;

/// A decimal number `significand * 10^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedPoint {
    /// Significand, reinterpreted as signed.
    pub significand: i64,
    /// Base 10 exponent, reinterpreted as signed.
    pub exponent: i64,
}

impl FixedPoint {
    /// Create a fixed point number from its signed components.
    #[must_use]
    pub fn new(significand: i64, exponent: i64) -> Self {
        Self {
            significand,
            exponent,
        }
    }

    /// Decode a `[significand, exponent]` pair, optionally wrapped in a constructor
    /// tag.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedNumber` if the value is not a two element list of
    /// integers representable in 64 bits.
    pub fn from_plutus_data(value: &PlutusData) -> Result<Self> {
        let pair = match value {
            PlutusData::Tagged(_, payload) => payload.as_ref(),
            other => other,
        };
        let PlutusData::List(items) = pair else {
            return Err(Error::MalformedNumber(format!(
                "expected a [significand, exponent] list, got a {}",
                pair.kind()
            )));
        };
        let [significand, exponent] = items.as_slice() else {
            return Err(Error::MalformedNumber(format!(
                "expected 2 elements in a fixed point pair, got {}",
                items.len()
            )));
        };
        Ok(Self::new(
            reinterpret_signed(significand, "significand")?,
            reinterpret_signed(exponent, "exponent")?,
        ))
    }

    /// Re-encode as a constructor tagged pair of unsigned 64-bit patterns.
    #[must_use]
    pub fn to_plutus_data(self) -> PlutusData {
        PlutusData::Tagged(
            FIXED_POINT_TAG,
            Box::new(PlutusData::List(vec![
                PlutusData::Integer(i128::from(u64::from_ne_bytes(
                    self.significand.to_ne_bytes(),
                ))),
                PlutusData::Integer(i128::from(u64::from_ne_bytes(
                    self.exponent.to_ne_bytes(),
                ))),
            ])),
        )
    }

    /// The value as a floating point number.
    ///
    /// Negative exponents divide by an exact power of ten, so the result is the closest
    /// `f64` to the decimal value whenever the significand and the power of ten are
    /// both exactly representable.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(self) -> f64 {
        let significand = self.significand as f64;
        match self.exponent {
            exp if (0..=MAX_EXACT_POW10).contains(&exp) => significand * pow10(exp),
            exp if (-MAX_EXACT_POW10..0).contains(&exp) => significand / pow10(-exp),
            exp => {
                let exp = i32::try_from(exp).unwrap_or(if exp < 0 { i32::MIN } else { i32::MAX });
                significand * 10f64.powi(exp)
            },
        }
    }
}

impl Display for FixedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl Serialize for FixedPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

/// Decode a `[significand, exponent]` pair of integers to its value.
///
/// # Errors
///
/// Returns `Error::MalformedNumber` if either element is not an integer representable
/// in 64 bits, or if the pair does not have exactly two elements.
pub fn decode_fixed_point(pair: &[PlutusData]) -> Result<f64> {
    FixedPoint::from_plutus_data(&PlutusData::List(pair.to_vec())).map(FixedPoint::to_f64)
}

/// `10^exp` for `0 <= exp <= 22`, computed exactly.
fn pow10(exp: i64) -> f64 {
    (0..exp).fold(1.0, |acc, _| acc * 10.0)
}

/// Reinterpret an integer as a signed 64-bit value.
///
/// Values in `0..=u64::MAX` keep their bit pattern, values already negative are used
/// as is when they fit in an `i64`.
fn reinterpret_signed(value: &PlutusData, what: &str) -> Result<i64> {
    let PlutusData::Integer(value) = value else {
        return Err(Error::MalformedNumber(format!(
            "{what} must be an integer, got a {}",
            value.kind()
        )));
    };
    if let Ok(unsigned) = u64::try_from(*value) {
        return Ok(i64::from_ne_bytes(unsigned.to_ne_bytes()));
    }
    i64::try_from(*value)
        .map_err(|_| Error::MalformedNumber(format!("{what} {value} does not fit in 64 bits")))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    /// Build a bare `[significand, exponent]` list.
    fn pair(significand: i128, exponent: i128) -> Vec<PlutusData> {
        vec![
            PlutusData::Integer(significand),
            PlutusData::Integer(exponent),
        ]
    }

    #[test_case(1_059_000_000_000_000, -12, 1059.0 ; "negative exponent as signed")]
    #[test_case(1_059_000_000_000_000, i128::from(u64::MAX) - 11, 1059.0 ; "negative exponent as unsigned pattern")]
    #[test_case(1059, i128::from(u64::MAX) - 2, 1.059 ; "three decimal places")]
    #[test_case(24475, i128::from(u64::MAX) - 4, 0.244_75 ; "ada usd sample")]
    #[test_case(4_085_801_838_610_827, i128::from(u64::MAX) - 14, 4.085_801_838_610_827 ; "usd ada sample")]
    #[test_case(42, 0, 42.0 ; "zero exponent")]
    #[test_case(15, 3, 15_000.0 ; "positive exponent")]
    #[test_case(i128::from(u64::MAX), 0, -1.0 ; "significand with high bit set")]
    fn test_decode_fixed_point(significand: i128, exponent: i128, expected: f64) {
        let value = decode_fixed_point(&pair(significand, exponent)).expect("Error decoding pair");
        assert!(
            (value - expected).abs() <= f64::EPSILON * expected.abs(),
            "{value} != {expected}"
        );
    }

    #[test]
    fn test_exact_decimal() {
        let value = decode_fixed_point(&pair(1059, -3)).expect("Error decoding pair");
        assert_eq!(value.to_bits(), 1.059_f64.to_bits());

        let value = decode_fixed_point(&pair(1_059_000_000_000_000, i128::from(u64::MAX) - 11))
            .expect("Error decoding pair");
        assert_eq!(value.to_bits(), 1059.0_f64.to_bits());
    }

    #[test]
    fn test_matches_reinterpretation() {
        for (significand, exponent) in [(7_u64, u64::MAX), (u64::MAX - 99, 2), (123, 18), (5, u64::MAX - 17)] {
            let expected = FixedPoint::new(
                i64::from_ne_bytes(significand.to_ne_bytes()),
                i64::from_ne_bytes(exponent.to_ne_bytes()),
            );
            let decoded = FixedPoint::from_plutus_data(&PlutusData::List(pair(
                i128::from(significand),
                i128::from(exponent),
            )))
            .expect("Error decoding pair");
            assert_eq!(decoded, expected);
            assert_eq!(
                decode_fixed_point(&pair(i128::from(significand), i128::from(exponent)))
                    .expect("Error decoding pair")
                    .to_bits(),
                expected.to_f64().to_bits()
            );
        }
    }

    #[test]
    fn test_tagged_pair() {
        let value = PlutusData::Tagged(
            FIXED_POINT_TAG,
            Box::new(PlutusData::List(pair(24475, i128::from(u64::MAX) - 4))),
        );
        let decoded = FixedPoint::from_plutus_data(&value).expect("Error decoding pair");
        assert_eq!(decoded, FixedPoint::new(24475, -5));
        assert_eq!(decoded.to_plutus_data(), value);
    }

    #[test_case(pair(1, 1_i128 << 64) ; "exponent out of range")]
    #[test_case(pair(-(1_i128 << 64), 0) ; "significand out of range")]
    #[test_case(vec![PlutusData::Integer(1)] ; "single element")]
    #[test_case(vec![PlutusData::Integer(1), PlutusData::Integer(2), PlutusData::Integer(3)] ; "three elements")]
    #[test_case(vec![PlutusData::Bytes(vec![1]), PlutusData::Integer(2)] ; "not an integer")]
    fn test_malformed_number(pair: Vec<PlutusData>) {
        let result = decode_fixed_point(&pair);
        assert!(matches!(result, Err(Error::MalformedNumber(_))), "{result:?}");
    }
}
