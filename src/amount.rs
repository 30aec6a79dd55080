use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::RawAmount;

/// where an extracted amount came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountSource {
    /// stored as a number, passed through
    Numeric,
    /// digits recovered from a formatted string
    Parsed,
    /// nothing usable in the contract, fallback returned
    Fallback,
}

/// amount together with its provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedAmount {
    pub value: Money,
    pub source: AmountSource,
}

impl ExtractedAmount {
    pub fn is_fallback(&self) -> bool {
        self.source == AmountSource::Fallback
    }

    fn fallback(value: Money) -> Self {
        Self {
            value,
            source: AmountSource::Fallback,
        }
    }
}

/// extract a canonical amount from a stored contract amount
///
/// Never fails: anything unreadable degrades to `fallback` and the source says
/// so. Finite numbers are kept exactly as stored, without cent rounding.
/// Strings are not decimal aware: every ASCII digit is kept and the result
/// is read as an integer, so `"1,200.50"` yields `120050`.
pub fn extract_amount(raw: &RawAmount, fallback: Money) -> ExtractedAmount {
    let extracted = match raw {
        RawAmount::Number(n) => Money::try_from_f64_exact(*n).map(|value| ExtractedAmount {
            value,
            source: AmountSource::Numeric,
        }),
        RawAmount::Text(s) => digits_of(s).map(|value| ExtractedAmount {
            value,
            source: AmountSource::Parsed,
        }),
        RawAmount::Missing | RawAmount::Other(_) => None,
    };

    extracted.unwrap_or_else(|| {
        tracing::debug!(?raw, %fallback, "contract amount unusable, using fallback");
        ExtractedAmount::fallback(fallback)
    })
}

fn digits_of(s: &str) -> Option<Money> {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok().map(Money::from_major)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fallback() -> Money {
        Money::from_major(600)
    }

    #[test]
    fn test_numbers_pass_through() {
        for n in [0.0, 650.0, 1050.5, 12_000.0] {
            let result = extract_amount(&RawAmount::Number(n), fallback());
            assert_eq!(result.value, Money::from_f64_lossy(n));
            assert_eq!(result.source, AmountSource::Numeric);
        }
        let cents = extract_amount(&RawAmount::Number(1050.5), fallback());
        assert_eq!(cents.value, Money::from_decimal(dec!(1050.50)));
    }

    #[test]
    fn test_sub_cent_numbers_are_not_rounded() {
        let result = extract_amount(&RawAmount::Number(650.125), Money::ZERO);
        assert_eq!(result.value.as_decimal(), dec!(650.125));
        assert_eq!(result.source, AmountSource::Numeric);

        let small = extract_amount(&RawAmount::Number(0.375), Money::ZERO);
        assert_eq!(small.value.as_decimal(), dec!(0.375));
    }

    #[test]
    fn test_non_finite_number_falls_back() {
        let result = extract_amount(&RawAmount::Number(f64::NAN), fallback());
        assert_eq!(result, ExtractedAmount::fallback(fallback()));
    }

    #[test]
    fn test_digit_free_strings_fall_back() {
        for s in ["", "€", "à définir", "N/A", "   "] {
            let result = extract_amount(&RawAmount::from(s), fallback());
            assert_eq!(result.value, fallback(), "input {:?}", s);
            assert!(result.is_fallback());
        }
    }

    #[test]
    fn test_formatted_strings_concatenate_digits() {
        let cases = [
            ("650€", 650),
            ("650 €", 650),
            ("1 200,00€", 120_000),
            ("1,200.50", 120_050),
            ("€ 0900", 900),
        ];
        for (input, expected) in cases {
            let result = extract_amount(&RawAmount::from(input), fallback());
            assert_eq!(result.value, Money::from_major(expected), "input {:?}", input);
            assert_eq!(result.source, AmountSource::Parsed);
        }
    }

    #[test]
    fn test_overflowing_digits_fall_back() {
        let raw = RawAmount::from("99999999999999999999999");
        assert!(extract_amount(&raw, fallback()).is_fallback());
    }

    #[test]
    fn test_missing_and_other_shapes_fall_back() {
        assert!(extract_amount(&RawAmount::Missing, fallback()).is_fallback());
        let object = RawAmount::Other(serde_json::json!({ "value": 650 }));
        assert!(extract_amount(&object, fallback()).is_fallback());
    }
}
