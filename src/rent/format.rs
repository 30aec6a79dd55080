use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// separators and currency symbol used when displaying amounts, presentation only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountFormat {
    pub thousands_separator: String,
    pub decimal_separator: String,
    pub currency_symbol: String,
}

impl AmountFormat {
    /// `1 050,5` with a narrow no-break space, euro suffix
    pub fn french() -> Self {
        Self {
            thousands_separator: "\u{202f}".to_string(),
            decimal_separator: ",".to_string(),
            currency_symbol: "€".to_string(),
        }
    }

    /// `1,050.5`, euro suffix
    pub fn english() -> Self {
        Self {
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            currency_symbol: "€".to_string(),
        }
    }

    /// grouped thousands, at most two decimals, trailing zeros dropped
    pub fn amount(&self, amount: Money) -> String {
        let normalized = amount.round_dp(2).as_decimal().normalize();
        let text = normalized.abs().to_string();
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (text.as_str(), None),
        };

        let mut out = String::with_capacity(text.len() + 4);
        if normalized.is_sign_negative() && !normalized.is_zero() {
            out.push('-');
        }
        out.push_str(&group_thousands(int_part, &self.thousands_separator));
        if let Some(frac) = frac_part {
            out.push_str(&self.decimal_separator);
            out.push_str(frac);
        }
        out
    }

    /// amount followed by the currency symbol
    pub fn currency(&self, amount: Money) -> String {
        format!("{} {}", self.amount(amount), self.currency_symbol)
    }
}

impl Default for AmountFormat {
    fn default() -> Self {
        Self::english()
    }
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

pub fn format_amount(amount: Money, format: &AmountFormat) -> String {
    format.amount(amount)
}

pub fn format_currency(amount: Money, format: &AmountFormat) -> String {
    format.currency(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_english_grouping() {
        let f = AmountFormat::english();
        assert_eq!(f.amount(Money::from_major(0)), "0");
        assert_eq!(f.amount(Money::from_major(650)), "650");
        assert_eq!(f.amount(Money::from_major(1050)), "1,050");
        assert_eq!(f.amount(Money::from_major(1_234_567)), "1,234,567");
    }

    #[test]
    fn test_decimals_are_trimmed() {
        let f = AmountFormat::english();
        assert_eq!(f.amount(Money::from_decimal(dec!(1050.50))), "1,050.5");
        assert_eq!(f.amount(Money::from_decimal(dec!(1050.00))), "1,050");
        assert_eq!(f.amount(Money::from_decimal(dec!(99.99))), "99.99");
    }

    #[test]
    fn test_french_separators() {
        let f = AmountFormat::french();
        assert_eq!(f.amount(Money::from_decimal(dec!(1050.5))), "1\u{202f}050,5");
        assert_eq!(f.currency(Money::from_major(650)), "650 €");
        assert_eq!(format_currency(Money::from_major(12_000), &f), "12\u{202f}000 €");
    }

    #[test]
    fn test_negative_amounts() {
        let f = AmountFormat::english();
        assert_eq!(format_amount(Money::from_major(-1200), &f), "-1,200");
    }

    #[test]
    fn test_formatting_does_not_touch_the_value() {
        let amount = Money::from_decimal(dec!(1050.50));
        let _ = format_currency(amount, &AmountFormat::french());
        assert_eq!(amount.as_decimal(), dec!(1050.50));
    }
}
