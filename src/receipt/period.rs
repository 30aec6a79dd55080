use chrono::{Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{ReconciliationError, Result};

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

const ENGLISH: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const FRENCH: [&str; 12] = [
    "Janvier", "Février", "Mars", "Avril", "Mai", "Juin",
    "Juillet", "Août", "Septembre", "Octobre", "Novembre", "Décembre",
];

/// language a period label was written in, kept for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PeriodLanguage {
    #[default]
    English,
    French,
}

/// billed month, displayed as `"<Month> <Year>"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BillingPeriod {
    month: Month,
    year: i32,
    language: PeriodLanguage,
}

impl BillingPeriod {
    pub fn new(month: Month, year: i32) -> Self {
        Self {
            month,
            year,
            language: PeriodLanguage::English,
        }
    }

    pub fn in_language(mut self, language: PeriodLanguage) -> Self {
        self.language = language;
        self
    }

    /// parse `"<MonthName> <Year>"`, the year defaults to `current_year` when absent
    pub fn parse(input: &str, current_year: i32) -> Result<Self> {
        Self::parse_inner(input, Some(current_year))
    }

    /// parse `"<MonthName> <Year>"` with both tokens required
    pub fn parse_strict(input: &str) -> Result<Self> {
        Self::parse_inner(input, None)
    }

    fn parse_inner(input: &str, default_year: Option<i32>) -> Result<Self> {
        let invalid = || ReconciliationError::InvalidPeriod {
            input: input.to_string(),
        };

        let mut tokens = input.split_whitespace();
        let (month, language) = tokens.next().and_then(month_from_name).ok_or_else(invalid)?;
        let year = match tokens.next() {
            Some(token) => parse_year(token).ok_or_else(invalid)?,
            None => default_year.ok_or_else(invalid)?,
        };
        if tokens.next().is_some() {
            return Err(invalid());
        }

        Ok(Self { month, year, language })
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn language(&self) -> PeriodLanguage {
        self.language
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.number_from_month(), 1)
    }

    pub fn month_name(&self) -> &'static str {
        let idx = self.month.number_from_month() as usize - 1;
        match self.language {
            PeriodLanguage::English => ENGLISH[idx],
            PeriodLanguage::French => FRENCH[idx],
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

impl TryFrom<String> for BillingPeriod {
    type Error = ReconciliationError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse_strict(&value)
    }
}

impl From<BillingPeriod> for String {
    fn from(period: BillingPeriod) -> Self {
        period.to_string()
    }
}

fn month_from_name(token: &str) -> Option<(Month, PeriodLanguage)> {
    let lower = token.to_lowercase();
    if let Some(idx) = ENGLISH.iter().position(|n| n.to_lowercase() == lower) {
        return Some((MONTHS[idx], PeriodLanguage::English));
    }
    if let Some(idx) = FRENCH.iter().position(|n| n.to_lowercase() == lower) {
        return Some((MONTHS[idx], PeriodLanguage::French));
    }
    // french names typed without accents
    let unaccented = match lower.as_str() {
        "fevrier" => Some(Month::February),
        "aout" => Some(Month::August),
        "decembre" => Some(Month::December),
        _ => None,
    };
    unaccented.map(|m| (m, PeriodLanguage::French))
}

fn parse_year(token: &str) -> Option<i32> {
    if token.len() != 4 || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_and_year() {
        let period = BillingPeriod::parse("March 2025", 2030).unwrap();
        assert_eq!(period.month(), Month::March);
        assert_eq!(period.year(), 2025);
        assert_eq!(period.to_string(), "March 2025");
    }

    #[test]
    fn test_missing_year_uses_current_year() {
        let period = BillingPeriod::parse("March", 2026).unwrap();
        assert_eq!(period.year(), 2026);
        assert_eq!(period.to_string(), "March 2026");
    }

    #[test]
    fn test_french_names_keep_their_language() {
        let period = BillingPeriod::parse("février 2025", 2025).unwrap();
        assert_eq!(period.month(), Month::February);
        assert_eq!(period.language(), PeriodLanguage::French);
        assert_eq!(period.to_string(), "Février 2025");

        let aout = BillingPeriod::parse("aout 2024", 2025).unwrap();
        assert_eq!(aout.to_string(), "Août 2024");
    }

    #[test]
    fn test_extra_whitespace_is_tolerated() {
        let period = BillingPeriod::parse("  october   2024 ", 2025).unwrap();
        assert_eq!(period.to_string(), "October 2024");
    }

    #[test]
    fn test_malformed_periods_are_rejected() {
        for input in ["", "2025-03", "03/2025", "Marchy 2025", "March 25", "March 2025 extra", "March two"] {
            assert_eq!(
                BillingPeriod::parse(input, 2025),
                Err(ReconciliationError::InvalidPeriod { input: input.to_string() }),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_strict_parse_requires_year() {
        assert!(BillingPeriod::parse_strict("March").is_err());
        assert!(BillingPeriod::parse_strict("March 2025").is_ok());
    }

    #[test]
    fn test_first_day() {
        let period = BillingPeriod::new(Month::March, 2025);
        assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn test_serde_uses_display_form() {
        let period = BillingPeriod::new(Month::March, 2025).in_language(PeriodLanguage::French);
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, "\"Mars 2025\"");
        let back: BillingPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period);
    }
}
