//! Months of the school financial year.
//!
//! The financial year runs April through March, so the enum is declared in
//! that order and its derived `Ord` sorts fiscally rather than by calendar.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A month name could not be recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown month: {0}")]
pub struct MonthParseError(pub String);

/// A month, ordered April first.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
    January,
    February,
    March,
}

impl Month {
    /// All months in fiscal order.
    pub const ALL: [Self; 12] = [
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
        Self::January,
        Self::February,
        Self::March,
    ];

    /// Position within the financial year, April = 0.
    #[must_use]
    pub const fn fiscal_index(self) -> usize {
        self as usize
    }

    /// Full English month name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
        }
    }

    /// The fiscal month a calendar date falls in.
    #[must_use]
    pub fn of_date(date: NaiveDate) -> Self {
        // calendar month 4 (April) maps to fiscal index 0
        let index = (date.month0() as usize + 9) % 12;
        Self::ALL[index]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = MonthParseError;

    /// Accepts full names and three-letter abbreviations, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|month| {
                let name = month.name().to_ascii_lowercase();
                name == wanted || (wanted.len() == 3 && name.starts_with(&wanted))
            })
            .ok_or_else(|| MonthParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_fiscal_order_starts_in_april() {
        assert_eq!(Month::ALL[0], Month::April);
        assert_eq!(Month::ALL[11], Month::March);
        assert!(Month::March > Month::December);
        assert_eq!(Month::January.fiscal_index(), 9);
    }

    #[rstest]
    #[case("April", Month::April)]
    #[case("april", Month::April)]
    #[case(" MARCH ", Month::March)]
    #[case("Sep", Month::September)]
    #[case("jan", Month::January)]
    fn test_parse(#[case] raw: &str, #[case] expected: Month) {
        assert_eq!(raw.parse::<Month>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("Ap")]
    #[case("Aprilx")]
    #[case("Smarch")]
    fn test_parse_rejects(#[case] raw: &str) {
        assert!(raw.parse::<Month>().is_err());
    }

    #[rstest]
    #[case(2026, 4, Month::April)]
    #[case(2026, 12, Month::December)]
    #[case(2027, 1, Month::January)]
    #[case(2027, 3, Month::March)]
    fn test_of_date(#[case] y: i32, #[case] m: u32, #[case] expected: Month) {
        let date = NaiveDate::from_ymd_opt(y, m, 15).unwrap();
        assert_eq!(Month::of_date(date), expected);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for month in Month::ALL {
            assert_eq!(month.to_string().parse::<Month>().unwrap(), month);
        }
    }
}
