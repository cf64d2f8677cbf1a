//! Financial year labels.
//!
//! Schools label a financial year as `2026-2027`, but the label arrives from
//! forms and spreadsheets in many shapes: en-dashes, em-dashes, stray spaces.
//! Every shape is collapsed to one canonical form before it touches storage,
//! so `2026 – 2027` and `2026-2027` always address the same period.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Characters accepted as the separator between the two years.
const DASH_VARIANTS: [char; 6] = [
    '-',        // hyphen-minus
    '\u{2010}', // hyphen
    '\u{2012}', // figure dash
    '\u{2013}', // en dash
    '\u{2014}', // em dash
    '\u{2212}', // minus sign
];

/// Errors produced when a financial year label cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinancialYearError {
    /// The label was empty after trimming.
    #[error("Financial year is empty")]
    Empty,

    /// The label is not of the form `YYYY-YYYY`.
    #[error("Financial year '{0}' is not of the form YYYY-YYYY")]
    Format(String),

    /// The second year does not follow the first.
    #[error("Financial year '{0}' must span two consecutive years")]
    NotConsecutive(String),
}

/// A normalized financial year label such as `2026-2027`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FinancialYear {
    label: String,
    start: i32,
}

impl FinancialYear {
    /// Normalizes a raw label.
    ///
    /// Dash variants become `-`, whitespace is removed, and runs of dashes
    /// collapse into one.
    ///
    /// # Errors
    ///
    /// Returns an error if the label is empty, is not `YYYY-YYYY`, or the
    /// years are not consecutive.
    pub fn parse(raw: &str) -> Result<Self, FinancialYearError> {
        let mut normalized = String::with_capacity(raw.len());
        for c in raw.chars() {
            if c.is_whitespace() {
                continue;
            }
            if DASH_VARIANTS.contains(&c) {
                if !normalized.ends_with('-') {
                    normalized.push('-');
                }
            } else {
                normalized.push(c);
            }
        }

        if normalized.is_empty() {
            return Err(FinancialYearError::Empty);
        }

        let Some((first, second)) = normalized.split_once('-') else {
            return Err(FinancialYearError::Format(raw.to_string()));
        };
        let start = parse_year(first).ok_or_else(|| FinancialYearError::Format(raw.to_string()))?;
        let end = parse_year(second).ok_or_else(|| FinancialYearError::Format(raw.to_string()))?;
        if end != start + 1 {
            return Err(FinancialYearError::NotConsecutive(raw.to_string()));
        }

        Ok(Self {
            label: normalized,
            start,
        })
    }

    /// Returns the year a financial year starts in (April of this year).
    #[must_use]
    pub const fn start_year(&self) -> i32 {
        self.start
    }

    /// Returns the canonical label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.label
    }
}

fn parse_year(part: &str) -> Option<i32> {
    if part.len() != 4 || !part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl FromStr for FinancialYear {
    type Err = FinancialYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FinancialYear {
    type Error = FinancialYearError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FinancialYear> for String {
    fn from(value: FinancialYear) -> Self {
        value.label
    }
}
