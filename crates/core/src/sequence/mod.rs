//! Gapless document numbering.
//!
//! Each tenant keeps three independent number sequences per financial year,
//! one per printed document type. Numbers are zero-padded to four digits and
//! grow wider past `9999`. The next number is always one more than the
//! highest numeric value already issued, so deleting the newest document
//! frees its number and the sequence never skips.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Minimum width of a formatted number.
pub const MIN_WIDTH: usize = 4;

/// A document that receives a sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Payment voucher.
    Voucher,
    /// Loose minute authorizing the payment.
    LooseMinute,
    /// Receipt from the payee.
    Receipt,
}

impl DocumentType {
    /// Every document type.
    pub const ALL: [Self; 3] = [Self::Voucher, Self::LooseMinute, Self::Receipt];

    /// Stable name used in logs and URLs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Voucher => "voucher",
            Self::LooseMinute => "loose_minute",
            Self::Receipt => "receipt",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "voucher" => Ok(Self::Voucher),
            "loose_minute" | "loose-minute" => Ok(Self::LooseMinute),
            "receipt" => Ok(Self::Receipt),
            other => Err(format!("unknown document type: {other}")),
        }
    }
}

/// Formats a sequence number, e.g. `7` as `0007`.
#[must_use]
pub fn format_number(number: u64) -> String {
    format!("{number:0width$}", width = MIN_WIDTH)
}

/// Reads the numeric value of an issued number.
///
/// Blank and non-numeric values (hand-entered references such as `PV/12`)
/// are ignored and yield `None`.
#[must_use]
pub fn parse_number(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// The number following the highest numeric value in `issued`.
#[must_use]
pub fn next_number<'a, I>(issued: I) -> u64
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    issued
        .into_iter()
        .flatten()
        .filter_map(parse_number)
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}
