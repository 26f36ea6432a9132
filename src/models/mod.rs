use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Year label ────────────────────────────────────────────────────────────────

/// Year token found near a ranking table, or the `Unknown Year` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Year(String);

impl Year {
    pub const UNKNOWN: &'static str = "Unknown Year";

    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value for ordering. Anything that is not all ASCII digits
    /// (the sentinel, "2023–24", ...) ranks as -1.
    pub fn sort_key(&self) -> i64 {
        if !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit()) {
            self.0.parse().unwrap_or(-1)
        } else {
            -1
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Ranking ───────────────────────────────────────────────────────────────────

/// Countries extracted from one ranking table, tagged with its year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearedRanking {
    pub year: Year,
    pub countries: Vec<String>,  // distinct, at most `limit` entries
}

// ── Price history ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

/// One `date: close` line recovered from the rendered price table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosePrice {
    pub date: String,
    pub close: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_sort_key() {
        assert_eq!(Year::new("2023").sort_key(), 2023);
        assert_eq!(Year::unknown().sort_key(), -1);
        assert_eq!(Year::new("2023–24").sort_key(), -1);
        assert_eq!(Year::new("").sort_key(), -1);
    }

    #[test]
    fn test_unknown_year_display() {
        assert_eq!(Year::unknown().to_string(), "Unknown Year");
        assert_eq!(Year::unknown(), Year::new(Year::UNKNOWN));
    }
}
