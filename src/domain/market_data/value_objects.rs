use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Value Object - ticker symbol as published by the catalog.
///
/// The ticker is kept verbatim; matching is done case-insensitively by
/// [`SymbolFilter`](super::services::SymbolFilter).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(ticker: String) -> Result<Self, String> {
        if ticker.trim().is_empty() {
            return Err("Symbol cannot be empty".to_string());
        }
        Ok(Self(ticker))
    }

    pub fn ticker(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Value Object - price in the smallest currency subunit (cents).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Constructor, Serialize, Deserialize,
)]
pub struct MinorUnits(i64);

impl MinorUnits {
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Decimal unit price: minor units divided by 100.
    pub fn to_unit_price(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

/// Value Object - milliseconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Constructor, Serialize, Deserialize,
)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const MIN: Timestamp = Timestamp(i64::MIN);
    pub const MAX: Timestamp = Timestamp(i64::MAX);

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_millis(value: i64) -> Self {
        Self(value)
    }
}

/// Inclusive time window for history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: Timestamp,
    pub to: Timestamp,
}

impl TimeRange {
    pub fn new(from: Timestamp, to: Timestamp) -> Self {
        Self { from, to }
    }

    /// The symbol's entire recorded range.
    pub fn all() -> Self {
        Self { from: Timestamp::MIN, to: Timestamp::MAX }
    }

    pub fn contains(&self, timestamp: Timestamp) -> bool {
        self.from <= timestamp && timestamp <= self.to
    }
}

/// Direction of the two most recent history points.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Flat,
}

impl Trend {
    /// CSS class used on the sparkline element.
    pub fn css_class(&self) -> &str {
        self.as_ref()
    }

    /// Background color of the price badge.
    pub fn color(&self) -> &'static str {
        match self {
            Trend::Up => "#4caf50",
            Trend::Down => "#f44336",
            Trend::Flat => "#9e9e9e",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_units_divide_by_hundred() {
        assert_eq!(MinorUnits::new(12_345).to_unit_price(), 123.45);
        assert_eq!(MinorUnits::new(-50).to_unit_price(), -0.5);
    }

    #[test]
    fn empty_symbol_rejected() {
        assert!(Symbol::new("  ".to_string()).is_err());
        assert_eq!(Symbol::new("AAPL".to_string()).unwrap().ticker(), "AAPL");
    }

    #[test]
    fn trend_strings() {
        assert_eq!(Trend::Up.to_string(), "up");
        assert_eq!(Trend::Down.css_class(), "down");
        assert_eq!("flat".parse::<Trend>().unwrap(), Trend::Flat);
    }
}
