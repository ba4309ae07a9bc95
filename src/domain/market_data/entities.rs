use super::value_objects::{MinorUnits, Symbol, Timestamp, Trend};
use serde::{Deserialize, Serialize};

/// Domain entity - a timestamped close price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp: Timestamp,
    pub close: MinorUnits,
}

impl HistoryPoint {
    pub fn new(timestamp: Timestamp, close: MinorUnits) -> Self {
        Self { timestamp, close }
    }

    pub fn unit_close(&self) -> f64 {
        self.close.to_unit_price()
    }
}

/// View row for one symbol: ticker, sparkline series, trend and price.
///
/// Rows are built fresh on every fetch and dropped after rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRow {
    pub symbol: Symbol,
    /// Chronological unit prices for the sparkline.
    pub history: Vec<f64>,
    pub trend: Trend,
    /// `None` until the backend has a data point for the symbol.
    pub formatted_price: Option<String>,
}

impl StockRow {
    pub fn ticker(&self) -> &str {
        self.symbol.ticker()
    }

    pub fn has_price(&self) -> bool {
        self.formatted_price.is_some()
    }
}
