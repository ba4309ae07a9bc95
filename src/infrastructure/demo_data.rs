use crate::domain::{
    errors::{ServiceError, ServiceResult},
    market_data::{HistoryPoint, MinorUnits, MoneyFormatter, StockDataService, Symbol, TimeRange, Timestamp},
};
use once_cell::sync::Lazy;
use std::cell::{Cell, RefCell};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
/// 2024-01-02T00:00:00Z
const DEMO_START_MS: i64 = 1_704_153_600_000;
const DEMO_POINTS: usize = 30;

/// Demo tickers with their opening price in cents.
static DEMO_CATALOG: Lazy<Vec<(&'static str, i64)>> = Lazy::new(|| {
    vec![
        ("AAPL", 18_500),
        ("ADBE", 59_000),
        ("AMD", 13_800),
        ("AMZN", 15_100),
        ("ASML", 70_200),
        ("AVGO", 111_000),
        ("CMCSA", 4_300),
        ("COST", 66_000),
        ("CSCO", 5_000),
        ("GOOG", 13_900),
        ("GOOGL", 13_800),
        ("INTC", 4_800),
        ("INTU", 62_400),
        ("ISRG", 33_700),
        ("META", 34_600),
        ("MSFT", 37_000),
        ("NFLX", 46_800),
        ("NVDA", 48_100),
        ("PEP", 16_900),
        ("PYPL", 6_100),
        ("QCOM", 14_400),
        ("SBUX", 9_500),
        ("TSLA", 24_800),
        ("TXN", 17_000),
    ]
});

/// In-memory backend used by the demo app and the tests.
///
/// The catalog can be mutated between calls, and the service can be taken
/// offline to exercise error propagation.
#[derive(Debug, Default)]
pub struct InMemoryStockService {
    catalog: RefCell<Vec<(Symbol, Vec<HistoryPoint>)>>,
    offline: Cell<bool>,
}

impl InMemoryStockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbols without any price history.
    pub fn with_symbols<'a>(tickers: impl IntoIterator<Item = &'a str>) -> Self {
        let service = Self::new();
        for ticker in tickers {
            service.add_symbol(Symbol::from(ticker), Vec::new());
        }
        service
    }

    /// Deterministic NASDAQ-style catalog with a month of daily closes.
    pub fn demo() -> Self {
        let service = Self::new();
        for (index, (ticker, base)) in DEMO_CATALOG.iter().enumerate() {
            service.add_symbol(Symbol::from(*ticker), demo_history(index, *base));
        }
        // Listed but not traded yet: renders without a price.
        service.add_symbol(Symbol::from("NEWCO"), Vec::new());
        service
    }

    pub fn add_symbol(&self, symbol: Symbol, mut history: Vec<HistoryPoint>) {
        history.sort_by_key(|point| point.timestamp);
        self.catalog.borrow_mut().push((symbol, history));
    }

    pub fn remove_symbol(&self, symbol: &Symbol) -> bool {
        let mut catalog = self.catalog.borrow_mut();
        let before = catalog.len();
        catalog.retain(|(listed, _)| listed != symbol);
        catalog.len() != before
    }

    /// Appends a point, keeping the series chronological.
    pub fn push_point(&self, symbol: &Symbol, point: HistoryPoint) -> ServiceResult<()> {
        let mut catalog = self.catalog.borrow_mut();
        let (_, history) = catalog
            .iter_mut()
            .find(|(listed, _)| listed == symbol)
            .ok_or_else(|| ServiceError::MalformedData(format!("unknown symbol {}", symbol)))?;
        let position = history.partition_point(|existing| existing.timestamp <= point.timestamp);
        history.insert(position, point);
        Ok(())
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn len(&self) -> usize {
        self.catalog.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.borrow().is_empty()
    }

    fn ensure_online(&self) -> ServiceResult<()> {
        if self.offline.get() {
            return Err(ServiceError::Unavailable("stock service is offline".to_string()));
        }
        Ok(())
    }
}

impl StockDataService for InMemoryStockService {
    fn list_symbols(&self) -> ServiceResult<Vec<Symbol>> {
        self.ensure_online()?;
        Ok(self.catalog.borrow().iter().map(|(symbol, _)| symbol.clone()).collect())
    }

    fn get_history(
        &self,
        symbol: &Symbol,
        range: TimeRange,
        max_points: usize,
    ) -> ServiceResult<Vec<HistoryPoint>> {
        self.ensure_online()?;
        let catalog = self.catalog.borrow();
        let Some((_, history)) = catalog.iter().find(|(listed, _)| listed == symbol) else {
            return Ok(Vec::new());
        };
        let in_range: Vec<HistoryPoint> =
            history.iter().copied().filter(|point| range.contains(point.timestamp)).collect();
        let skip = in_range.len().saturating_sub(max_points);
        Ok(in_range.into_iter().skip(skip).collect())
    }

    fn get_latest_point(&self, symbol: &Symbol) -> ServiceResult<Option<HistoryPoint>> {
        self.ensure_online()?;
        Ok(self
            .catalog
            .borrow()
            .iter()
            .find(|(listed, _)| listed == symbol)
            .and_then(|(_, history)| history.last().copied()))
    }
}

fn demo_history(seed: usize, base: i64) -> Vec<HistoryPoint> {
    (0..DEMO_POINTS)
        .map(|i| {
            let t = i as f64 + seed as f64 * 0.7;
            let drift = (t * 0.21).sin() * 0.04 + (t * 0.9).cos() * 0.015;
            let close = (base as f64 * (1.0 + drift)).round() as i64;
            HistoryPoint::new(
                Timestamp::from_millis(DEMO_START_MS + i as i64 * DAY_MS),
                MinorUnits::new(close),
            )
        })
        .collect()
}

/// US dollar formatting with thousands separators: `$1,234.56`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsdFormatter;

impl MoneyFormatter for UsdFormatter {
    fn format(&self, amount: MinorUnits) -> ServiceResult<String> {
        let cents = amount.value();
        let sign = if cents < 0 { "-" } else { "" };
        let magnitude = cents.unsigned_abs();
        let dollars = (magnitude / 100).to_string();

        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, digit) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        Ok(format!("{}${}.{:02}", sign, grouped, magnitude % 100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_groups_thousands() {
        let usd = UsdFormatter;
        assert_eq!(usd.format(MinorUnits::new(0)).unwrap(), "$0.00");
        assert_eq!(usd.format(MinorUnits::new(5)).unwrap(), "$0.05");
        assert_eq!(usd.format(MinorUnits::new(18_500)).unwrap(), "$185.00");
        assert_eq!(usd.format(MinorUnits::new(123_456_789)).unwrap(), "$1,234,567.89");
        assert_eq!(usd.format(MinorUnits::new(-150)).unwrap(), "-$1.50");
    }

    #[test]
    fn history_is_last_points_in_range() {
        let service = InMemoryStockService::new();
        let symbol = Symbol::from("AAPL");
        let points: Vec<HistoryPoint> = (0..5)
            .map(|i| HistoryPoint::new(Timestamp::from_millis(i), MinorUnits::new(100 + i)))
            .collect();
        service.add_symbol(symbol.clone(), points);

        let last_two = service.get_history(&symbol, TimeRange::all(), 2).unwrap();
        assert_eq!(
            last_two.iter().map(|p| p.close.value()).collect::<Vec<_>>(),
            vec![103, 104]
        );

        let window = TimeRange::new(Timestamp::from_millis(1), Timestamp::from_millis(2));
        assert_eq!(service.get_history(&symbol, window, 10).unwrap().len(), 2);
        assert_eq!(service.get_latest_point(&symbol).unwrap().unwrap().close.value(), 104);
    }

    #[test]
    fn offline_service_fails_every_call() {
        let service = InMemoryStockService::with_symbols(["AAPL"]);
        service.set_offline(true);
        assert!(matches!(service.list_symbols(), Err(ServiceError::Unavailable(_))));
        assert!(service.get_latest_point(&Symbol::from("AAPL")).is_err());
    }

    #[test]
    fn demo_catalog_has_unpriced_listing() {
        let service = InMemoryStockService::demo();
        assert_eq!(service.len(), DEMO_CATALOG.len() + 1);
        assert_eq!(service.get_latest_point(&Symbol::from("NEWCO")).unwrap(), None);
        assert!(service.get_latest_point(&Symbol::from("AAPL")).unwrap().is_some());
    }
}
