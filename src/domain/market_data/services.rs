use crate::domain::errors::ServiceResult;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::repositories::{MoneyFormatter, StockDataService};
use crate::domain::market_data::{StockRow, Symbol, TimeRange, Trend};
use crate::log_trace;

/// Number of history points shown in a sparkline.
pub const HISTORY_POINTS: usize = 10;

/// Case-insensitive substring filter over tickers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolFilter {
    query: String,
}

impl SymbolFilter {
    pub fn new(query: &str) -> Self {
        Self { query: query.to_lowercase() }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self, symbol: &Symbol) -> bool {
        self.query.is_empty() || symbol.ticker().to_lowercase().contains(&self.query)
    }

    /// Lazily keeps matching symbols in upstream order.
    pub fn apply<I>(&self, symbols: I) -> impl Iterator<Item = Symbol>
    where
        I: IntoIterator<Item = Symbol>,
    {
        symbols.into_iter().filter(move |symbol| self.matches(symbol))
    }
}

/// `matches(symbols, query)` in eager form.
pub fn filter_symbols<I>(symbols: I, query: &str) -> Vec<Symbol>
where
    I: IntoIterator<Item = Symbol>,
{
    let filter = SymbolFilter::new(query);
    symbols.into_iter().filter(|symbol| filter.matches(symbol)).collect()
}

/// Offset/limit paging over the filtered live catalog.
///
/// `count` and `page` each re-read the catalog, so two calls can observe
/// different snapshots if the backend changes in between.
pub struct PagedSymbolSource<'a, S: StockDataService + ?Sized> {
    service: &'a S,
}

impl<'a, S: StockDataService + ?Sized> PagedSymbolSource<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self { service }
    }

    pub fn count(&self, query: &str) -> ServiceResult<usize> {
        let filter = SymbolFilter::new(query);
        let total = self
            .service
            .list_symbols()?
            .iter()
            .filter(|symbol| filter.matches(symbol))
            .count();
        log_trace!(LogComponent::Domain("SymbolSource"), "count('{}') = {}", filter.query(), total);
        Ok(total)
    }

    /// Matching symbols from `offset`, at most `limit` of them. A
    /// non-positive limit or an offset past the end yields an empty page.
    pub fn page(&self, query: &str, offset: usize, limit: i64) -> ServiceResult<Vec<Symbol>> {
        if limit <= 0 {
            return Ok(Vec::new());
        }
        let filter = SymbolFilter::new(query);
        let page: Vec<Symbol> = self
            .service
            .list_symbols()?
            .into_iter()
            .filter(|symbol| filter.matches(symbol))
            .skip(offset)
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect();
        log_trace!(
            LogComponent::Domain("SymbolSource"),
            "page('{}', {}, {}) -> {} symbols",
            filter.query(),
            offset,
            limit,
            page.len()
        );
        Ok(page)
    }
}

/// Up if the last value rose, down if it fell, flat otherwise or with
/// fewer than two values.
pub fn classify_trend(history: &[f64]) -> Trend {
    match history {
        [.., previous, last] if last > previous => Trend::Up,
        [.., previous, last] if last < previous => Trend::Down,
        _ => Trend::Flat,
    }
}

/// Maps a symbol to its display row using the backend and a formatter.
pub struct RowProjector<'a, S: StockDataService + ?Sized, F: MoneyFormatter + ?Sized> {
    service: &'a S,
    formatter: &'a F,
    history_points: usize,
}

impl<'a, S: StockDataService + ?Sized, F: MoneyFormatter + ?Sized> RowProjector<'a, S, F> {
    pub fn new(service: &'a S, formatter: &'a F) -> Self {
        Self { service, formatter, history_points: HISTORY_POINTS }
    }

    pub fn with_history_points(mut self, history_points: usize) -> Self {
        self.history_points = history_points;
        self
    }

    pub fn project(&self, symbol: &Symbol) -> ServiceResult<StockRow> {
        let mut points = self.service.get_history(symbol, TimeRange::all(), self.history_points)?;
        if points.len() > self.history_points {
            points.drain(..points.len() - self.history_points);
        }
        let history: Vec<f64> = points.iter().map(|point| point.unit_close()).collect();
        let trend = classify_trend(&history);

        let formatted_price = match self.service.get_latest_point(symbol)? {
            Some(point) => Some(self.formatter.format(point.close)?),
            None => None,
        };

        Ok(StockRow { symbol: symbol.clone(), history, trend, formatted_price })
    }

    /// Projects a whole page; the first failure aborts it.
    pub fn project_page(&self, symbols: &[Symbol]) -> ServiceResult<Vec<StockRow>> {
        symbols.iter().map(|symbol| self.project(symbol)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_from_last_two_points() {
        assert_eq!(classify_trend(&[10.0, 10.0]), Trend::Flat);
        assert_eq!(classify_trend(&[10.0, 12.0]), Trend::Up);
        assert_eq!(classify_trend(&[12.0, 10.0]), Trend::Down);
        assert_eq!(classify_trend(&[]), Trend::Flat);
        assert_eq!(classify_trend(&[7.0]), Trend::Flat);
        assert_eq!(classify_trend(&[1.0, 9.0, 3.0, 4.0]), Trend::Up);
    }

    #[test]
    fn filter_lowercases_query() {
        let filter = SymbolFilter::new("OO");
        assert_eq!(filter.query(), "oo");
        assert!(filter.matches(&Symbol::from("GOOG")));
        assert!(!filter.matches(&Symbol::from("MSFT")));
        assert!(SymbolFilter::default().matches(&Symbol::from("MSFT")));
    }
}
