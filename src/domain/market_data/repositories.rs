use crate::domain::errors::ServiceResult;
use crate::domain::market_data::{HistoryPoint, MinorUnits, Symbol, TimeRange};

/// Backend collaborator supplying the symbol catalog and price data.
///
/// Implementations are handed to the list at construction time. Every call
/// reads the live catalog; nothing here is cached.
pub trait StockDataService {
    /// Full catalog in backend order.
    fn list_symbols(&self) -> ServiceResult<Vec<Symbol>>;

    /// At most `max_points` points inside `range`, oldest first.
    fn get_history(
        &self,
        symbol: &Symbol,
        range: TimeRange,
        max_points: usize,
    ) -> ServiceResult<Vec<HistoryPoint>>;

    /// Most recent point, or `None` if the symbol has no data yet.
    fn get_latest_point(&self, symbol: &Symbol) -> ServiceResult<Option<HistoryPoint>>;
}

/// Currency formatting utility.
pub trait MoneyFormatter {
    fn format(&self, amount: MinorUnits) -> ServiceResult<String>;
}

impl<T: StockDataService + ?Sized> StockDataService for std::rc::Rc<T> {
    fn list_symbols(&self) -> ServiceResult<Vec<Symbol>> {
        (**self).list_symbols()
    }

    fn get_history(
        &self,
        symbol: &Symbol,
        range: TimeRange,
        max_points: usize,
    ) -> ServiceResult<Vec<HistoryPoint>> {
        (**self).get_history(symbol, range, max_points)
    }

    fn get_latest_point(&self, symbol: &Symbol) -> ServiceResult<Option<HistoryPoint>> {
        (**self).get_latest_point(symbol)
    }
}

impl<T: MoneyFormatter + ?Sized> MoneyFormatter for std::rc::Rc<T> {
    fn format(&self, amount: MinorUnits) -> ServiceResult<String> {
        (**self).format(amount)
    }
}
