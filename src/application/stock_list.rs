use crate::{
    application::config::StockListConfig,
    domain::{
        errors::ServiceResult,
        events::{SelectionListeners, SelectionNotice, SymbolSelectedListener},
        logging::LogComponent,
        market_data::{MoneyFormatter, PagedSymbolSource, RowProjector, StockDataService, StockRow, Symbol},
    },
    log_debug, log_info, log_trace,
};
use std::rc::Rc;

/// Result of a full refresh: new total plus the visible page.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshedPage {
    pub generation: u64,
    pub total: usize,
    pub rows: Vec<StockRow>,
}

/// State behind the searchable stock list.
///
/// Owns the filter text and the selection; reads everything else from the
/// injected backend on demand. All calls are synchronous and backend
/// errors are returned as-is.
pub struct StockListController<S: StockDataService, F: MoneyFormatter> {
    service: S,
    formatter: F,
    config: StockListConfig,
    filter: String,
    generation: u64,
    selected: Option<Symbol>,
    listeners: SelectionListeners,
}

impl<S: StockDataService, F: MoneyFormatter> StockListController<S, F> {
    pub fn new(service: S, formatter: F, config: StockListConfig) -> Self {
        Self {
            service,
            formatter,
            config,
            filter: String::new(),
            generation: 0,
            selected: None,
            listeners: SelectionListeners::new(),
        }
    }

    pub fn config(&self) -> &StockListConfig {
        &self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Bumped on every filter change; views re-fetch when it moves.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stores the lowercased text and invalidates previously fetched rows.
    pub fn set_filter(&mut self, raw: &str) -> u64 {
        self.filter = raw.to_lowercase();
        self.generation += 1;
        log_debug!(
            LogComponent::Application("StockList"),
            "filter set to '{}' (generation {})",
            self.filter,
            self.generation
        );
        self.generation
    }

    pub fn count(&self) -> ServiceResult<usize> {
        PagedSymbolSource::new(&self.service).count(&self.filter)
    }

    pub fn fetch(&self, offset: usize, limit: i64) -> ServiceResult<Vec<StockRow>> {
        let symbols = PagedSymbolSource::new(&self.service).page(&self.filter, offset, limit)?;
        let rows = RowProjector::new(&self.service, &self.formatter)
            .with_history_points(self.config.history_points)
            .project_page(&symbols)?;
        log_trace!(
            LogComponent::Application("StockList"),
            "fetched {} rows at offset {}",
            rows.len(),
            offset
        );
        Ok(rows)
    }

    /// Recomputes the count and re-fetches the visible window.
    pub fn refresh(&self, visible_offset: usize, visible_limit: i64) -> ServiceResult<RefreshedPage> {
        let total = self.count()?;
        let rows = self.fetch(visible_offset, visible_limit)?;
        Ok(RefreshedPage { generation: self.generation, total, rows })
    }

    pub fn selected(&self) -> Option<&Symbol> {
        self.selected.as_ref()
    }

    /// Stores the selection. `Some` yields a notice for every registered
    /// listener; deliver it once the controller is no longer borrowed.
    /// `None` only clears.
    pub fn select(&mut self, symbol: Option<Symbol>) -> Option<SelectionNotice> {
        self.selected = symbol;
        let symbol = self.selected.clone()?;
        log_info!(
            LogComponent::Application("StockList"),
            "symbol {} selected, notifying {} listener(s)",
            symbol,
            self.listeners.len()
        );
        Some(self.listeners.notice(symbol))
    }

    pub fn add_selected_listener(&mut self, listener: Rc<dyn SymbolSelectedListener>) -> bool {
        let added = self.listeners.add(listener);
        log_debug!(
            LogComponent::Application("StockList"),
            "selection listener {} ({} registered)",
            if added { "added" } else { "already present" },
            self.listeners.len()
        );
        added
    }

    pub fn remove_selected_listener(&mut self, listener: &Rc<dyn SymbolSelectedListener>) -> bool {
        self.listeners.remove(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
