use crate::domain::market_data::Symbol;
use std::rc::Rc;

/// Receives the symbol of a newly selected row.
pub trait SymbolSelectedListener {
    fn symbol_selected(&self, symbol: &Symbol);
}

impl<F> SymbolSelectedListener for F
where
    F: Fn(&Symbol),
{
    fn symbol_selected(&self, symbol: &Symbol) {
        self(symbol)
    }
}

/// A selection waiting to be delivered.
///
/// Holds its own copy of the listener list, so it can be delivered after
/// every borrow of the list that produced it has been released.
#[must_use = "listeners are only notified by `deliver`"]
pub struct SelectionNotice {
    symbol: Symbol,
    listeners: Vec<Rc<dyn SymbolSelectedListener>>,
}

impl SelectionNotice {
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn deliver(self) {
        for listener in &self.listeners {
            listener.symbol_selected(&self.symbol);
        }
    }
}

impl std::fmt::Debug for SelectionNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionNotice")
            .field("symbol", &self.symbol)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Listener set keyed by `Rc` identity.
///
/// Registering the same `Rc` twice keeps one entry. Delivery follows
/// registration order.
#[derive(Default)]
pub struct SelectionListeners {
    listeners: Vec<Rc<dyn SymbolSelectedListener>>,
}

impl SelectionListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the listener was already registered.
    pub fn add(&mut self, listener: Rc<dyn SymbolSelectedListener>) -> bool {
        if self.contains(&listener) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Returns `false` if the listener was not registered.
    pub fn remove(&mut self, listener: &Rc<dyn SymbolSelectedListener>) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|registered| !Rc::ptr_eq(registered, listener));
        self.listeners.len() != before
    }

    pub fn contains(&self, listener: &Rc<dyn SymbolSelectedListener>) -> bool {
        self.listeners.iter().any(|registered| Rc::ptr_eq(registered, listener))
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn notify(&self, symbol: &Symbol) {
        self.notice(symbol.clone()).deliver();
    }

    /// Snapshot of the current listeners bound to `symbol`.
    pub fn notice(&self, symbol: Symbol) -> SelectionNotice {
        SelectionNotice { symbol, listeners: self.listeners.clone() }
    }
}

impl std::fmt::Debug for SelectionListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionListeners").field("len", &self.listeners.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn same_rc_registers_once() {
        let hits = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = Rc::clone(&hits);
        let listener: Rc<dyn SymbolSelectedListener> =
            Rc::new(move |symbol: &Symbol| sink.borrow_mut().push(symbol.ticker().to_string()));

        let mut listeners = SelectionListeners::new();
        assert!(listeners.add(Rc::clone(&listener)));
        assert!(!listeners.add(Rc::clone(&listener)));
        listeners.notify(&Symbol::from("AAPL"));

        assert_eq!(*hits.borrow(), vec!["AAPL".to_string()]);
        assert!(listeners.remove(&listener));
        assert!(!listeners.remove(&listener));
        assert!(listeners.is_empty());
    }

    #[test]
    fn notice_keeps_listeners_from_when_it_was_taken() {
        let hits = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&hits);
        let listener: Rc<dyn SymbolSelectedListener> = Rc::new(move |_: &Symbol| *sink.borrow_mut() += 1);

        let mut listeners = SelectionListeners::new();
        listeners.add(Rc::clone(&listener));
        let notice = listeners.notice(Symbol::from("MSFT"));
        listeners.remove(&listener);

        assert_eq!(notice.symbol().ticker(), "MSFT");
        notice.deliver();
        assert_eq!(*hits.borrow(), 1);
    }
}
