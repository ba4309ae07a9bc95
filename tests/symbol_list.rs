use stock_list_wasm::domain::market_data::{
    PagedSymbolSource, StockDataService, Symbol, SymbolFilter, filter_symbols,
};
use stock_list_wasm::infrastructure::InMemoryStockService;

fn tickers(symbols: &[Symbol]) -> Vec<&str> {
    symbols.iter().map(|s| s.ticker()).collect()
}

fn catalog() -> Vec<Symbol> {
    ["AAPL", "GOOG", "MSFT"].into_iter().map(Symbol::from).collect()
}

#[test]
fn substring_match_is_case_insensitive() {
    let lower = filter_symbols(catalog(), "oo");
    let upper = filter_symbols(catalog(), "OO");
    assert_eq!(tickers(&lower), vec!["GOOG"]);
    assert_eq!(lower, upper);
}

#[test]
fn empty_query_keeps_catalog_order() {
    let all = filter_symbols(catalog(), "");
    assert_eq!(tickers(&all), vec!["AAPL", "GOOG", "MSFT"]);
}

#[test]
fn mixed_case_tickers_match() {
    let symbols = vec![Symbol::from("brk.B"), Symbol::from("BRK.A"), Symbol::from("AMZN")];
    let matched = filter_symbols(symbols, "Brk");
    assert_eq!(tickers(&matched), vec!["brk.B", "BRK.A"]);
}

#[test]
fn empty_input_yields_nothing() {
    assert!(filter_symbols(Vec::new(), "a").is_empty());
    assert!(filter_symbols(Vec::new(), "").is_empty());
}

#[test]
fn lazy_apply_preserves_upstream_order() {
    let filter = SymbolFilter::new("S");
    let matched: Vec<Symbol> = filter
        .apply(vec![Symbol::from("TSLA"), Symbol::from("AAPL"), Symbol::from("MSFT")])
        .collect();
    assert_eq!(tickers(&matched), vec!["TSLA", "MSFT"]);
}

#[test]
fn source_pages_the_live_catalog() {
    let service = InMemoryStockService::with_symbols(["AAPL", "GOOG", "GOOGL", "MSFT"]);
    let source = PagedSymbolSource::new(&service);

    assert_eq!(source.count("goo").unwrap(), 2);
    assert_eq!(tickers(&source.page("goo", 1, 5).unwrap()), vec!["GOOGL"]);
    assert_eq!(tickers(&source.page("", 1, 2).unwrap()), vec!["GOOG", "GOOGL"]);
    assert!(source.page("", 4, 2).unwrap().is_empty());
    assert!(source.page("", 0, 0).unwrap().is_empty());
    assert!(source.page("", 0, -3).unwrap().is_empty());
    assert_eq!(service.list_symbols().unwrap().len(), 4);
}

#[test]
fn count_and_page_reread_the_catalog() {
    let service = InMemoryStockService::with_symbols(["AAPL", "AMZN"]);
    let source = PagedSymbolSource::new(&service);
    assert_eq!(source.count("a").unwrap(), 2);

    service.add_symbol(Symbol::from("ADBE"), Vec::new());
    let page = source.page("a", 0, 10).unwrap();
    assert_eq!(tickers(&page), vec!["AAPL", "AMZN", "ADBE"]);

    assert!(service.remove_symbol(&Symbol::from("AAPL")));
    assert_eq!(source.count("a").unwrap(), 2);
}
