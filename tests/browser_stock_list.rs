#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use leptos::*;
use stock_list_wasm::app::{StockList, shared_stock_list};
use stock_list_wasm::application::StockListConfig;
use stock_list_wasm::infrastructure::{InMemoryStockService, UsdFormatter};
use stock_list_wasm::presentation::StockListApi;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Mounts a demo list into its own container so tests don't see each other's rows.
fn mount_list(config: StockListConfig) -> web_sys::HtmlElement {
    let container = document().create_element("div").unwrap().unchecked_into::<web_sys::HtmlElement>();
    document().body().unwrap().append_child(&container).unwrap();

    let controller = shared_stock_list(Rc::new(InMemoryStockService::demo()), Rc::new(UsdFormatter), config);
    mount_to(container.clone(), move || view! { <StockList controller=controller /> });
    container
}

fn shown_tickers(container: &web_sys::HtmlElement) -> Vec<String> {
    let cells = container.query_selector_all(".stock-row .cell-ticker").unwrap();
    (0..cells.length())
        .filter_map(|i| cells.get(i))
        .filter_map(|cell| cell.text_content())
        .collect()
}

fn type_into_search(container: &web_sys::HtmlElement, text: &str) {
    let input = container
        .query_selector(".search-field")
        .unwrap()
        .unwrap()
        .dyn_into::<web_sys::HtmlInputElement>()
        .unwrap();
    input.set_value(text);
    let mut init = web_sys::EventInit::new();
    init.bubbles(true);
    let event = web_sys::Event::new_with_event_init_dict("input", &init).unwrap();
    input.dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn mounted_list_shows_search_field_and_first_rows() {
    let container = mount_list(StockListConfig::default());

    let input = container
        .query_selector(".search-field")
        .unwrap()
        .unwrap()
        .dyn_into::<web_sys::HtmlInputElement>()
        .unwrap();
    assert_eq!(input.placeholder(), "Search by stocks");

    let shown = shown_tickers(&container);
    assert!(!shown.is_empty());
    assert_eq!(shown[0], "AAPL");
}

#[wasm_bindgen_test]
fn typing_refreshes_rows() {
    let container = mount_list(StockListConfig::default());

    type_into_search(&container, "GOO");
    assert_eq!(shown_tickers(&container), vec!["GOOG", "GOOGL"]);

    type_into_search(&container, "zzz");
    assert!(shown_tickers(&container).is_empty());

    type_into_search(&container, "");
    assert_eq!(shown_tickers(&container).first().map(String::as_str), Some("AAPL"));
}

#[wasm_bindgen_test]
fn typing_scrolls_grid_back_to_top() {
    let container = mount_list(StockListConfig::default());
    let grid = container.query_selector(".stock-grid").unwrap().unwrap();
    grid.set_scroll_top(300);

    type_into_search(&container, "a");
    assert_eq!(grid.scroll_top(), 0);
    assert_eq!(shown_tickers(&container).first().map(String::as_str), Some("AAPL"));
}

#[wasm_bindgen_test]
fn zero_page_size_still_renders() {
    let config = StockListConfig { page_size: 0, ..StockListConfig::default() };
    let container = mount_list(config);
    assert!(!shown_tickers(&container).is_empty());
}

#[wasm_bindgen_test]
fn api_filters_and_pages() {
    let api = StockListApi::new(None).unwrap();
    api.set_filter("GOO");
    assert_eq!(api.filter(), "goo");
    assert_eq!(api.count().unwrap(), 2);

    let json = api.fetch_page(0, 20).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0][0][1]["text"], "GOOG");
    assert_eq!(api.fetch_page(0, -1).unwrap(), "[]");
}

#[wasm_bindgen_test]
fn api_rejects_bad_config() {
    assert!(StockListApi::new(Some("{\"page_size\": 0}".to_string())).is_err());
    assert!(StockListApi::new(Some("not json".to_string())).is_err());
}

#[wasm_bindgen_test]
fn api_listener_registered_once() {
    let api = StockListApi::new(None).unwrap();
    let callback = js_sys::Function::new_with_args("ticker", "globalThis.lastTicker = ticker;");
    assert!(api.add_selected_listener(callback.clone()));
    assert!(!api.add_selected_listener(callback.clone()));

    api.select(Some("MSFT".to_string()));
    let heard = js_sys::Reflect::get(&js_sys::global(), &"lastTicker".into()).unwrap();
    assert_eq!(heard.as_string().as_deref(), Some("MSFT"));
    assert_eq!(api.selected().as_deref(), Some("MSFT"));

    assert!(api.remove_selected_listener(callback.clone()));
    assert!(!api.remove_selected_listener(callback));
}

#[wasm_bindgen_test]
fn api_listener_can_read_selection() {
    let api = Rc::new(StockListApi::new(None).unwrap());
    let seen = Rc::new(RefCell::new(Vec::<Option<String>>::new()));
    let callback = {
        let api = Rc::clone(&api);
        let seen = Rc::clone(&seen);
        Closure::<dyn Fn(JsValue)>::new(move |_ticker: JsValue| seen.borrow_mut().push(api.selected()))
    };
    let function: js_sys::Function = callback.as_ref().unchecked_ref::<js_sys::Function>().clone();
    api.add_selected_listener(function);

    api.select(Some("NVDA".to_string()));
    assert_eq!(*seen.borrow(), vec![Some("NVDA".to_string())]);
    drop(callback);
}
