use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::prelude::*;

use crate::{
    application::{StockListConfig, StockListController},
    domain::{
        errors::AppError,
        events::SymbolSelectedListener,
        logging::LogComponent,
        market_data::Symbol,
    },
    infrastructure::{InMemoryStockService, UsdFormatter},
    log_error,
    presentation::cells::render_row,
};

/// JS binding for the stock list, backed by the in-memory demo catalog.
///
/// Rows cross the boundary as JSON strings of typed cells. Every method
/// takes `&self` and state lives behind `RefCell`s, so a JS selection
/// listener may call back into the same object.
#[wasm_bindgen]
pub struct StockListApi {
    controller: RefCell<StockListController<Rc<InMemoryStockService>, UsdFormatter>>,
    js_listeners: RefCell<Vec<(js_sys::Function, Rc<dyn SymbolSelectedListener>)>>,
}

#[wasm_bindgen]
impl StockListApi {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<StockListApi, JsValue> {
        let config = match config_json {
            Some(json) => StockListConfig::from_json(&json).map_err(|e| to_js_error(e.into()))?,
            None => StockListConfig::default(),
        };
        let service = Rc::new(InMemoryStockService::demo());
        Ok(Self {
            controller: RefCell::new(StockListController::new(service, UsdFormatter, config)),
            js_listeners: RefCell::new(Vec::new()),
        })
    }

    #[wasm_bindgen(js_name = setFilter)]
    pub fn set_filter(&self, text: &str) -> f64 {
        self.controller.borrow_mut().set_filter(text) as f64
    }

    #[wasm_bindgen(getter)]
    pub fn filter(&self) -> String {
        self.controller.borrow().filter().to_string()
    }

    pub fn count(&self) -> Result<usize, JsValue> {
        self.controller.borrow().count().map_err(|e| to_js_error(e.into()))
    }

    /// `[[ [column, cell], ... ], ...]` as JSON.
    #[wasm_bindgen(js_name = fetchPage)]
    pub fn fetch_page(&self, offset: usize, limit: i32) -> Result<String, JsValue> {
        let rows = self
            .controller
            .borrow()
            .fetch(offset, limit as i64)
            .map_err(|e| to_js_error(e.into()))?;
        let cells: Vec<_> = rows.iter().map(render_row).collect();
        serde_json::to_string(&cells).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Selects by ticker; `undefined` clears the selection. Listeners run
    /// after the selection is stored.
    pub fn select(&self, ticker: Option<String>) {
        let notice = self.controller.borrow_mut().select(ticker.map(|t| Symbol::from(t.as_str())));
        if let Some(notice) = notice {
            notice.deliver();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn selected(&self) -> Option<String> {
        self.controller.borrow().selected().map(|symbol| symbol.ticker().to_string())
    }

    /// Registers `callback(ticker)`; the same function is registered once.
    #[wasm_bindgen(js_name = addSelectedListener)]
    pub fn add_selected_listener(&self, callback: js_sys::Function) -> bool {
        let mut js_listeners = self.js_listeners.borrow_mut();
        if js_listeners.iter().any(|(registered, _)| js_sys::Object::is(registered, &callback)) {
            return false;
        }
        let target = callback.clone();
        let listener: Rc<dyn SymbolSelectedListener> = Rc::new(move |symbol: &Symbol| {
            if let Err(e) = target.call1(&JsValue::NULL, &JsValue::from_str(symbol.ticker())) {
                log_error!(LogComponent::Presentation("StockListApi"), "selection listener threw: {:?}", e);
            }
        });
        js_listeners.push((callback, Rc::clone(&listener)));
        self.controller.borrow_mut().add_selected_listener(listener)
    }

    #[wasm_bindgen(js_name = removeSelectedListener)]
    pub fn remove_selected_listener(&self, callback: js_sys::Function) -> bool {
        let mut js_listeners = self.js_listeners.borrow_mut();
        let Some(position) = js_listeners
            .iter()
            .position(|(registered, _)| js_sys::Object::is(registered, &callback))
        else {
            return false;
        };
        let (_, listener) = js_listeners.remove(position);
        self.controller.borrow_mut().remove_selected_listener(&listener)
    }
}

fn to_js_error(error: AppError) -> JsValue {
    log_error!(LogComponent::Presentation("StockListApi"), "{}", error);
    JsValue::from_str(&error.to_string())
}
