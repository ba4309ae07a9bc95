pub mod cells;
pub mod wasm_api;

pub use cells::*;
pub use wasm_api::StockListApi;
