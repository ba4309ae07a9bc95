pub mod demo_data;
pub mod services;

pub use demo_data::{InMemoryStockService, UsdFormatter};
pub use services::{BrowserTimeProvider, ConsoleLogger};
