use wasm_bindgen::prelude::*;

use crate::application::StockListConfig;
use crate::domain::logging::{LogComponent, LogLevel};

pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod view_state;

/// Install the browser logger and clock, then mount the demo list
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let config = StockListConfig::default();
    let level = config.log_level().unwrap_or(LogLevel::Debug);
    domain::logging::init_logger(Box::new(infrastructure::ConsoleLogger::new(level)));
    domain::logging::init_time_provider(Box::new(infrastructure::BrowserTimeProvider::new()));

    log_info!(
        LogComponent::Presentation("Initialize"),
        "stock list starting (page size {}, {} history points)",
        config.page_size,
        config.history_points
    );

    leptos::mount_to_body(app::App);
}
