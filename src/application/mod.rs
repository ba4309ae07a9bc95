pub mod config;
pub mod stock_list;

pub use config::*;
pub use stock_list::*;
