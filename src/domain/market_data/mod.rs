//! Market data aggregate: symbols, price history, the filter/paging/row
//! services and the ports they read through.

pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use repositories::*;
pub use services::*;
pub use value_objects::*;
