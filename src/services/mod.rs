// Re-export service types
pub use self::cart_store::CartStore;
pub use self::stock_service::{HttpStockService, StockService};

pub mod cart_store;
pub mod stock_service;
