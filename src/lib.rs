//! Client-side shopping-cart state management.
//!
//! The crate centers on [`CartStore`]: an in-memory cart that validates
//! quantities against a remote stock endpoint before mutating and writes the
//! full cart to durable storage on every successful mutation. UI hosts reach
//! the one shared store through [`CartContext`].

pub mod config;
pub mod context;
pub mod models;
pub mod notify;
pub mod observability;
pub mod services;
pub mod storage;

pub use config::{Config, ConfigError};
pub use context::CartContext;
pub use models::{
    Cart, CartItem, CartOutcome, Product, StockError, StockRecord, StorageError,
};
pub use notify::{Notifier, TracingNotifier};
pub use observability::{init_logging, ObservabilityError};
pub use services::{CartStore, HttpStockService, StockService};
pub use storage::{CartStorage, FileCartStorage, MemoryCartStorage};
