use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog product as served by `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: Decimal,
    pub image: String,
}

/// Authoritative available quantity for a product, as served by
/// `GET /stock/{id}`. Read fresh for every validation, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: u64,
    pub amount: u32,
}
