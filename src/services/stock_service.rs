use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::models::{Product, StockError, StockResult, StockRecord};

/// Read-only stock/product lookup against the remote catalog.
///
/// Both lookups may fail with any [`StockError`]; the cart store does not
/// distinguish not-found from transport failure.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Fetch the available quantity for a product.
    async fn get_stock(&self, product_id: u64) -> StockResult<StockRecord>;

    /// Fetch the full product attributes.
    async fn get_product(&self, product_id: u64) -> StockResult<Product>;
}

/// HTTP implementation of [`StockService`].
///
/// Issues `GET {base_url}/stock/{id}` and `GET {base_url}/products/{id}`.
/// No request timeout is configured; a hung catalog hangs the caller.
pub struct HttpStockService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStockService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Build against a preconfigured client (shared pools, proxies).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> StockResult<T> {
        debug!("Fetching {}", url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StockError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl StockService for HttpStockService {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn get_stock(&self, product_id: u64) -> StockResult<StockRecord> {
        self.get_json(format!("{}/stock/{}", self.base_url, product_id))
            .await
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn get_product(&self, product_id: u64) -> StockResult<Product> {
        self.get_json(format!("{}/products/{}", self.base_url, product_id))
            .await
    }
}
