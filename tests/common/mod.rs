use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopcart::models::StockResult;
use shopcart::{
    CartStore, FileCartStorage, HttpStockService, Notifier, Product, StockRecord, StockService,
};

/// Test environment: a wiremock catalog, file-backed storage in a scratch
/// directory, and a notifier that records every message.
pub struct TestEnvironment {
    pub server: MockServer,
    pub store: CartStore,
    pub notifier: Arc<CollectingNotifier>,
    pub data_dir: TempDir,
}

/// Notifier recording messages for assertions.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn last_message(&self) -> Option<String> {
        self.messages.lock().unwrap().last().cloned()
    }
}

impl Notifier for CollectingNotifier {
    fn notify_error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Stock service that always fails, for outage scenarios.
pub struct FailingStockService;

#[async_trait]
impl StockService for FailingStockService {
    async fn get_stock(&self, _product_id: u64) -> StockResult<StockRecord> {
        Err(shopcart::models::StockError::UnexpectedStatus { status: 503 })
    }

    async fn get_product(&self, _product_id: u64) -> StockResult<Product> {
        Err(shopcart::models::StockError::UnexpectedStatus { status: 503 })
    }
}

impl TestEnvironment {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let data_dir = tempfile::tempdir().expect("Failed to create scratch dir");
        let notifier = Arc::new(CollectingNotifier::default());

        let store = CartStore::initialize(
            Arc::new(HttpStockService::new(server.uri())),
            Arc::new(FileCartStorage::new(data_dir.path())),
            notifier.clone(),
            "cart",
        )
        .await;

        Self {
            server,
            store,
            notifier,
            data_dir,
        }
    }

    /// Rebuild the store over the same storage directory, simulating a new
    /// session restoring the persisted cart.
    pub async fn restart(&mut self) {
        let notifier = Arc::new(CollectingNotifier::default());
        self.store = CartStore::initialize(
            Arc::new(HttpStockService::new(self.server.uri())),
            Arc::new(FileCartStorage::new(self.data_dir.path())),
            notifier.clone(),
            "cart",
        )
        .await;
        self.notifier = notifier;
    }

    /// Serve a product with the given stock amount from the mock catalog.
    pub async fn seed_product(&self, id: u64, title: &str, stock: u32) {
        Mock::given(method("GET"))
            .and(path(format!("/products/{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "title": title,
                "price": 139.9,
                "image": format!("https://cdn.example.com/{}.jpg", id)
            })))
            .mount(&self.server)
            .await;

        self.set_stock(id, stock).await;
    }

    /// Declare the stock amount for a product. To change an amount already
    /// mounted, call [`Self::reset_catalog`] first and seed again.
    pub async fn set_stock(&self, id: u64, amount: u32) {
        Mock::given(method("GET"))
            .and(path(format!("/stock/{}", id)))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": id, "amount": amount})),
            )
            .mount(&self.server)
            .await;
    }

    /// Drop every mounted catalog response.
    pub async fn reset_catalog(&self) {
        self.server.reset().await;
    }

    /// The raw persisted blob, if any mutation committed yet.
    pub async fn persisted_blob(&self) -> Option<String> {
        tokio::fs::read_to_string(self.data_dir.path().join("cart.json"))
            .await
            .ok()
    }
}
