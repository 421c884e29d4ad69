use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use crate::models::{Cart, CartItem, CartOutcome, StorageResult};
use crate::notify::{self, Notifier};
use crate::services::StockService;
use crate::storage::CartStorage;

/// The cart state manager.
///
/// Owns the in-memory cart and keeps it in lockstep with durable storage:
/// every mutation validates against the stock service, persists the full
/// serialized cart, and only then replaces the in-memory state. Failures
/// never escape an operation; they surface through the [`Notifier`] and the
/// returned [`CartOutcome`].
///
/// Mutations serialize on an internal commit lock held across the whole
/// operation, including its remote lookups, so overlapping callers cannot
/// lose updates. Snapshot reads only take a short read lock.
pub struct CartStore {
    cart: RwLock<Cart>,
    commit_lock: Mutex<()>,
    stock: Arc<dyn StockService>,
    storage: Arc<dyn CartStorage>,
    notifier: Arc<dyn Notifier>,
    storage_key: String,
}

impl CartStore {
    /// Build the store, restoring the cart persisted under `storage_key`.
    ///
    /// An absent blob yields an empty cart. A malformed blob or a failing
    /// storage read also yields an empty cart, with a logged warning; startup
    /// never fails.
    #[instrument(skip_all)]
    pub async fn initialize(
        stock: Arc<dyn StockService>,
        storage: Arc<dyn CartStorage>,
        notifier: Arc<dyn Notifier>,
        storage_key: impl Into<String>,
    ) -> Self {
        let storage_key = storage_key.into();
        let cart = match storage.get(&storage_key).await {
            Ok(Some(blob)) => match serde_json::from_str::<Cart>(&blob) {
                Ok(cart) => {
                    info!("Restored cart with {} items", cart.len());
                    cart
                }
                Err(e) => {
                    warn!("Persisted cart is malformed, starting empty: {}", e);
                    Cart::default()
                }
            },
            Ok(None) => {
                info!("No persisted cart, starting empty");
                Cart::default()
            }
            Err(e) => {
                warn!("Failed to read persisted cart, starting empty: {}", e);
                Cart::default()
            }
        };

        Self {
            cart: RwLock::new(cart),
            commit_lock: Mutex::new(()),
            stock,
            storage,
            notifier,
            storage_key,
        }
    }

    /// Current cart snapshot. The returned value is detached; mutating it
    /// does not touch the store.
    pub async fn cart(&self) -> Cart {
        self.cart.read().await.clone()
    }

    /// Add one unit of a product to the cart.
    ///
    /// A product already in the cart has its amount incremented by one; a new
    /// product is fetched from the catalog and appended with amount 1. The
    /// requested amount is validated against fresh stock data first.
    #[instrument(skip(self))]
    pub async fn add_product(&self, product_id: u64) -> CartOutcome {
        info!("Adding product to cart");
        let _guard = self.commit_lock.lock().await;

        let mut next = self.cart.read().await.clone();
        let current_amount = next.amount_of(product_id);

        let stock = match self.stock.get_stock(product_id).await {
            Ok(stock) => stock,
            Err(e) => {
                warn!("Stock lookup failed: {}", e);
                return self.fail(notify::ADD_FAILED);
            }
        };

        let requested = current_amount + 1;
        if requested > stock.amount {
            info!(
                requested,
                available = stock.amount,
                "Requested amount exceeds stock"
            );
            self.notifier.notify_error(notify::STOCK_EXCEEDED);
            return CartOutcome::StockExceeded {
                requested,
                available: stock.amount,
            };
        }

        if !next.set_amount(product_id, requested) {
            let product = match self.stock.get_product(product_id).await {
                Ok(product) => product,
                Err(e) => {
                    warn!("Product lookup failed: {}", e);
                    return self.fail(notify::ADD_FAILED);
                }
            };
            next.push(CartItem::new(product, 1));
        }

        match self.commit(next).await {
            Ok(()) => {
                info!("Product added to cart");
                CartOutcome::Committed
            }
            Err(e) => {
                warn!("Persisting cart failed: {}", e);
                self.fail(notify::ADD_FAILED)
            }
        }
    }

    /// Remove a product's line item from the cart.
    ///
    /// Performs no remote lookup; async only for the persistence write.
    #[instrument(skip(self))]
    pub async fn remove_product(&self, product_id: u64) -> CartOutcome {
        info!("Removing product from cart");
        let _guard = self.commit_lock.lock().await;

        let mut next = self.cart.read().await.clone();
        if !next.remove(product_id) {
            info!("Product not in cart");
            self.notifier.notify_error(notify::REMOVE_FAILED);
            return CartOutcome::ItemNotFound;
        }

        match self.commit(next).await {
            Ok(()) => {
                info!("Product removed from cart");
                CartOutcome::Committed
            }
            Err(e) => {
                warn!("Persisting cart failed: {}", e);
                self.fail(notify::REMOVE_FAILED)
            }
        }
    }

    /// Set a product's amount to an exact value.
    ///
    /// A non-positive `amount` is a silent no-op. The new amount is validated
    /// against fresh stock data before the cart is touched.
    #[instrument(skip(self))]
    pub async fn update_product_amount(&self, product_id: u64, amount: i64) -> CartOutcome {
        if amount <= 0 {
            debug!("Non-positive amount, ignoring");
            return CartOutcome::Ignored;
        }

        info!("Updating product amount");
        let _guard = self.commit_lock.lock().await;

        let stock = match self.stock.get_stock(product_id).await {
            Ok(stock) => stock,
            Err(e) => {
                warn!("Stock lookup failed: {}", e);
                return self.fail(notify::UPDATE_FAILED);
            }
        };

        if amount as u64 > u64::from(stock.amount) {
            info!(
                requested = amount,
                available = stock.amount,
                "Requested amount exceeds stock"
            );
            self.notifier.notify_error(notify::STOCK_EXCEEDED);
            return CartOutcome::StockExceeded {
                requested: u32::try_from(amount).unwrap_or(u32::MAX),
                available: stock.amount,
            };
        }
        let amount = amount as u32;

        let mut next = self.cart.read().await.clone();
        if !next.set_amount(product_id, amount) {
            info!("Product not in cart");
            self.notifier.notify_error(notify::UPDATE_FAILED);
            return CartOutcome::ItemNotFound;
        }

        match self.commit(next).await {
            Ok(()) => {
                info!("Product amount updated");
                CartOutcome::Committed
            }
            Err(e) => {
                warn!("Persisting cart failed: {}", e);
                self.fail(notify::UPDATE_FAILED)
            }
        }
    }

    /// Persist `next` in full, then swap it into memory. Memory is untouched
    /// when the write fails, keeping storage and state in lockstep.
    async fn commit(&self, next: Cart) -> StorageResult<()> {
        let blob = serde_json::to_string(&next)?;
        self.storage.set(&self.storage_key, &blob).await?;
        *self.cart.write().await = next;
        Ok(())
    }

    fn fail(&self, message: &str) -> CartOutcome {
        self.notifier.notify_error(message);
        CartOutcome::RemoteFailure
    }
}
