use serde::{Deserialize, Serialize};

use super::Product;

/// One product line in the cart with its requested quantity.
///
/// Serializes flat (`{id, title, price, image, amount}`), which is exactly
/// the record shape written to durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

/// The ordered collection of line items for the current session.
///
/// Items are unique by product id and keep insertion order; new items are
/// appended at the end. Serializes transparently as the item array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

/// Result of a cart mutation.
///
/// Failures never propagate as errors; callers branch on the outcome and the
/// store surfaces the matching user-facing message through its notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOutcome {
    /// The mutation was applied and persisted.
    Committed,
    /// The requested amount exceeds the available stock; state unchanged.
    StockExceeded { requested: u32, available: u32 },
    /// The referenced product is not in the cart; state unchanged.
    ItemNotFound,
    /// A stock lookup, product lookup, or storage write failed; state
    /// unchanged.
    RemoteFailure,
    /// The input was a silent no-op (non-positive amount).
    Ignored,
}

impl CartOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, CartOutcome::Committed)
    }
}

impl CartItem {
    pub fn new(product: Product, amount: u32) -> Self {
        Self { product, amount }
    }

    pub fn id(&self) -> u64 {
        self.product.id
    }
}

impl Cart {
    /// Get the line item for a product, if present.
    pub fn get(&self, product_id: u64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == product_id)
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, product_id: u64) -> bool {
        self.items.iter().any(|item| item.id() == product_id)
    }

    /// Quantity currently held for a product, zero when absent.
    pub fn amount_of(&self, product_id: u64) -> u32 {
        self.get(product_id).map(|item| item.amount).unwrap_or(0)
    }

    /// Set the quantity of an existing line item. Returns false when the
    /// product is not in the cart.
    pub fn set_amount(&mut self, product_id: u64, amount: u32) -> bool {
        match self.items.iter_mut().find(|item| item.id() == product_id) {
            Some(item) => {
                item.amount = amount;
                true
            }
            None => false,
        }
    }

    /// Append a new line item at the end of the cart.
    pub fn push(&mut self, item: CartItem) {
        self.items.push(item);
    }

    /// Remove the line item for a product. Returns false when the product is
    /// not in the cart.
    pub fn remove(&mut self, product_id: u64) -> bool {
        let original_len = self.items.len();
        self.items.retain(|item| item.id() != product_id);
        self.items.len() != original_len
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all line items.
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.amount).sum()
    }
}
