use tracing::error;

/// User-facing message for a quantity that exceeds available stock.
pub const STOCK_EXCEEDED: &str = "requested quantity exceeds stock";
/// User-facing message for any failure while adding a product.
pub const ADD_FAILED: &str = "failed to add product";
/// User-facing message for any failure while removing a product.
pub const REMOVE_FAILED: &str = "failed to remove product";
/// User-facing message for any failure while changing a product amount.
pub const UPDATE_FAILED: &str = "failed to update product amount";

/// Error-surfacing collaborator.
///
/// Fire-and-forget: implementations must not block and have no return value.
/// The cart store is the only caller; it reports every failed operation here
/// and nowhere else.
pub trait Notifier: Send + Sync {
    fn notify_error(&self, message: &str);
}

/// Notifier that forwards messages to the `tracing` error stream, for hosts
/// without their own toast/banner mechanism.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_error(&self, message: &str) {
        error!(target: "shopcart::notify", "{}", message);
    }
}
