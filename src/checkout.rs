//! Checkout
//!
//! Order creation belongs to the remote service. The cart only hands over
//! its lines and totals, and empties itself once the order is accepted.

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    cart::{CartLine, CartStore},
    notifications::NotificationSink,
    pricing::OrderSummary,
};

/// Errors returned by [`CartStore::checkout`].
#[derive(Debug, Error)]
pub enum CheckoutError<E> {
    /// There is nothing in the cart to order.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// The order service rejected the order; the cart was kept.
    #[error("order creation failed: {0}")]
    OrderFailed(#[source] E),
}

/// The cart contents handed to the order service.
#[derive(Debug, Clone, Copy)]
pub struct PendingOrder<'a> {
    /// Lines being ordered
    pub lines: &'a [CartLine],

    /// Totals for those lines
    pub summary: OrderSummary,
}

impl<S: NotificationSink> CartStore<S> {
    /// Place an order for the current cart and clear it on success.
    ///
    /// `place_order` performs the external order creation. The cart is
    /// cleared only when it returns `Ok`.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: the cart has no lines; `place_order`
    ///   is not called.
    /// - [`CheckoutError::OrderFailed`]: `place_order` failed; the cart is
    ///   unchanged.
    pub fn checkout<T, E, F>(&mut self, place_order: F) -> Result<T, CheckoutError<E>>
    where
        F: FnOnce(PendingOrder<'_>) -> Result<T, E>,
    {
        if self.state().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let order = PendingOrder {
            lines: self.cart_items(),
            summary: self.order_summary(),
        };

        let total = order.summary.total;

        let placed = place_order(order).map_err(|err| {
            warn!(%total, "order creation failed; keeping cart");
            CheckoutError::OrderFailed(err)
        })?;

        self.clear_cart();

        info!(%total, "order placed; cart cleared");

        Ok(placed)
    }
}
