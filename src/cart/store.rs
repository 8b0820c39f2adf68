//! Cart store

use std::mem;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::{
    cart::{
        commands::{CartChange, CartCommand, StockError, Transition, apply},
        state::{CartLine, CartState},
    },
    notifications::NotificationSink,
    pricing::{OrderSummary, default_tax_rate},
    products::{Product, ProductId},
};

/// Owns a cart and reports every add or update outcome to a notification sink.
///
/// Mutations go through `&mut self`, so a store shared between threads needs
/// an outer `Mutex`.
#[derive(Debug)]
pub struct CartStore<S: NotificationSink> {
    state: CartState,
    sink: S,
    tax_rate: Percentage,
}

impl<S: NotificationSink> CartStore<S> {
    /// Create an empty cart that notifies `sink`.
    pub fn new(sink: S) -> Self {
        Self::with_state(CartState::new(), sink)
    }

    /// Create a store around an existing state.
    pub fn with_state(state: CartState, sink: S) -> Self {
        Self {
            state,
            sink,
            tax_rate: default_tax_rate(),
        }
    }

    /// Use `tax_rate` for order summaries instead of the default.
    #[must_use]
    pub fn with_tax_rate(mut self, tax_rate: Percentage) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    /// Add one unit of `product`.
    ///
    /// Creates a line on first add and increments it afterwards. Exactly one
    /// notification is emitted either way.
    ///
    /// # Errors
    ///
    /// Returns [`StockError::OnAdd`] when the product's stock cannot cover one
    /// more unit. The cart is left untouched.
    pub fn add_to_cart(&mut self, product: Product) -> Result<CartChange, StockError> {
        self.dispatch(CartCommand::Add(product))
    }

    /// Set the line for `id` to exactly `quantity` units.
    ///
    /// This is an absolute assignment, not a delta: callers stepping a line
    /// up or down pass `current ± 1`. Zero or less removes the line, and an
    /// id with no line is ignored. Success is silent.
    ///
    /// # Errors
    ///
    /// Returns [`StockError::OnUpdate`] when `quantity` exceeds the line's
    /// stock. The cart is left untouched.
    pub fn update_quantity(
        &mut self,
        id: &ProductId,
        quantity: i64,
    ) -> Result<CartChange, StockError> {
        self.dispatch(CartCommand::SetQuantity(id.clone(), quantity))
    }

    /// Remove the line for `id`, if there is one.
    pub fn remove_from_cart(&mut self, id: &ProductId) -> CartChange {
        self.dispatch(CartCommand::Remove(id.clone()))
            .unwrap_or(CartChange::Unchanged)
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) -> CartChange {
        self.dispatch(CartCommand::Clear)
            .unwrap_or(CartChange::Unchanged)
    }

    /// Apply any command, delivering its notification to the sink.
    ///
    /// # Errors
    ///
    /// Returns a [`StockError`] when the command was rejected for stock.
    pub fn dispatch(&mut self, command: CartCommand) -> Result<CartChange, StockError> {
        let Transition {
            state,
            outcome,
            notification,
        } = apply(mem::take(&mut self.state), command);

        self.state = state;

        match &outcome {
            Ok(change) => debug!(
                ?change,
                lines = self.state.len(),
                count = self.state.cart_count(),
                "cart updated"
            ),
            Err(err) => info!(available = err.available(), "cart change rejected: {err}"),
        }

        if let Some(notification) = notification {
            self.sink.notify(&notification.message, notification.kind);
        }

        outcome
    }

    /// Lines in insertion order.
    pub fn cart_items(&self) -> &[CartLine] {
        self.state.lines()
    }

    /// Total units across every line.
    pub fn cart_count(&self) -> u64 {
        self.state.cart_count()
    }

    /// Sum of line totals at full precision.
    pub fn total(&self) -> Decimal {
        self.state.total()
    }

    /// Checkout totals for the current lines.
    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary::new(self.state.lines(), self.tax_rate)
    }

    /// Read-only view of the whole cart.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// The notification sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The notification sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Dispose of the store, returning its state and sink.
    pub fn into_parts(self) -> (CartState, S) {
        (self.state, self.sink)
    }
}
