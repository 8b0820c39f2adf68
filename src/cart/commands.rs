//! Cart commands
//!
//! Every cart mutation is a [`CartCommand`] run through [`apply`], a pure
//! function from the current state to the next one. The store only adds
//! ownership and notification delivery on top.

use thiserror::Error;

use crate::{
    cart::state::{CartLine, CartState},
    notifications::Notification,
    products::{Product, ProductId},
};

/// A requested change to the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Add one unit of a product, creating its line if needed.
    Add(Product),

    /// Delete a product's line.
    Remove(ProductId),

    /// Set a line to an absolute quantity. Zero or less removes the line.
    SetQuantity(ProductId, i64),

    /// Delete every line.
    Clear,
}

/// What an accepted command did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was created with one unit.
    Added,

    /// An existing line was incremented to `quantity`.
    QuantityUpdated {
        /// Quantity after the increment
        quantity: u32,
    },

    /// An existing line was set to `quantity`.
    QuantitySet {
        /// Quantity after the update
        quantity: u32,
    },

    /// A line holding `quantity` units was deleted.
    Removed {
        /// Quantity the line held before removal
        quantity: u32,
    },

    /// Every line was deleted.
    Cleared {
        /// Number of lines deleted
        lines: usize,
    },

    /// Nothing matched; the cart is untouched.
    Unchanged,
}

/// Stock-insufficiency rejections.
///
/// The display text of each variant is the exact message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockError {
    /// Adding one more unit would exceed the product's stock.
    #[error(
        "Only {available} {} available in stock for {product_name}",
        unit_noun(.available)
    )]
    OnAdd {
        /// Product that was being added
        product_id: ProductId,
        /// Product display name
        product_name: String,
        /// Units the catalog reports as available
        available: u32,
    },

    /// The requested quantity exceeds the line's stock.
    #[error("Only {available} {} available in stock", unit_noun(.available))]
    OnUpdate {
        /// Product whose line was being updated
        product_id: ProductId,
        /// Units the catalog reports as available
        available: u32,
        /// Quantity that was requested
        requested: u32,
    },
}

impl StockError {
    /// Units the catalog reports as available.
    pub fn available(&self) -> u32 {
        match self {
            StockError::OnAdd { available, .. } | StockError::OnUpdate { available, .. } => {
                *available
            }
        }
    }
}

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "thiserror hands format arguments over by reference"
)]
fn unit_noun(available: &u32) -> &'static str {
    if *available == 1 { "item" } else { "items" }
}

/// Result of applying one command.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The cart after the command. Equal to the input state on rejection.
    pub state: CartState,

    /// What changed, or why the command was rejected.
    pub outcome: Result<CartChange, StockError>,

    /// Message to surface to the user, if this outcome calls for one.
    pub notification: Option<Notification>,
}

impl Transition {
    fn accepted(state: CartState, change: CartChange, notification: Option<Notification>) -> Self {
        Self {
            state,
            outcome: Ok(change),
            notification,
        }
    }

    fn rejected(state: CartState, error: StockError) -> Self {
        let notification = Some(Notification::error(error.to_string()));

        Self {
            state,
            outcome: Err(error),
            notification,
        }
    }
}

/// Apply a command to a cart state.
pub fn apply(state: CartState, command: CartCommand) -> Transition {
    match command {
        CartCommand::Add(product) => add(state, product),
        CartCommand::Remove(id) => remove(state, &id),
        CartCommand::SetQuantity(id, quantity) => set_quantity(state, &id, quantity),
        CartCommand::Clear => clear(state),
    }
}

fn add(mut state: CartState, product: Product) -> Transition {
    let current = state.quantity_of(&product.id);

    // A line already at u32::MAX cannot take another unit, whatever the stock.
    let Some(requested) = current
        .checked_add(1)
        .filter(|requested| product.available.allows(*requested))
    else {
        let error = StockError::OnAdd {
            available: product.available.available().unwrap_or(current),
            product_id: product.id,
            product_name: product.name,
        };

        return Transition::rejected(state, error);
    };

    if let Some(line) = state.line_mut(&product.id) {
        line.set_quantity(requested);

        let notification =
            Notification::success(format!("{} quantity updated in cart!", product.name));

        Transition::accepted(
            state,
            CartChange::QuantityUpdated {
                quantity: requested,
            },
            Some(notification),
        )
    } else {
        let notification =
            Notification::success(format!("{} added to cart successfully!", product.name));

        state.push(CartLine::new(product));

        Transition::accepted(state, CartChange::Added, Some(notification))
    }
}

fn remove(mut state: CartState, id: &ProductId) -> Transition {
    let change = state
        .remove(id)
        .map_or(CartChange::Unchanged, |line| CartChange::Removed {
            quantity: line.quantity(),
        });

    Transition::accepted(state, change, None)
}

fn set_quantity(mut state: CartState, id: &ProductId, quantity: i64) -> Transition {
    if quantity <= 0 {
        return remove(state, id);
    }

    // Quantities past u32::MAX can only be satisfied by unlimited stock.
    let requested = u32::try_from(quantity).unwrap_or(u32::MAX);

    let Some(line) = state.line_mut(id) else {
        return Transition::accepted(state, CartChange::Unchanged, None);
    };

    let stock = line.product().available;

    if let Some(available) = stock.available().filter(|available| *available < requested) {
        let error = StockError::OnUpdate {
            product_id: id.clone(),
            available,
            requested,
        };

        return Transition::rejected(state, error);
    }

    line.set_quantity(requested);

    Transition::accepted(
        state,
        CartChange::QuantitySet {
            quantity: requested,
        },
        None,
    )
}

fn clear(mut state: CartState) -> Transition {
    let lines = state.clear();

    Transition::accepted(state, CartChange::Cleared { lines }, None)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{notifications::NotificationKind, products::Stock};

    use super::*;

    fn lamp(stock: Stock) -> Product {
        Product::new("lamp", "Desk Lamp", Decimal::new(2500, 2)).with_stock(stock)
    }

    fn run(commands: impl IntoIterator<Item = CartCommand>) -> Transition {
        let mut transition = Transition::accepted(CartState::new(), CartChange::Unchanged, None);

        for command in commands {
            transition = apply(transition.state, command);
        }

        transition
    }

    #[test]
    fn add_creates_line_with_one_unit() -> TestResult {
        let transition = apply(CartState::new(), CartCommand::Add(lamp(Stock::Bounded(5))));

        assert_eq!(transition.outcome, Ok(CartChange::Added));
        assert_eq!(transition.state.quantity_of(&"lamp".into()), 1);

        let notification = transition.notification.ok_or("expected a notification")?;
        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(notification.message, "Desk Lamp added to cart successfully!");

        Ok(())
    }

    #[test]
    fn repeat_add_increments_existing_line() -> TestResult {
        let transition = run([
            CartCommand::Add(lamp(Stock::Bounded(5))),
            CartCommand::Add(lamp(Stock::Bounded(5))),
        ]);

        assert_eq!(
            transition.outcome,
            Ok(CartChange::QuantityUpdated { quantity: 2 })
        );
        assert_eq!(transition.state.len(), 1);

        let notification = transition.notification.ok_or("expected a notification")?;
        assert_eq!(notification.message, "Desk Lamp quantity updated in cart!");

        Ok(())
    }

    #[test]
    fn repeat_add_keeps_original_snapshot() -> TestResult {
        let repriced = Product::new("lamp", "Desk Lamp", Decimal::new(9900, 2));

        let transition = run([
            CartCommand::Add(lamp(Stock::Unlimited)),
            CartCommand::Add(repriced),
        ]);

        let line = transition
            .state
            .line(&"lamp".into())
            .ok_or("expected a lamp line")?;

        assert_eq!(line.product().price, Decimal::new(2500, 2));
        assert_eq!(line.quantity(), 2);

        Ok(())
    }

    #[test]
    fn add_past_stock_is_rejected_without_mutation() -> TestResult {
        let before = run([CartCommand::Add(lamp(Stock::Bounded(1)))]).state;

        let transition = apply(before.clone(), CartCommand::Add(lamp(Stock::Bounded(1))));

        assert_eq!(transition.state, before);

        let notification = transition.notification.ok_or("expected a notification")?;
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(
            notification.message,
            "Only 1 item available in stock for Desk Lamp"
        );

        Ok(())
    }

    #[test]
    fn add_with_zero_stock_is_rejected_on_first_add() {
        let transition = apply(CartState::new(), CartCommand::Add(lamp(Stock::Bounded(0))));

        assert!(transition.state.is_empty());
        assert_eq!(
            transition.outcome.map_err(|err| err.to_string()),
            Err("Only 0 items available in stock for Desk Lamp".to_string())
        );
    }

    #[test]
    fn add_to_a_full_line_is_rejected_without_mutation() -> TestResult {
        let full = run([
            CartCommand::Add(lamp(Stock::Unlimited)),
            CartCommand::SetQuantity("lamp".into(), i64::MAX),
        ])
        .state;

        assert_eq!(full.quantity_of(&"lamp".into()), u32::MAX);

        let transition = apply(full.clone(), CartCommand::Add(lamp(Stock::Unlimited)));
        let notification = transition.notification.ok_or("expected a notification")?;

        assert_eq!(transition.state, full);
        assert!(matches!(
            transition.outcome,
            Err(StockError::OnAdd { available: u32::MAX, .. })
        ));
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(
            notification.message,
            "Only 4294967295 items available in stock for Desk Lamp"
        );

        Ok(())
    }

    #[test]
    fn set_quantity_assigns_absolute_value() {
        let transition = run([
            CartCommand::Add(lamp(Stock::Bounded(5))),
            CartCommand::SetQuantity("lamp".into(), 4),
        ]);

        assert_eq!(transition.outcome, Ok(CartChange::QuantitySet { quantity: 4 }));
        assert_eq!(transition.state.quantity_of(&"lamp".into()), 4);
        assert_eq!(transition.notification, None);
    }

    #[test]
    fn set_quantity_past_stock_is_rejected() -> TestResult {
        let transition = run([
            CartCommand::Add(lamp(Stock::Bounded(3))),
            CartCommand::SetQuantity("lamp".into(), 4),
        ]);

        assert_eq!(transition.state.quantity_of(&"lamp".into()), 1);
        assert_eq!(
            transition.outcome,
            Err(StockError::OnUpdate {
                product_id: "lamp".into(),
                available: 3,
                requested: 4,
            })
        );

        let notification = transition.notification.ok_or("expected a notification")?;
        assert_eq!(notification.message, "Only 3 items available in stock");

        Ok(())
    }

    #[test]
    fn set_quantity_to_zero_removes_line() {
        let transition = run([
            CartCommand::Add(lamp(Stock::Bounded(3))),
            CartCommand::Add(lamp(Stock::Bounded(3))),
            CartCommand::SetQuantity("lamp".into(), 0),
        ]);

        assert!(transition.state.is_empty());
        assert_eq!(transition.outcome, Ok(CartChange::Removed { quantity: 2 }));
        assert_eq!(transition.notification, None);
    }

    #[test]
    fn set_quantity_on_missing_line_is_a_noop() {
        let transition = apply(CartState::new(), CartCommand::SetQuantity("lamp".into(), 2));

        assert_eq!(transition.outcome, Ok(CartChange::Unchanged));
        assert_eq!(transition.notification, None);
    }

    #[test]
    fn huge_set_quantity_saturates_for_unlimited_stock() {
        let transition = run([
            CartCommand::Add(lamp(Stock::Unlimited)),
            CartCommand::SetQuantity("lamp".into(), i64::MAX),
        ]);

        assert_eq!(transition.state.quantity_of(&"lamp".into()), u32::MAX);
    }

    #[test]
    fn remove_missing_line_is_unchanged() {
        let transition = apply(CartState::new(), CartCommand::Remove("unknown-id".into()));

        assert_eq!(transition.outcome, Ok(CartChange::Unchanged));
        assert_eq!(transition.notification, None);
    }

    #[test]
    fn clear_empties_every_line() {
        let transition = run([
            CartCommand::Add(lamp(Stock::Unlimited)),
            CartCommand::Add(Product::new("rug", "Rug", Decimal::from(80))),
            CartCommand::Clear,
        ]);

        assert!(transition.state.is_empty());
        assert_eq!(transition.outcome, Ok(CartChange::Cleared { lines: 2 }));
    }

    #[test]
    fn stock_error_reports_available_units() {
        let error = StockError::OnUpdate {
            product_id: "lamp".into(),
            available: 7,
            requested: 9,
        };

        assert_eq!(error.available(), 7);
    }
}
