//! Cart state

use rust_decimal::Decimal;

use crate::{
    pricing::{line_total, subtotal},
    products::{Product, ProductId},
};

/// One product and the number of units of it held in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    product: Product,
    quantity: u32,
}

impl CartLine {
    pub(super) fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// The product snapshot captured when the line was created.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// The number of units held, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price multiplied by quantity, at full precision.
    pub fn total(&self) -> Decimal {
        line_total(self)
    }

    pub(super) fn set_quantity(&mut self, quantity: u32) {
        debug_assert!(quantity >= 1, "cart lines hold at least one unit");

        self.quantity = quantity;
    }
}

/// Ordered cart lines, unique by product id.
///
/// Only the reducer in [`crate::cart::commands`] can change a `CartState`;
/// everything public here is a read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Find the line for a product.
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product.id == id)
    }

    /// Units of a product currently held, zero when absent.
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.line(id).map_or(0, CartLine::quantity)
    }

    /// Total number of units across all lines.
    pub fn cart_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of every line total, at full precision.
    pub fn total(&self) -> Decimal {
        subtotal(&self.lines)
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub(super) fn line_mut(&mut self, id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| &line.product.id == id)
    }

    pub(super) fn push(&mut self, line: CartLine) {
        debug_assert!(
            self.line(&line.product.id).is_none(),
            "duplicate cart line for {}",
            line.product.id
        );

        self.lines.push(line);
    }

    pub(super) fn remove(&mut self, id: &ProductId) -> Option<CartLine> {
        let idx = self.lines.iter().position(|line| &line.product.id == id)?;

        Some(self.lines.remove(idx))
    }

    pub(super) fn clear(&mut self) -> usize {
        let removed = self.lines.len();
        self.lines.clear();
        removed
    }
}

impl<'a> IntoIterator for &'a CartState {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product::new(id, id.to_uppercase(), Decimal::from(price))
    }

    #[test]
    fn new_state_is_empty() {
        let state = CartState::new();

        assert!(state.is_empty());
        assert_eq!(state.cart_count(), 0);
        assert_eq!(state.total(), Decimal::ZERO);
    }

    #[test]
    fn count_sums_quantities_not_lines() -> TestResult {
        let mut state = CartState::new();
        state.push(CartLine::new(product("p1", 10)));
        state.push(CartLine::new(product("p2", 5)));

        state
            .line_mut(&ProductId::from("p1"))
            .ok_or("missing p1")?
            .set_quantity(3);

        assert_eq!(state.len(), 2);
        assert_eq!(state.cart_count(), 4);
        assert_eq!(state.total(), Decimal::from(35));

        Ok(())
    }

    #[test]
    fn quantity_of_missing_product_is_zero() {
        let state = CartState::new();

        assert_eq!(state.quantity_of(&ProductId::from("nope")), 0);
    }

    #[test]
    fn remove_preserves_order_of_remaining_lines() {
        let mut state = CartState::new();
        state.push(CartLine::new(product("a", 1)));
        state.push(CartLine::new(product("b", 1)));
        state.push(CartLine::new(product("c", 1)));

        let removed = state.remove(&ProductId::from("b"));

        let ids: Vec<&str> = state.iter().map(|line| line.product().id.as_str()).collect();

        assert!(removed.is_some());
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn clear_reports_removed_line_count() {
        let mut state = CartState::new();
        state.push(CartLine::new(product("a", 1)));
        state.push(CartLine::new(product("b", 1)));

        assert_eq!(state.clear(), 2);
        assert!(state.is_empty());
    }
}
