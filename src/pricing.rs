//! Pricing
//!
//! Amounts stay at full decimal precision; rounding to minor units only
//! happens when converting to [`Money`] for display.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::cart::state::CartLine;

/// Errors that can occur while presenting an amount.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The amount does not fit in the currency's minor units.
    #[error("amount {0} is out of range for display")]
    OutOfRange(Decimal),
}

/// Unit price multiplied by quantity.
pub fn line_total(line: &CartLine) -> Decimal {
    line.product()
        .price
        .saturating_mul(Decimal::from(line.quantity()))
}

/// Sum of every line total.
pub fn subtotal<'a>(lines: impl IntoIterator<Item = &'a CartLine>) -> Decimal {
    lines
        .into_iter()
        .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line_total(line)))
}

/// Round an amount to two fraction digits and wrap it as [`Money`].
///
/// # Errors
///
/// Returns [`PricingError::OutOfRange`] if the amount has too many minor
/// units for an `i64`.
pub fn to_money(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError> {
    let minor_units = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|value| value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|value| value.to_i64())
        .ok_or(PricingError::OutOfRange(amount))?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Checkout totals for a cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderSummary {
    /// Sum of line totals
    pub subtotal: Decimal,

    /// Tax charged on the subtotal
    pub tax: Decimal,

    /// Shipping charge; always free
    pub shipping: Decimal,

    /// Subtotal plus tax plus shipping
    pub total: Decimal,
}

impl OrderSummary {
    /// Summarise `lines` with tax at `tax_rate`.
    pub fn new<'a>(lines: impl IntoIterator<Item = &'a CartLine>, tax_rate: Percentage) -> Self {
        let subtotal = subtotal(lines);
        let tax = tax_rate * subtotal;
        let shipping = Decimal::ZERO;

        Self {
            subtotal,
            tax,
            shipping,
            total: subtotal.saturating_add(tax).saturating_add(shipping),
        }
    }
}

/// Tax rate applied when none is configured.
pub fn default_tax_rate() -> Percentage {
    Percentage::from(0.1)
}
