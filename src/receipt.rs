//! Receipt
//!
//! Terminal rendering of a cart and its checkout totals.

use std::io;

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::CartLine,
    pricing::{OrderSummary, PricingError, to_money},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// An amount could not be converted for display.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Writing to the output failed.
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// A cart snapshot ready to print.
#[derive(Debug, Clone, Copy)]
pub struct CartReceipt<'a> {
    lines: &'a [CartLine],
    summary: OrderSummary,
    currency: &'static Currency,
}

impl<'a> CartReceipt<'a> {
    /// Create a receipt for `lines` with the given totals.
    pub fn new(lines: &'a [CartLine], summary: OrderSummary, currency: &'static Currency) -> Self {
        Self {
            lines,
            summary,
            currency,
        }
    }

    /// Currency used for all monetary values.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Write the line table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if an amount is out of range or the output
    /// cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        if self.lines.is_empty() {
            writeln!(out, "\nYour cart is empty.")?;
            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Unit Price", "Line Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            let product = line.product();

            builder.push_record([
                format!("#{:<3}", idx + 1),
                product.name.clone(),
                line.quantity().to_string(),
                to_money(product.price, self.currency)?.to_string(),
                to_money(line.total(), self.currency)?.to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..5), Alignment::right());
        table.modify(Rows::first(), Alignment::center());

        writeln!(out, "\n{table}")?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let rows = [
            (" Subtotal:", to_money(self.summary.subtotal, self.currency)?.to_string()),
            (" Shipping:", "Free".to_string()),
            (" Tax:", to_money(self.summary.tax, self.currency)?.to_string()),
            (" Total:", to_money(self.summary.total, self.currency)?.to_string()),
        ];

        let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in rows {
            writeln!(out, "{label:<label_width$}  {value:>value_width$}")?;
        }

        Ok(())
    }
}
