//! Session Fixtures
//!
//! A scripted shopping session: the clicks a shopper would make, in order.

use serde::Deserialize;

use crate::{
    cart::CartCommand,
    catalog::{Catalog, CatalogError},
    products::ProductId,
};

/// Wrapper for session steps in YAML
#[derive(Debug, Deserialize)]
pub struct SessionFixture {
    /// Steps to replay, in order
    pub steps: Vec<StepFixture>,
}

/// Step Fixture
#[derive(Debug, Deserialize)]
pub struct StepFixture {
    /// What the shopper did
    pub action: StepAction,

    /// Product the step refers to
    #[serde(default)]
    pub product: Option<String>,

    /// Target quantity for `set`
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// Shopper actions understood in session fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepAction {
    /// Add one unit of a catalog product
    Add,

    /// Set a line's quantity
    Set,

    /// Remove a line
    Remove,

    /// Empty the cart
    Clear,

    /// Place an order for the cart
    Checkout,
}

/// A resolved session step.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStep {
    /// Run a cart command
    Command(CartCommand),

    /// Check out the cart
    Checkout,
}

impl SessionFixture {
    /// Resolve every step against `catalog`.
    ///
    /// # Errors
    ///
    /// Returns an error if a step is missing a field it needs, or if an
    /// `add` step names a product the catalog does not have.
    pub fn resolve(self, catalog: &Catalog) -> Result<Vec<SessionStep>, CatalogError> {
        self.steps
            .into_iter()
            .enumerate()
            .map(|(idx, step)| step.resolve(idx, catalog))
            .collect()
    }
}

impl StepFixture {
    fn resolve(self, idx: usize, catalog: &Catalog) -> Result<SessionStep, CatalogError> {
        let step = match self.action {
            StepAction::Add => {
                let id = required(idx, "product", self.product)?;
                CartCommand::Add(catalog.product(&ProductId::from(id))?.clone())
            }
            StepAction::Set => CartCommand::SetQuantity(
                required(idx, "product", self.product)?.into(),
                required(idx, "quantity", self.quantity)?,
            ),
            StepAction::Remove => CartCommand::Remove(required(idx, "product", self.product)?.into()),
            StepAction::Clear => CartCommand::Clear,
            StepAction::Checkout => return Ok(SessionStep::Checkout),
        };

        Ok(SessionStep::Command(step))
    }
}

fn required<T>(idx: usize, field: &'static str, value: Option<T>) -> Result<T, CatalogError> {
    value.ok_or(CatalogError::MissingField { step: idx + 1, field })
}
