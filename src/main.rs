//! Storefront cart session replay
//!
//! Loads a product catalog and a scripted shopping session, runs every step
//! through the cart, and prints each notification followed by the receipt.
//!
//! Use `--catalog` for the catalog YAML file
//! Use `--session` for the session YAML file
//! Use `--tax-rate` to override the checkout tax rate (default 10%)

use std::{
    io::{self, Write},
    process,
};

use thiserror::Error;
use tracing::{error, info};

use storefront_cart::{
    cart::CartStore,
    catalog::{Catalog, CatalogError, SessionStep},
    checkout::CheckoutError,
    config::CartConfig,
    notifications::{NotificationKind, NotificationSink, TracingSink},
    observability::init_subscriber,
    receipt::{CartReceipt, ReceiptError},
};

/// Errors that end a session replay.
#[derive(Debug, Error)]
enum AppError {
    /// The catalog or session could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The receipt could not be written.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),
}

/// Storefront cart entry point
pub fn main() {
    let config = CartConfig::load().unwrap_or_else(|e| e.exit());

    if let Err(e) = init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("Startup error: {e}");
        }

        process::exit(1);
    }

    if let Err(e) = run(&config) {
        error!(error = %e, "session replay failed");

        process::exit(1);
    }
}

fn run(config: &CartConfig) -> Result<(), AppError> {
    let catalog = Catalog::load(&config.catalog)?;
    let currency = catalog.currency()?;
    let steps = catalog.load_session(&config.session)?;

    info!(products = catalog.len(), steps = steps.len(), "replaying session");

    let console = |message: &str, kind: NotificationKind| {
        TracingSink.notify(message, kind);

        _ = writeln!(io::stdout(), "[{kind}] {message}");
    };

    let mut store = CartStore::new(console).with_tax_rate(config.tax_rate);
    let mut out = io::stdout();

    for step in steps {
        match step {
            SessionStep::Command(command) => {
                // Rejections have already been reported through the sink.
                _ = store.dispatch(command);
            }
            SessionStep::Checkout => {
                let placed = store.checkout(|order| {
                    CartReceipt::new(order.lines, order.summary, currency).write_to(&mut out)?;
                    writeln!(out, "Order placed.")?;

                    Ok::<_, ReceiptError>(())
                });

                match placed {
                    Ok(()) => {}
                    Err(CheckoutError::EmptyCart) => store
                        .sink_mut()
                        .notify("Your cart is empty.", NotificationKind::Info),
                    Err(CheckoutError::OrderFailed(err)) => return Err(err.into()),
                }
            }
        }
    }

    info!(
        count = store.cart_count(),
        total = %store.total(),
        "session replayed"
    );

    CartReceipt::new(store.cart_items(), store.order_summary(), currency).write_to(&mut out)?;

    Ok(())
}
