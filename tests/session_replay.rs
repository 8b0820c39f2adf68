//! Replays catalog and session files the way the binary does.

use std::{fs, path::PathBuf};

use anyhow::{Result, anyhow};
use rust_decimal::Decimal;
use rusty_money::iso;
use tempfile::tempdir;

use storefront_cart::prelude::*;

fn demo(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join(file)
}

struct Replay {
    store: CartStore<RecordingSink>,
    receipts: Vec<String>,
    empty_checkouts: usize,
}

fn replay(catalog: &Catalog, steps: Vec<SessionStep>) -> Result<Replay> {
    let currency = catalog.currency()?;
    let mut store = CartStore::new(RecordingSink::new());
    let mut receipts = Vec::new();
    let mut empty_checkouts = 0;

    for step in steps {
        match step {
            SessionStep::Command(command) => {
                _ = store.dispatch(command);
            }
            SessionStep::Checkout => {
                let placed = store.checkout(|order| {
                    let mut out = Vec::new();
                    CartReceipt::new(order.lines, order.summary, currency).write_to(&mut out)?;

                    Ok::<_, ReceiptError>(String::from_utf8_lossy(&out).into_owned())
                });

                match placed {
                    Ok(receipt) => receipts.push(receipt),
                    Err(CheckoutError::EmptyCart) => empty_checkouts += 1,
                    Err(CheckoutError::OrderFailed(err)) => return Err(err.into()),
                }
            }
        }
    }

    Ok(Replay {
        store,
        receipts,
        empty_checkouts,
    })
}

#[test]
fn demo_session_replays_to_a_single_order() -> Result<()> {
    let catalog = Catalog::load(demo("catalog.yml"))?;
    let steps = catalog.load_session(demo("session.yml"))?;

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.currency()?, iso::USD);

    let Replay {
        store,
        receipts,
        empty_checkouts,
    } = replay(&catalog, steps)?;

    let messages: Vec<&str> = store
        .sink()
        .notifications()
        .iter()
        .map(|notification| notification.message.as_str())
        .collect();

    assert_eq!(
        messages,
        vec![
            "Minimal Market added to cart successfully!",
            "Minimal Market quantity updated in cart!",
            "Only 2 items available in stock for Minimal Market",
            "Artisan Atelier added to cart successfully!",
            "Only 1 item available in stock",
            "Fresh Bites added to cart successfully!",
        ]
    );

    // Artisan Atelier x1 at 59.00 plus Fresh Bites x4 at 45.00, then 10% tax.
    let receipt = receipts
        .first()
        .ok_or_else(|| anyhow!("expected one order"))?;

    assert_eq!(receipts.len(), 1);
    assert!(receipt.contains("Artisan Atelier"), "{receipt}");
    assert!(!receipt.contains("Minimal Market"), "{receipt}");
    assert!(receipt.contains("239.00"), "{receipt}");
    assert!(receipt.contains("262.90"), "{receipt}");
    assert_eq!(empty_checkouts, 1);
    assert!(store.state().is_empty());

    Ok(())
}

#[test]
fn session_files_load_from_disk() -> Result<()> {
    let dir = tempdir()?;
    let catalog_path = dir.path().join("catalog.yml");
    let session_path = dir.path().join("session.yml");

    fs::write(
        &catalog_path,
        "
products:
  p1:
    name: Notebook
    price: 10.00 GBP
    available: 2
  p2:
    name: Pen
    price: 5.00 GBP
",
    )?;
    fs::write(
        &session_path,
        "
steps:
  - action: add
    product: p1
  - action: add
    product: p2
  - action: set
    product: p2
    quantity: 100
  - action: remove
    product: p1
",
    )?;

    let catalog = Catalog::load(&catalog_path)?;
    let steps = catalog.load_session(&session_path)?;
    let Replay { store, receipts, .. } = replay(&catalog, steps)?;

    assert!(receipts.is_empty());
    assert_eq!(store.cart_count(), 100);
    assert_eq!(store.total(), Decimal::from(500));
    assert_eq!(catalog.currency()?, iso::GBP);

    Ok(())
}

#[test]
fn adding_an_unknown_product_fails_to_resolve() -> Result<()> {
    let dir = tempdir()?;
    let session_path = dir.path().join("session.yml");

    fs::write(
        &session_path,
        "
steps:
  - action: add
    product: ghost
",
    )?;

    let catalog = Catalog::load(demo("catalog.yml"))?;
    let result = catalog.load_session(&session_path);

    assert!(matches!(result, Err(CatalogError::ProductNotFound(id)) if id == "ghost"));

    Ok(())
}

#[test]
fn set_without_quantity_names_the_step() -> Result<()> {
    let dir = tempdir()?;
    let session_path = dir.path().join("session.yml");

    fs::write(
        &session_path,
        "
steps:
  - action: clear
  - action: set
    product: fresh-bites
",
    )?;

    let catalog = Catalog::load(demo("catalog.yml"))?;
    let err = catalog
        .load_session(&session_path)
        .err()
        .ok_or_else(|| anyhow!("expected a missing field error"))?;

    assert_eq!(err.to_string(), "Session step 2 is missing `quantity`");

    Ok(())
}

#[test]
fn missing_catalog_file_is_an_io_error() -> Result<()> {
    let dir = tempdir()?;

    let result = Catalog::load(dir.path().join("absent.yml"));

    assert!(matches!(result, Err(CatalogError::Io(_))));

    Ok(())
}
