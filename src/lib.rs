//! Storefront Cart
//!
//! A client-owned shopping cart that checks every change against the stock
//! reported on each product snapshot, derives counts and totals on demand,
//! and reports outcomes to an injected notification sink.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod notifications;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
