//! Storefront cart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        CartChange, CartCommand, CartLine, CartState, CartStore, StockError, Transition, apply,
    },
    catalog::{Catalog, CatalogError, SessionStep},
    checkout::{CheckoutError, PendingOrder},
    notifications::{
        Notification, NotificationKind, NotificationSink, RecordingSink, TracingSink,
    },
    pricing::{OrderSummary, PricingError, default_tax_rate, line_total, subtotal, to_money},
    products::{Product, ProductId, Stock},
    receipt::{CartReceipt, ReceiptError},
};
