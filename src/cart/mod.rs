//! Cart
//!
//! A client-owned cart of product snapshots and quantities, checked against
//! each snapshot's stock whenever it changes.

pub mod commands;
pub mod state;
pub mod store;

pub use commands::{CartChange, CartCommand, StockError, Transition, apply};
pub use state::{CartLine, CartState};
pub use store::CartStore;
