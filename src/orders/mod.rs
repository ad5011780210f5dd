//! Energy-trading orders on the ledger.
//!
//! # Data Flow
//! ```text
//! Order (in memory, built just before submission)
//!     → types.rs (positional string arguments)
//!     → driver.rs RegisterOrder (submit, wait for commit)
//!     → driver.rs ReadOrder (evaluate, UTF-8 + JSON decode)
//! ```
//!
//! Validation, uniqueness and persistence are the contract's concern.

pub mod driver;
pub mod types;

pub use driver::{read_order_by_id, register_order, READ_ORDER, REGISTER_ORDER};
pub use types::{BidStatus, DecodeError, Order, OrderAction};
