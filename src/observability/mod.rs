//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging through `tracing`; every subsystem logs with fields
//!   (tx_id, order_id, peer_endpoint) rather than interpolated text
//! - Filtering is controlled by `RUST_LOG`
//! - Private keys and certificates are never logged

pub mod logging;
