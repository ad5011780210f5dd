//! Fabric Gateway integration subsystem.
//!
//! # Data Flow
//! ```text
//! Identity + Signer + Channel
//!     → session.rs (Gateway: channel name, contract name, timeouts)
//!     → proposal.rs (proposal, transaction ID, result extraction)
//!     → client.rs (gateway.Gateway unary calls with deadlines)
//!     → peer (endorse, order, validate, commit)
//! ```
//!
//! # Design Decisions
//! - Endorsement, ordering and validation happen on the network; the client
//!   only builds, signs and relays messages
//! - Each call kind carries its own timeout, turned into a deadline when the call starts
//! - The wire client sits behind `GatewayRpc` and the session behind
//!   `GatewaySession`, so callers never depend on tonic directly

pub mod client;
pub mod proposal;
pub mod protos;
pub mod session;
pub mod timeouts;
pub mod types;

pub use client::{GatewayRpc, GrpcGatewayClient};
pub use session::{Gateway, GatewaySession};
pub use timeouts::{CallKind, CallOptions, CallTimeouts};
pub use types::{GatewayError, GatewayResult};
