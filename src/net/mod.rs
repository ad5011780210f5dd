//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! TLS_CERT_PATH (PEM root certificate)
//!     → tls.rs (load CA, pin the expected server name)
//!     → connection.rs (open the channel to PEER_ENDPOINT)
//!     → channel handed to the gateway client
//!
//! Channel states:
//!     Connecting → Open (shared by the session) → Closed
//! ```
//!
//! # Design Decisions
//! - The TLS root certificate is read before any channel is built
//! - One channel per process, opened once and closed explicitly at shutdown
//! - The server name is pinned to PEER_HOST_ALIAS so the peer can be reached
//!   through an address that differs from its certificate subject

pub mod connection;
pub mod tls;
pub mod types;

pub use connection::{GrpcTransport, TransportHandle};
pub use types::TransportError;
