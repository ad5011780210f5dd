//! Fabric gateway client for the energy-trading order contract.

pub mod config;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod orders;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use lifecycle::Command;
pub use orders::Order;
