//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional, never overrides the process environment)
//!     → process environment
//!     → loader.rs (resolve each setting, fall back to defaults)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → passed by reference to every component
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup; nothing mutates it afterwards
//! - Every setting has a default so an empty environment targets the local test network
//! - Resolution is a pure function of a lookup closure, so tests never touch the real environment

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{env_or_default, load_config, ConfigError};
pub use schema::ClientConfig;
pub use schema::TimeoutConfig;
