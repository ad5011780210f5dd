//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Log parameters → Open transport → Load identity + signer
//!     → Open session → Run command
//!
//! Shutdown (shutdown.rs):
//!     Close session → Close transport (always, whatever the command returned)
//! ```
//!
//! # Design Decisions
//! - Fail fast: any error ends the run
//! - Resources are released in reverse order of acquisition, exactly once

pub mod shutdown;
pub mod startup;

pub use startup::{execute, run, Command};
