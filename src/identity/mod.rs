//! Client identity and signing.
//!
//! # Data Flow
//! ```text
//! CERT_PATH (PEM certificate)         KEY_DIRECTORY_PATH (one PEM key)
//!     → credentials.rs (Identity)         → signer.rs (EcdsaSigner)
//!     → serialized creator bytes          → DER signatures over proposals,
//!       sent with every proposal            envelopes and status requests
//! ```
//!
//! # Security Constraints
//! - Private keys are read from disk once and never logged
//! - Signatures are low-S normalized, as peers reject high-S signatures

pub mod credentials;
pub mod signer;
pub mod types;

pub use credentials::{load_identity, Identity};
pub use signer::{load_signer, EcdsaSigner, Signer};
pub use types::{IdentityError, IdentityResult};
