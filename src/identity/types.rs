//! Credential loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading credentials or signing.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Credential file or directory could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Certificate file holds no PEM certificate.
    #[error("no certificate found in {}", path.display())]
    MissingCertificate { path: PathBuf },

    /// Key directory holds no files.
    #[error("no private key file found in {}", .0.display())]
    EmptyKeyDirectory(PathBuf),

    /// Key material could not be parsed as a P-256 private key.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// Signing operation failed.
    #[error("signing failed: {0}")]
    Signing(String),
}

/// Result type for credential operations.
pub type IdentityResult<T> = Result<T, IdentityError>;
