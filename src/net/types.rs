//! Transport errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// TLS root certificate could not be read.
    #[error("failed to read TLS root certificate {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TLS root certificate file holds no PEM certificate.
    #[error("no certificate found in {}", .0.display())]
    InvalidCertificate(PathBuf),

    /// Peer endpoint is not a valid URI.
    #[error("invalid peer endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// TLS setup or connection establishment failed.
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: tonic::transport::Error,
    },
}
