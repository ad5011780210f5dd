//! TLS configuration and certificate loading.

use std::path::Path;
use tonic::transport::{Certificate, ClientTlsConfig};

use crate::net::types::TransportError;

/// Load the PEM root certificate used to verify the peer.
pub async fn load_root_certificate(path: &Path) -> Result<Certificate, TransportError> {
    let pem = tokio::fs::read(path)
        .await
        .map_err(|source| TransportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let mut reader = pem.as_slice();
    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TransportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    if certs.is_empty() {
        return Err(TransportError::InvalidCertificate(path.to_path_buf()));
    }

    tracing::debug!(
        path = %path.display(),
        certificates = certs.len(),
        "TLS root certificate loaded"
    );

    Ok(Certificate::from_pem(pem))
}

/// Client TLS settings trusting `ca` and expecting `server_name` in the
/// peer's certificate regardless of the address dialled.
pub fn client_tls_config(ca: Certificate, server_name: &str) -> ClientTlsConfig {
    ClientTlsConfig::new()
        .ca_certificate(ca)
        .domain_name(server_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_certificate() {
        let result = load_root_certificate(Path::new("/definitely/not/here/ca.crt")).await;
        assert!(matches!(result, Err(TransportError::Io { .. })));
    }

    #[tokio::test]
    async fn test_file_without_certificate() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"just some text").unwrap();

        let result = load_root_certificate(file.path()).await;
        assert!(matches!(result, Err(TransportError::InvalidCertificate(_))));
    }

    #[tokio::test]
    async fn test_valid_certificate() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            b"-----BEGIN CERTIFICATE-----\nAQIDBA==\n-----END CERTIFICATE-----\n",
        )
        .unwrap();

        assert!(load_root_certificate(file.path()).await.is_ok());
    }
}
