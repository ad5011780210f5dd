//! Client identity: MSP ID plus the PEM certificate issued by that MSP.

use prost::Message;
use std::path::Path;

use crate::config::ClientConfig;
use crate::gateway::protos::msp::SerializedIdentity;
use crate::identity::types::{IdentityError, IdentityResult};

/// Identity presented to the network with every proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    msp_id: String,
    credentials: Vec<u8>,
}

impl Identity {
    pub fn new(msp_id: impl Into<String>, credentials: impl Into<Vec<u8>>) -> Self {
        Self {
            msp_id: msp_id.into(),
            credentials: credentials.into(),
        }
    }

    pub fn msp_id(&self) -> &str {
        &self.msp_id
    }

    /// PEM-encoded certificate bytes.
    pub fn credentials(&self) -> &[u8] {
        &self.credentials
    }

    /// Protobuf-encoded `SerializedIdentity`, used as the creator field of
    /// signature headers and commit status requests.
    pub fn serialize(&self) -> Vec<u8> {
        SerializedIdentity {
            mspid: self.msp_id.clone(),
            id_bytes: self.credentials.clone(),
        }
        .encode_to_vec()
    }
}

/// Read the configured certificate and pair it with the configured MSP ID.
pub async fn load_identity(config: &ClientConfig) -> IdentityResult<Identity> {
    let path = &config.cert_path;
    let credentials = tokio::fs::read(path)
        .await
        .map_err(|source| IdentityError::Io {
            path: path.clone(),
            source,
        })?;

    ensure_certificate(path, &credentials)?;

    tracing::info!(
        msp_id = %config.msp_id,
        cert_path = %path.display(),
        "Identity loaded"
    );

    Ok(Identity::new(config.msp_id.clone(), credentials))
}

fn ensure_certificate(path: &Path, pem: &[u8]) -> IdentityResult<()> {
    let mut reader = pem;
    let mut certs = rustls_pemfile::certs(&mut reader);
    match certs.next() {
        Some(Ok(_)) => Ok(()),
        Some(Err(source)) => Err(IdentityError::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => Err(IdentityError::MissingCertificate {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CERT: &str = "-----BEGIN CERTIFICATE-----\nAQIDBA==\n-----END CERTIFICATE-----\n";

    #[test]
    fn test_serialize_round_trips_through_protobuf() {
        let identity = Identity::new("Org1MSP", TEST_CERT.as_bytes());
        let decoded = SerializedIdentity::decode(identity.serialize().as_slice()).unwrap();
        assert_eq!(decoded.mspid, "Org1MSP");
        assert_eq!(decoded.id_bytes, TEST_CERT.as_bytes());
    }

    #[test]
    fn test_ensure_certificate() {
        let path = Path::new("cert.pem");
        assert!(ensure_certificate(path, TEST_CERT.as_bytes()).is_ok());

        let result = ensure_certificate(path, b"not a pem file");
        assert!(matches!(result, Err(IdentityError::MissingCertificate { .. })));
    }

    #[tokio::test]
    async fn test_missing_certificate_file() {
        let mut config = ClientConfig::default();
        config.cert_path = "/definitely/not/here/cert.pem".into();

        let result = load_identity(&config).await;
        assert!(matches!(result, Err(IdentityError::Io { .. })));
    }
}
