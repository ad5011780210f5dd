//! Message signing with the user's ECDSA P-256 private key.

use p256::ecdsa::signature::Signer as _;
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::pkcs8::DecodePrivateKey;
use p256::SecretKey;
use std::path::{Path, PathBuf};

use crate::config::ClientConfig;
use crate::identity::types::{IdentityError, IdentityResult};

/// Produces signatures over protocol messages on behalf of the identity.
pub trait Signer: Send + Sync {
    /// Sign `message`, returning the signature bytes sent on the wire.
    fn sign(&self, message: &[u8]) -> IdentityResult<Vec<u8>>;
}

/// SHA-256 / ECDSA P-256 signer producing low-S DER signatures.
#[derive(Clone)]
pub struct EcdsaSigner {
    key: SigningKey,
}

impl EcdsaSigner {
    /// Parse a PEM private key (PKCS#8 `PRIVATE KEY` or SEC1 `EC PRIVATE KEY`).
    pub fn from_pem(pem: &[u8]) -> IdentityResult<Self> {
        let mut reader = pem;
        for item in rustls_pemfile::read_all(&mut reader) {
            let item =
                item.map_err(|e| IdentityError::InvalidKey(format!("unreadable PEM: {e}")))?;
            let secret = match item {
                rustls_pemfile::Item::Pkcs8Key(key) => {
                    SecretKey::from_pkcs8_der(key.secret_pkcs8_der())
                        .map_err(|e| IdentityError::InvalidKey(e.to_string()))?
                }
                rustls_pemfile::Item::Sec1Key(key) => {
                    SecretKey::from_sec1_der(key.secret_sec1_der())
                        .map_err(|e| IdentityError::InvalidKey(e.to_string()))?
                }
                rustls_pemfile::Item::Pkcs1Key(_) => {
                    return Err(IdentityError::InvalidKey(
                        "RSA keys are not supported, expected an EC P-256 key".to_string(),
                    ))
                }
                _ => continue,
            };
            return Ok(Self {
                key: SigningKey::from(secret),
            });
        }

        Err(IdentityError::InvalidKey(
            "no private key found in PEM data".to_string(),
        ))
    }

    /// Public half of the signing key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        self.key.verifying_key()
    }
}

impl Signer for EcdsaSigner {
    fn sign(&self, message: &[u8]) -> IdentityResult<Vec<u8>> {
        let signature: Signature = self
            .key
            .try_sign(message)
            .map_err(|e| IdentityError::Signing(e.to_string()))?;
        let signature = signature.normalize_s().unwrap_or(signature);
        Ok(signature.to_der().as_bytes().to_vec())
    }
}

impl std::fmt::Debug for EcdsaSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcdsaSigner").finish_non_exhaustive()
    }
}

/// Load the signer from the first file in the configured key directory.
pub async fn load_signer(config: &ClientConfig) -> IdentityResult<EcdsaSigner> {
    let key_path = first_key_file(&config.key_directory_path).await?;
    let pem = tokio::fs::read(&key_path)
        .await
        .map_err(|source| IdentityError::Io {
            path: key_path.clone(),
            source,
        })?;

    let signer = EcdsaSigner::from_pem(&pem)?;

    tracing::info!(key_path = %key_path.display(), "Signer loaded");

    Ok(signer)
}

/// The key directory is expected to hold a single key; when it holds more,
/// the first by file name is used.
async fn first_key_file(dir: &Path) -> IdentityResult<PathBuf> {
    let io_err = |source| IdentityError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_err)?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        let path = entry.path();
        if tokio::fs::metadata(&path).await.map_err(io_err)?.is_file() {
            files.push(path);
        }
    }

    files.sort();
    files
        .into_iter()
        .next()
        .ok_or_else(|| IdentityError::EmptyKeyDirectory(dir.to_path_buf()))
}
