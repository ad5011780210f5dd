//! Configuration loading from the process environment.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::schema::*;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Return the value `lookup` yields for `key`, or `default` when it is unset
/// or empty.
pub fn env_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

fn path_or_default<F>(lookup: &F, key: &str, default: PathBuf) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => default,
    }
}

impl ClientConfig {
    /// Resolve every setting from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve every setting through `lookup`.
    ///
    /// Credential paths default relative to the resolved crypto path, so
    /// overriding `CRYPTO_PATH` alone relocates all of them.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let crypto_path = path_or_default(&lookup, CRYPTO_PATH_VAR, default_crypto_path());

        Self {
            channel_name: env_or_default(&lookup, CHANNEL_NAME_VAR, DEFAULT_CHANNEL_NAME),
            chaincode_name: env_or_default(&lookup, CHAINCODE_NAME_VAR, DEFAULT_CHAINCODE_NAME),
            msp_id: env_or_default(&lookup, MSP_ID_VAR, DEFAULT_MSP_ID),
            key_directory_path: path_or_default(
                &lookup,
                KEY_DIRECTORY_PATH_VAR,
                default_key_directory_path(&crypto_path),
            ),
            cert_path: path_or_default(&lookup, CERT_PATH_VAR, default_cert_path(&crypto_path)),
            tls_cert_path: path_or_default(
                &lookup,
                TLS_CERT_PATH_VAR,
                default_tls_cert_path(&crypto_path),
            ),
            peer_endpoint: env_or_default(&lookup, PEER_ENDPOINT_VAR, DEFAULT_PEER_ENDPOINT),
            peer_host_alias: env_or_default(&lookup, PEER_HOST_ALIAS_VAR, DEFAULT_PEER_HOST_ALIAS),
            crypto_path,
            timeouts: TimeoutConfig::default(),
        }
    }
}

/// Prime the environment from `.env` (if any), resolve and validate.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.into()),
    }

    let config = ClientConfig::from_env();
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_unset_values_use_defaults() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config.channel_name, "mychannel");
        assert_eq!(config.chaincode_name, "basic");
        assert_eq!(config.msp_id, "Org1MSP");
        assert_eq!(config.peer_endpoint, "localhost:7051");
        assert_eq!(config.peer_host_alias, "peer0.org1.example.com");
        assert_eq!(config.crypto_path, default_crypto_path());
        assert_eq!(config.cert_path, default_cert_path(&default_crypto_path()));
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let lookup = lookup_from(&[(CHANNEL_NAME_VAR, ""), (MSP_ID_VAR, "")]);
        let config = ClientConfig::from_lookup(lookup);
        assert_eq!(config.channel_name, DEFAULT_CHANNEL_NAME);
        assert_eq!(config.msp_id, DEFAULT_MSP_ID);
    }

    #[test]
    fn test_set_values_override_defaults() {
        let lookup = lookup_from(&[
            (CHANNEL_NAME_VAR, "energy"),
            (CHAINCODE_NAME_VAR, "trading"),
            (MSP_ID_VAR, "Org2MSP"),
            (PEER_ENDPOINT_VAR, "peer.example:9051"),
            (PEER_HOST_ALIAS_VAR, "peer0.org2.example.com"),
            (TLS_CERT_PATH_VAR, "/tls/ca.crt"),
        ]);
        let config = ClientConfig::from_lookup(lookup);
        assert_eq!(config.channel_name, "energy");
        assert_eq!(config.chaincode_name, "trading");
        assert_eq!(config.msp_id, "Org2MSP");
        assert_eq!(config.peer_endpoint, "peer.example:9051");
        assert_eq!(config.peer_host_alias, "peer0.org2.example.com");
        assert_eq!(config.tls_cert_path, Path::new("/tls/ca.crt"));
    }

    #[test]
    fn test_credential_paths_follow_crypto_path() {
        let config = ClientConfig::from_lookup(lookup_from(&[(CRYPTO_PATH_VAR, "/org1")]));
        assert_eq!(config.crypto_path, Path::new("/org1"));
        assert!(config.key_directory_path.starts_with("/org1"));
        assert!(config.cert_path.starts_with("/org1"));
        assert!(config.tls_cert_path.starts_with("/org1"));
    }

    #[test]
    fn test_explicit_path_wins_over_crypto_path() {
        let lookup = lookup_from(&[(CRYPTO_PATH_VAR, "/org1"), (KEY_DIRECTORY_PATH_VAR, "/keys")]);
        let config = ClientConfig::from_lookup(lookup);
        assert_eq!(config.key_directory_path, Path::new("/keys"));
    }

    #[test]
    fn test_env_or_default() {
        let lookup = lookup_from(&[("SET", "value"), ("EMPTY", "")]);
        assert_eq!(env_or_default(&lookup, "SET", "fallback"), "value");
        assert_eq!(env_or_default(&lookup, "EMPTY", "fallback"), "fallback");
        assert_eq!(env_or_default(&lookup, "MISSING", "fallback"), "fallback");
    }
}
