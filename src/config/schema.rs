//! Configuration schema definitions.
//!
//! Environment variable names and their defaults live here next to the
//! fields they populate.

use std::path::{Path, PathBuf};

pub const CHANNEL_NAME_VAR: &str = "CHANNEL_NAME";
pub const CHAINCODE_NAME_VAR: &str = "CHAINCODE_NAME";
pub const MSP_ID_VAR: &str = "MSP_ID";
pub const CRYPTO_PATH_VAR: &str = "CRYPTO_PATH";
pub const KEY_DIRECTORY_PATH_VAR: &str = "KEY_DIRECTORY_PATH";
pub const CERT_PATH_VAR: &str = "CERT_PATH";
pub const TLS_CERT_PATH_VAR: &str = "TLS_CERT_PATH";
pub const PEER_ENDPOINT_VAR: &str = "PEER_ENDPOINT";
pub const PEER_HOST_ALIAS_VAR: &str = "PEER_HOST_ALIAS";

pub const DEFAULT_CHANNEL_NAME: &str = "mychannel";
pub const DEFAULT_CHAINCODE_NAME: &str = "basic";
pub const DEFAULT_MSP_ID: &str = "Org1MSP";
pub const DEFAULT_PEER_ENDPOINT: &str = "localhost:7051";
pub const DEFAULT_PEER_HOST_ALIAS: &str = "peer0.org1.example.com";

const DEFAULT_USER: &str = "User1@org1.example.com";
const DEFAULT_PEER: &str = "peer0.org1.example.com";

/// Root configuration for the order client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Channel the contract is deployed on.
    pub channel_name: String,

    /// Name of the deployed chaincode.
    pub chaincode_name: String,

    /// Membership service provider the client identity belongs to.
    pub msp_id: String,

    /// Root of the organization's crypto material.
    pub crypto_path: PathBuf,

    /// Directory holding the user's private key (one file expected).
    pub key_directory_path: PathBuf,

    /// User certificate (PEM).
    pub cert_path: PathBuf,

    /// CA certificate used to verify the peer's TLS certificate (PEM).
    pub tls_cert_path: PathBuf,

    /// Gateway peer address as `host:port`.
    pub peer_endpoint: String,

    /// TLS server name expected in the peer certificate.
    pub peer_host_alias: String,

    /// Per-call-kind timeouts.
    pub timeouts: TimeoutConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ClientConfig {
    /// Log the resolved parameters the run will use.
    pub fn log_parameters(&self) {
        tracing::info!(
            channel_name = %self.channel_name,
            chaincode_name = %self.chaincode_name,
            msp_id = %self.msp_id,
            crypto_path = %self.crypto_path.display(),
            key_directory_path = %self.key_directory_path.display(),
            cert_path = %self.cert_path.display(),
            tls_cert_path = %self.tls_cert_path.display(),
            peer_endpoint = %self.peer_endpoint,
            peer_host_alias = %self.peer_host_alias,
            "Input parameters"
        );
    }
}

/// Timeouts applied per gateway call kind, in seconds.
///
/// Each call computes its own deadline from these at the moment it is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Establishing the TLS connection to the peer.
    pub connect_secs: u64,

    /// Read-only queries.
    pub evaluate_secs: u64,

    /// Endorsement collection.
    pub endorse_secs: u64,

    /// Submission to ordering.
    pub submit_secs: u64,

    /// Waiting for the commit status after submission.
    pub commit_status_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            evaluate_secs: 5,
            endorse_secs: 15,
            submit_secs: 5,
            commit_status_secs: 60,
        }
    }
}

/// Default crypto material root: the test network checked out two levels
/// above this crate.
pub fn default_crypto_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("test-network")
        .join("organizations")
        .join("peerOrganizations")
        .join("org1.example.com")
}

pub fn default_key_directory_path(crypto_path: &Path) -> PathBuf {
    crypto_path
        .join("users")
        .join(DEFAULT_USER)
        .join("msp")
        .join("keystore")
}

pub fn default_cert_path(crypto_path: &Path) -> PathBuf {
    crypto_path
        .join("users")
        .join(DEFAULT_USER)
        .join("msp")
        .join("signcerts")
        .join(format!("{DEFAULT_USER}-cert.pem"))
}

pub fn default_tls_cert_path(crypto_path: &Path) -> PathBuf {
    crypto_path
        .join("peers")
        .join(DEFAULT_PEER)
        .join("tls")
        .join("ca.crt")
}
