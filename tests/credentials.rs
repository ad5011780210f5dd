//! Credential and transport construction from on-disk material.

use p256::ecdsa::signature::Verifier;
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};

use fabric_order_client::identity::{load_identity, load_signer, Signer};
use fabric_order_client::lifecycle::{self, Command};
use fabric_order_client::net::{GrpcTransport, TransportError};
use fabric_order_client::ClientError;

mod common;

use common::{test_secret_key, CryptoFixture, TEST_CERT};

#[tokio::test]
async fn test_identity_and_signer_from_test_network_layout() {
    let fixture = CryptoFixture::new();

    let identity = load_identity(&fixture.config).await.unwrap();
    assert_eq!(identity.msp_id(), fixture.config.msp_id);
    assert_eq!(identity.credentials(), TEST_CERT.as_bytes());

    let signer = load_signer(&fixture.config).await.unwrap();
    let der = signer.sign(b"message").unwrap();
    let signature = Signature::from_der(&der).unwrap();
    let expected = VerifyingKey::from(&SigningKey::from(test_secret_key()));
    assert_eq!(signer.verifying_key(), &expected);
    assert!(expected.verify(b"message", &signature).is_ok());
}

#[tokio::test]
async fn test_msp_id_follows_configuration() {
    let mut fixture = CryptoFixture::new();
    fixture.config.msp_id = "Org2MSP".to_string();

    let identity = load_identity(&fixture.config).await.unwrap();
    assert_eq!(identity.msp_id(), "Org2MSP");
}

#[tokio::test]
async fn test_missing_tls_certificate_is_a_filesystem_error() {
    let fixture = CryptoFixture::new();
    std::fs::remove_file(&fixture.config.tls_cert_path).unwrap();

    let result = GrpcTransport::connect(&fixture.config).await;
    assert!(matches!(result, Err(TransportError::Io { .. })));

    let result = lifecycle::run(&fixture.config, Command::Demo).await;
    assert!(matches!(
        result,
        Err(ClientError::Transport(TransportError::Io { .. }))
    ));
}

#[tokio::test]
async fn test_missing_certificate_file() {
    let fixture = CryptoFixture::new();
    std::fs::remove_file(&fixture.config.cert_path).unwrap();

    assert!(load_identity(&fixture.config).await.is_err());
}

#[tokio::test]
async fn test_empty_key_directory() {
    let fixture = CryptoFixture::new();
    std::fs::remove_file(fixture.config.key_directory_path.join("priv_sk")).unwrap();

    let err = load_signer(&fixture.config).await.unwrap_err();
    assert!(err.to_string().contains("no private key file"));
}
