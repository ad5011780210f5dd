//! Secure channel to the gateway peer.
//!
//! # Responsibilities
//! - Build the `https://` endpoint for the configured peer
//! - Apply TLS (root CA + pinned server name) and the connect timeout
//! - Hand out clones of the channel and close it at shutdown

use std::time::Duration;
use tonic::transport::{Channel, Endpoint};

use crate::config::ClientConfig;
use crate::net::tls::{client_tls_config, load_root_certificate};
use crate::net::types::TransportError;

/// A long-lived connection to the network.
///
/// Opened once, shared by every session, closed exactly once.
pub trait TransportHandle: Send + Sync {
    /// Address the transport is connected to.
    fn endpoint(&self) -> &str;

    /// Release the connection.
    fn close(self)
    where
        Self: Sized;
}

/// TLS gRPC channel to a gateway peer.
#[derive(Debug)]
pub struct GrpcTransport {
    endpoint: String,
    channel: Channel,
}

impl GrpcTransport {
    /// Read the TLS root certificate and connect to the configured peer.
    ///
    /// No channel is created if the certificate cannot be loaded.
    pub async fn connect(config: &ClientConfig) -> Result<Self, TransportError> {
        let ca = load_root_certificate(&config.tls_cert_path).await?;
        let tls = client_tls_config(ca, &config.peer_host_alias);

        let endpoint = config.peer_endpoint.clone();
        let uri = format!("https://{endpoint}");
        let connect_err = |source| TransportError::Connect {
            endpoint: endpoint.clone(),
            source,
        };

        let channel = Endpoint::from_shared(uri)
            .map_err(|e| TransportError::InvalidEndpoint {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?
            .tls_config(tls)
            .map_err(connect_err)?
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .connect()
            .await
            .map_err(connect_err)?;

        tracing::info!(
            peer_endpoint = %endpoint,
            peer_host_alias = %config.peer_host_alias,
            "Connected to gateway peer"
        );

        Ok(Self { endpoint, channel })
    }

    /// A handle on the underlying channel; clones share one connection.
    pub fn channel(&self) -> Channel {
        self.channel.clone()
    }
}

impl TransportHandle for GrpcTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn close(self) {
        tracing::info!(peer_endpoint = %self.endpoint, "Transport closed");
        drop(self.channel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_tls_certificate_fails_before_connecting() {
        let mut config = ClientConfig::default();
        config.tls_cert_path = "/definitely/not/here/ca.crt".into();

        let result = GrpcTransport::connect(&config).await;
        assert!(matches!(result, Err(TransportError::Io { .. })));
    }
}
