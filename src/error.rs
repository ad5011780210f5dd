//! Top-level error type.
//!
//! Every failure propagates here unhandled; `main` logs it and exits
//! non-zero.

use thiserror::Error;

use crate::config::ConfigError;
use crate::gateway::GatewayError;
use crate::identity::IdentityError;
use crate::net::TransportError;
use crate::orders::DecodeError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("credential error: {0}")]
    Identity(#[from] IdentityError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

pub type ClientResult<T> = Result<T, ClientError>;
