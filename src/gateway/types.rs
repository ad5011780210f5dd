//! Gateway error definitions.

use thiserror::Error;

use crate::gateway::protos::peer::tx_validation_code_name;
use crate::gateway::timeouts::CallKind;
use crate::identity::IdentityError;

/// Errors that can occur while talking to the gateway peer.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The peer rejected or failed the call.
    #[error("{kind} call failed ({code}): {message}")]
    Rpc {
        kind: CallKind,
        code: tonic::Code,
        message: String,
    },

    /// The call did not complete before its deadline.
    #[error("{0} call exceeded its deadline")]
    Timeout(CallKind),

    /// The transaction was ordered but failed validation.
    #[error(
        "transaction {tx_id} failed to commit with status code {code} ({})",
        tx_validation_code_name(*.code)
    )]
    CommitFailed { tx_id: String, code: i32 },

    /// The chaincode returned an error response.
    #[error("chaincode returned status {status}: {message}")]
    Chaincode { status: i32, message: String },

    /// A response was missing a required part.
    #[error("malformed response: {0}")]
    MalformedResponse(&'static str),

    /// A protocol message could not be decoded.
    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: prost::DecodeError,
    },

    /// Signing a request failed.
    #[error(transparent)]
    Signing(#[from] IdentityError),
}

impl GatewayError {
    pub(crate) fn rpc(kind: CallKind, status: tonic::Status) -> Self {
        Self::Rpc {
            kind,
            code: status.code(),
            message: status.message().to_string(),
        }
    }

    pub(crate) fn decode(what: &'static str) -> impl FnOnce(prost::DecodeError) -> Self {
        move |source| Self::Decode { what, source }
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
