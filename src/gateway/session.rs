//! Gateway session scoped to one channel and one contract.
//!
//! # Submit flow
//! ```text
//! build proposal → sign → Endorse (endorse deadline)
//!     → sign prepared transaction → Submit (submit deadline)
//!     → sign status request → CommitStatus (commit status deadline)
//!     → VALID? return chaincode result : CommitFailed
//! ```
//!
//! # Evaluate flow
//! ```text
//! build proposal → sign → Evaluate (evaluate deadline) → response payload
//! ```

use async_trait::async_trait;
use prost::Message;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::gateway::client::GatewayRpc;
use crate::gateway::proposal::{build_proposal, new_nonce, transaction_result, Invocation};
use crate::gateway::protos::gateway::{
    CommitStatusRequest, CommitStatusResponse, EndorseRequest, EvaluateRequest,
    SignedCommitStatusRequest, SubmitRequest,
};
use crate::gateway::protos::peer::{SignedProposal, TX_VALIDATION_VALID};
use crate::gateway::timeouts::{CallKind, CallTimeouts};
use crate::gateway::types::{GatewayError, GatewayResult};
use crate::identity::{Identity, Signer};

/// Contract operations available once connected.
#[async_trait]
pub trait GatewaySession: Send + Sync {
    /// Submit a state-changing transaction and wait for it to commit.
    async fn submit_transaction(
        &self,
        function: &str,
        args: &[String],
    ) -> GatewayResult<Vec<u8>>;

    /// Evaluate a read-only transaction.
    async fn evaluate_transaction(
        &self,
        function: &str,
        args: &[String],
    ) -> GatewayResult<Vec<u8>>;

    /// Release the session. Must be called exactly once, before the transport is closed.
    fn close(self)
    where
        Self: Sized;
}

/// Session over any [`GatewayRpc`] implementation.
pub struct Gateway<R> {
    rpc: R,
    identity: Identity,
    creator: Vec<u8>,
    signer: Arc<dyn Signer>,
    channel_name: String,
    chaincode_name: String,
    timeouts: CallTimeouts,
}

impl<R: GatewayRpc> Gateway<R> {
    /// Compose a session from a connected client and the user's credentials.
    pub fn new(rpc: R, identity: Identity, signer: Arc<dyn Signer>, config: &ClientConfig) -> Self {
        let creator = identity.serialize();

        tracing::info!(
            channel = %config.channel_name,
            chaincode = %config.chaincode_name,
            msp_id = %identity.msp_id(),
            "Gateway session opened"
        );

        Self {
            rpc,
            identity,
            creator,
            signer,
            channel_name: config.channel_name.clone(),
            chaincode_name: config.chaincode_name.clone(),
            timeouts: CallTimeouts::from_config(&config.timeouts),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }

    pub fn chaincode_name(&self) -> &str {
        &self.chaincode_name
    }

    fn signed_proposal(
        &self,
        function: &str,
        args: &[String],
    ) -> GatewayResult<(String, SignedProposal)> {
        let invocation = Invocation {
            channel_name: &self.channel_name,
            chaincode_name: &self.chaincode_name,
            function,
            args,
        };
        let unsigned = build_proposal(&invocation, &self.creator, &new_nonce());
        let proposal_bytes = unsigned.proposal.encode_to_vec();
        let signature = self.signer.sign(&proposal_bytes)?;

        Ok((
            unsigned.tx_id,
            SignedProposal {
                proposal_bytes,
                signature,
            },
        ))
    }

    async fn commit_status(&self, tx_id: &str) -> GatewayResult<CommitStatusResponse> {
        let request = CommitStatusRequest {
            transaction_id: tx_id.to_string(),
            channel_id: self.channel_name.clone(),
            identity: self.creator.clone(),
        }
        .encode_to_vec();
        let signature = self.signer.sign(&request)?;

        self.rpc
            .commit_status(
                SignedCommitStatusRequest { request, signature },
                self.timeouts.options(CallKind::CommitStatus),
            )
            .await
    }
}

#[async_trait]
impl<R: GatewayRpc> GatewaySession for Gateway<R> {
    async fn submit_transaction(
        &self,
        function: &str,
        args: &[String],
    ) -> GatewayResult<Vec<u8>> {
        let (tx_id, proposal) = self.signed_proposal(function, args)?;
        tracing::debug!(tx_id = %tx_id, function, "Endorsing transaction");

        let endorsed = self
            .rpc
            .endorse(
                EndorseRequest {
                    transaction_id: tx_id.clone(),
                    channel_id: self.channel_name.clone(),
                    proposed_transaction: Some(proposal),
                    endorsing_organizations: Vec::new(),
                },
                self.timeouts.options(CallKind::Endorse),
            )
            .await?;

        let mut envelope = endorsed.prepared_transaction.ok_or(GatewayError::MalformedResponse(
            "endorse response has no prepared transaction",
        ))?;
        let result = transaction_result(&envelope)?;
        envelope.signature = self.signer.sign(&envelope.payload)?;

        tracing::debug!(tx_id = %tx_id, "Submitting transaction");
        self.rpc
            .submit(
                SubmitRequest {
                    transaction_id: tx_id.clone(),
                    channel_id: self.channel_name.clone(),
                    prepared_transaction: Some(envelope),
                },
                self.timeouts.options(CallKind::Submit),
            )
            .await?;

        let status = self.commit_status(&tx_id).await?;
        if status.result != TX_VALIDATION_VALID {
            return Err(GatewayError::CommitFailed {
                tx_id,
                code: status.result,
            });
        }

        tracing::info!(
            tx_id = %tx_id,
            block_number = status.block_number,
            function,
            "Transaction committed"
        );

        Ok(result)
    }

    async fn evaluate_transaction(
        &self,
        function: &str,
        args: &[String],
    ) -> GatewayResult<Vec<u8>> {
        let (tx_id, proposal) = self.signed_proposal(function, args)?;
        tracing::debug!(tx_id = %tx_id, function, "Evaluating transaction");

        let response = self
            .rpc
            .evaluate(
                EvaluateRequest {
                    transaction_id: tx_id,
                    channel_id: self.channel_name.clone(),
                    proposed_transaction: Some(proposal),
                    target_organizations: Vec::new(),
                },
                self.timeouts.options(CallKind::Evaluate),
            )
            .await?;

        let result = response.result.ok_or(GatewayError::MalformedResponse(
            "evaluate response has no result",
        ))?;
        if result.status >= 400 {
            return Err(GatewayError::Chaincode {
                status: result.status,
                message: result.message,
            });
        }

        Ok(result.payload)
    }

    fn close(self) {
        tracing::info!(
            channel = %self.channel_name,
            chaincode = %self.chaincode_name,
            "Gateway session closed"
        );
    }
}
