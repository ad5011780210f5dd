//! Proposal construction and transaction result extraction.
//!
//! # Responsibilities
//! - Generate the nonce and derive the transaction ID from it
//! - Assemble the channel header, signature header and chaincode invocation
//! - Pull the chaincode response out of an endorsed (prepared) transaction

use prost::Message;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::time::SystemTime;

use crate::gateway::protos::common::{
    ChannelHeader, Envelope, Header, HeaderType, Payload, SignatureHeader,
};
use crate::gateway::protos::peer::{
    ChaincodeAction, ChaincodeActionPayload, ChaincodeHeaderExtension, ChaincodeId,
    ChaincodeInput, ChaincodeInvocationSpec, ChaincodeProposalPayload, ChaincodeSpec, Proposal,
    ProposalResponsePayload, Transaction,
};
use crate::gateway::types::{GatewayError, GatewayResult};

/// Length of the random nonce in each signature header.
pub const NONCE_LENGTH: usize = 24;

/// What to invoke, and on which channel and contract.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    pub channel_name: &'a str,
    pub chaincode_name: &'a str,
    pub function: &'a str,
    pub args: &'a [String],
}

/// An unsigned proposal together with its transaction ID.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsignedProposal {
    pub tx_id: String,
    pub proposal: Proposal,
}

pub fn new_nonce() -> [u8; NONCE_LENGTH] {
    let mut nonce = [0u8; NONCE_LENGTH];
    rand::thread_rng().fill_bytes(&mut nonce);
    nonce
}

/// Transaction ID: hex-encoded SHA-256 of nonce followed by creator.
pub fn transaction_id(nonce: &[u8], creator: &[u8]) -> String {
    let digest = Sha256::new()
        .chain_update(nonce)
        .chain_update(creator)
        .finalize();
    hex::encode(digest)
}

/// Build a proposal for `invocation` signed (later) by `creator`.
pub fn build_proposal(
    invocation: &Invocation<'_>,
    creator: &[u8],
    nonce: &[u8],
) -> UnsignedProposal {
    let tx_id = transaction_id(nonce, creator);
    let chaincode_id = ChaincodeId {
        name: invocation.chaincode_name.to_string(),
        ..Default::default()
    };

    let channel_header = ChannelHeader {
        r#type: HeaderType::EndorserTransaction as i32,
        timestamp: Some(prost_types::Timestamp::from(SystemTime::now())),
        channel_id: invocation.channel_name.to_string(),
        tx_id: tx_id.clone(),
        extension: ChaincodeHeaderExtension {
            chaincode_id: Some(chaincode_id.clone()),
        }
        .encode_to_vec(),
        ..Default::default()
    };

    let signature_header = SignatureHeader {
        creator: creator.to_vec(),
        nonce: nonce.to_vec(),
    };

    let header = Header {
        channel_header: channel_header.encode_to_vec(),
        signature_header: signature_header.encode_to_vec(),
    };

    let mut args = Vec::with_capacity(invocation.args.len() + 1);
    args.push(invocation.function.as_bytes().to_vec());
    args.extend(invocation.args.iter().map(|arg| arg.as_bytes().to_vec()));

    let invocation_spec = ChaincodeInvocationSpec {
        chaincode_spec: Some(ChaincodeSpec {
            chaincode_id: Some(chaincode_id),
            input: Some(ChaincodeInput {
                args,
                ..Default::default()
            }),
            ..Default::default()
        }),
    };

    let payload = ChaincodeProposalPayload {
        input: invocation_spec.encode_to_vec(),
        ..Default::default()
    };

    UnsignedProposal {
        tx_id,
        proposal: Proposal {
            header: header.encode_to_vec(),
            payload: payload.encode_to_vec(),
            ..Default::default()
        },
    }
}

/// Chaincode response payload carried inside a prepared transaction.
pub fn transaction_result(envelope: &Envelope) -> GatewayResult<Vec<u8>> {
    let payload = Payload::decode(envelope.payload.as_slice())
        .map_err(GatewayError::decode("transaction payload"))?;
    let transaction = Transaction::decode(payload.data.as_slice())
        .map_err(GatewayError::decode("transaction"))?;
    let action = transaction
        .actions
        .first()
        .ok_or(GatewayError::MalformedResponse("transaction has no actions"))?;
    let action_payload = ChaincodeActionPayload::decode(action.payload.as_slice())
        .map_err(GatewayError::decode("chaincode action payload"))?;
    let endorsed = action_payload.action.ok_or(GatewayError::MalformedResponse(
        "transaction action has no endorsed action",
    ))?;
    let response_payload =
        ProposalResponsePayload::decode(endorsed.proposal_response_payload.as_slice())
            .map_err(GatewayError::decode("proposal response payload"))?;
    let chaincode_action = ChaincodeAction::decode(response_payload.extension.as_slice())
        .map_err(GatewayError::decode("chaincode action"))?;

    Ok(chaincode_action
        .response
        .map(|response| response.payload)
        .unwrap_or_default())
}
