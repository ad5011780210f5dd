//! Fabric protocol messages used by the gateway client.
//!
//! Hand-written `prost` definitions mirroring the subset of the Fabric
//! protobuf schema the client reads or writes. Field tags match the
//! upstream `.proto` files so the messages are wire compatible.

/// `common` package: envelopes and headers.
pub mod common {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Envelope {
        #[prost(bytes = "vec", tag = "1")]
        pub payload: Vec<u8>,
        #[prost(bytes = "vec", tag = "2")]
        pub signature: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Payload {
        #[prost(message, optional, tag = "1")]
        pub header: Option<Header>,
        #[prost(bytes = "vec", tag = "2")]
        pub data: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Header {
        #[prost(bytes = "vec", tag = "1")]
        pub channel_header: Vec<u8>,
        #[prost(bytes = "vec", tag = "2")]
        pub signature_header: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ChannelHeader {
        #[prost(int32, tag = "1")]
        pub r#type: i32,
        #[prost(int32, tag = "2")]
        pub version: i32,
        #[prost(message, optional, tag = "3")]
        pub timestamp: Option<::prost_types::Timestamp>,
        #[prost(string, tag = "4")]
        pub channel_id: String,
        #[prost(string, tag = "5")]
        pub tx_id: String,
        #[prost(uint64, tag = "6")]
        pub epoch: u64,
        #[prost(bytes = "vec", tag = "7")]
        pub extension: Vec<u8>,
        #[prost(bytes = "vec", tag = "8")]
        pub tls_cert_hash: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct SignatureHeader {
        #[prost(bytes = "vec", tag = "1")]
        pub creator: Vec<u8>,
        #[prost(bytes = "vec", tag = "2")]
        pub nonce: Vec<u8>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum HeaderType {
        Message = 0,
        Config = 1,
        ConfigUpdate = 2,
        EndorserTransaction = 3,
    }
}

/// `msp` package.
pub mod msp {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct SerializedIdentity {
        #[prost(string, tag = "1")]
        pub mspid: String,
        #[prost(bytes = "vec", tag = "2")]
        pub id_bytes: Vec<u8>,
    }
}

/// `protos` package: proposals, chaincode specs and transactions.
pub mod peer {
    use std::collections::HashMap;

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct SignedProposal {
        #[prost(bytes = "vec", tag = "1")]
        pub proposal_bytes: Vec<u8>,
        #[prost(bytes = "vec", tag = "2")]
        pub signature: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Proposal {
        #[prost(bytes = "vec", tag = "1")]
        pub header: Vec<u8>,
        #[prost(bytes = "vec", tag = "2")]
        pub payload: Vec<u8>,
        #[prost(bytes = "vec", tag = "3")]
        pub extension: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ChaincodeHeaderExtension {
        #[prost(message, optional, tag = "2")]
        pub chaincode_id: Option<ChaincodeId>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ChaincodeProposalPayload {
        #[prost(bytes = "vec", tag = "1")]
        pub input: Vec<u8>,
        #[prost(map = "string, bytes", tag = "2")]
        pub transient_map: HashMap<String, Vec<u8>>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ChaincodeInvocationSpec {
        #[prost(message, optional, tag = "1")]
        pub chaincode_spec: Option<ChaincodeSpec>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ChaincodeSpec {
        /// Chaincode language; 0 (`UNDEFINED`) lets the peer decide.
        #[prost(int32, tag = "1")]
        pub r#type: i32,
        #[prost(message, optional, tag = "2")]
        pub chaincode_id: Option<ChaincodeId>,
        #[prost(message, optional, tag = "3")]
        pub input: Option<ChaincodeInput>,
        #[prost(int32, tag = "4")]
        pub timeout: i32,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ChaincodeId {
        #[prost(string, tag = "1")]
        pub path: String,
        #[prost(string, tag = "2")]
        pub name: String,
        #[prost(string, tag = "3")]
        pub version: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ChaincodeInput {
        #[prost(bytes = "vec", repeated, tag = "1")]
        pub args: Vec<Vec<u8>>,
        #[prost(map = "string, bytes", tag = "2")]
        pub decorations: HashMap<String, Vec<u8>>,
        #[prost(bool, tag = "3")]
        pub is_init: bool,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Response {
        #[prost(int32, tag = "1")]
        pub status: i32,
        #[prost(string, tag = "2")]
        pub message: String,
        #[prost(bytes = "vec", tag = "3")]
        pub payload: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Transaction {
        #[prost(message, repeated, tag = "1")]
        pub actions: Vec<TransactionAction>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct TransactionAction {
        #[prost(bytes = "vec", tag = "1")]
        pub header: Vec<u8>,
        #[prost(bytes = "vec", tag = "2")]
        pub payload: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ChaincodeActionPayload {
        #[prost(bytes = "vec", tag = "1")]
        pub chaincode_proposal_payload: Vec<u8>,
        #[prost(message, optional, tag = "2")]
        pub action: Option<ChaincodeEndorsedAction>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ChaincodeEndorsedAction {
        #[prost(bytes = "vec", tag = "1")]
        pub proposal_response_payload: Vec<u8>,
        #[prost(message, repeated, tag = "2")]
        pub endorsements: Vec<Endorsement>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Endorsement {
        #[prost(bytes = "vec", tag = "1")]
        pub endorser: Vec<u8>,
        #[prost(bytes = "vec", tag = "2")]
        pub signature: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ProposalResponsePayload {
        #[prost(bytes = "vec", tag = "1")]
        pub proposal_hash: Vec<u8>,
        #[prost(bytes = "vec", tag = "2")]
        pub extension: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ChaincodeAction {
        #[prost(bytes = "vec", tag = "1")]
        pub results: Vec<u8>,
        #[prost(bytes = "vec", tag = "2")]
        pub events: Vec<u8>,
        #[prost(message, optional, tag = "3")]
        pub response: Option<Response>,
        #[prost(message, optional, tag = "4")]
        pub chaincode_id: Option<ChaincodeId>,
    }

    /// `TxValidationCode` of a committed transaction.
    pub const TX_VALIDATION_VALID: i32 = 0;

    /// Name of a `TxValidationCode`, for error messages.
    pub fn tx_validation_code_name(code: i32) -> &'static str {
        match code {
            0 => "VALID",
            1 => "NIL_ENVELOPE",
            2 => "BAD_PAYLOAD",
            3 => "BAD_COMMON_HEADER",
            4 => "BAD_CREATOR_SIGNATURE",
            5 => "INVALID_ENDORSER_TRANSACTION",
            6 => "INVALID_CONFIG_TRANSACTION",
            7 => "UNSUPPORTED_TX_PAYLOAD",
            8 => "BAD_PROPOSAL_TXID",
            9 => "DUPLICATE_TXID",
            10 => "ENDORSEMENT_POLICY_FAILURE",
            11 => "MVCC_READ_CONFLICT",
            12 => "PHANTOM_READ_CONFLICT",
            13 => "UNKNOWN_TX_TYPE",
            14 => "TARGET_CHAIN_NOT_FOUND",
            15 => "MARSHAL_TX_ERROR",
            16 => "NIL_TXACTION",
            17 => "EXPIRED_CHAINCODE",
            18 => "CHAINCODE_VERSION_CONFLICT",
            19 => "BAD_HEADER_EXTENSION",
            20 => "BAD_CHANNEL_HEADER",
            21 => "BAD_RESPONSE_PAYLOAD",
            22 => "BAD_RWSET",
            23 => "ILLEGAL_WRITESET",
            24 => "INVALID_WRITESET",
            25 => "INVALID_CHAINCODE",
            254 => "NOT_VALIDATED",
            255 => "INVALID_OTHER_REASON",
            _ => "UNKNOWN",
        }
    }
}

/// `gateway` package: requests and responses of the `gateway.Gateway` service.
pub mod gateway {
    use super::common::Envelope;
    use super::peer::{Response, SignedProposal};

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct EndorseRequest {
        #[prost(string, tag = "1")]
        pub transaction_id: String,
        #[prost(string, tag = "2")]
        pub channel_id: String,
        #[prost(message, optional, tag = "3")]
        pub proposed_transaction: Option<SignedProposal>,
        #[prost(string, repeated, tag = "4")]
        pub endorsing_organizations: Vec<String>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct EndorseResponse {
        #[prost(message, optional, tag = "1")]
        pub prepared_transaction: Option<Envelope>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct SubmitRequest {
        #[prost(string, tag = "1")]
        pub transaction_id: String,
        #[prost(string, tag = "2")]
        pub channel_id: String,
        #[prost(message, optional, tag = "3")]
        pub prepared_transaction: Option<Envelope>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct SubmitResponse {}

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct SignedCommitStatusRequest {
        #[prost(bytes = "vec", tag = "1")]
        pub request: Vec<u8>,
        #[prost(bytes = "vec", tag = "2")]
        pub signature: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct CommitStatusRequest {
        #[prost(string, tag = "1")]
        pub transaction_id: String,
        #[prost(string, tag = "2")]
        pub channel_id: String,
        #[prost(bytes = "vec", tag = "3")]
        pub identity: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct CommitStatusResponse {
        #[prost(int32, tag = "1")]
        pub result: i32,
        #[prost(uint64, tag = "2")]
        pub block_number: u64,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct EvaluateRequest {
        #[prost(string, tag = "1")]
        pub transaction_id: String,
        #[prost(string, tag = "2")]
        pub channel_id: String,
        #[prost(message, optional, tag = "3")]
        pub proposed_transaction: Option<SignedProposal>,
        #[prost(string, repeated, tag = "4")]
        pub target_organizations: Vec<String>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct EvaluateResponse {
        #[prost(message, optional, tag = "1")]
        pub result: Option<Response>,
    }
}
