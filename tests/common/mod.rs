//! Shared fixtures for integration tests: on-disk crypto material and
//! in-memory stand-ins for the transport, session and gateway service.

#![allow(dead_code)]

use async_trait::async_trait;
use p256::pkcs8::{EncodePrivateKey, LineEnding};
use p256::SecretKey;
use prost::Message;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

use fabric_order_client::config::ClientConfig;
use fabric_order_client::gateway::protos::common::{Envelope, Payload};
use fabric_order_client::gateway::protos::gateway::{
    CommitStatusResponse, EndorseRequest, EndorseResponse, EvaluateRequest, EvaluateResponse,
    SignedCommitStatusRequest, SubmitRequest, SubmitResponse,
};
use fabric_order_client::gateway::protos::peer::{
    ChaincodeAction, ChaincodeActionPayload, ChaincodeEndorsedAction, ProposalResponsePayload,
    Response, Transaction, TransactionAction,
};
use fabric_order_client::gateway::{
    CallKind, CallOptions, GatewayError, GatewayResult, GatewayRpc, GatewaySession,
};
use fabric_order_client::net::TransportHandle;

pub const TEST_CERT: &str = "-----BEGIN CERTIFICATE-----\nAQIDBA==\n-----END CERTIFICATE-----\n";

pub fn test_secret_key() -> SecretKey {
    SecretKey::from_slice(&[0x2a; 32]).unwrap()
}

/// Crypto material laid out like the Fabric test network under a temp dir.
pub struct CryptoFixture {
    pub dir: TempDir,
    pub config: ClientConfig,
}

impl CryptoFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        let config = ClientConfig::from_lookup(|key| {
            (key == "CRYPTO_PATH").then(|| root.to_string_lossy().into_owned())
        });

        write_file(&config.cert_path, TEST_CERT.as_bytes());
        write_file(&config.tls_cert_path, TEST_CERT.as_bytes());
        let key_pem = test_secret_key().to_pkcs8_pem(LineEnding::LF).unwrap();
        write_file(&config.key_directory_path.join("priv_sk"), key_pem.as_bytes());

        Self { dir, config }
    }
}

fn write_file(path: &Path, contents: &[u8]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

/// Ordered record of what the fakes observed.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, event: &str) -> usize {
        self.events().iter().filter(|e| *e == event).count()
    }
}

pub struct RecordingTransport {
    pub log: EventLog,
}

impl TransportHandle for RecordingTransport {
    fn endpoint(&self) -> &str {
        "fake:7051"
    }

    fn close(self) {
        self.log.push("transport.close");
    }
}

/// Session returning canned results and logging every call as
/// `kind:function:arg,arg,...`.
pub struct ScriptedSession {
    pub log: EventLog,
    pub fail_submit: bool,
    pub evaluate_payload: Vec<u8>,
}

impl ScriptedSession {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            fail_submit: false,
            evaluate_payload: br#"{"id":5,"slotId":"slot1234"}"#.to_vec(),
        }
    }
}

#[async_trait]
impl GatewaySession for ScriptedSession {
    async fn submit_transaction(
        &self,
        function: &str,
        args: &[String],
    ) -> GatewayResult<Vec<u8>> {
        self.log.push(format!("submit:{function}:{}", args.join(",")));
        if self.fail_submit {
            return Err(GatewayError::Rpc {
                kind: CallKind::Endorse,
                code: tonic::Code::Aborted,
                message: "endorsement failed".to_string(),
            });
        }
        Ok(Vec::new())
    }

    async fn evaluate_transaction(
        &self,
        function: &str,
        args: &[String],
    ) -> GatewayResult<Vec<u8>> {
        self.log.push(format!("evaluate:{function}:{}", args.join(",")));
        Ok(self.evaluate_payload.clone())
    }

    fn close(self) {
        self.log.push("session.close");
    }
}

/// A request seen by [`FakeGatewayRpc`] and the time it had left.
#[derive(Debug, Clone)]
pub enum RpcCall {
    Endorse(EndorseRequest, Duration),
    Submit(SubmitRequest, Duration),
    CommitStatus(SignedCommitStatusRequest, Duration),
    Evaluate(EvaluateRequest, Duration),
}

/// In-memory gateway service.
#[derive(Clone)]
pub struct FakeGatewayRpc {
    pub calls: Arc<Mutex<Vec<RpcCall>>>,
    pub transaction_result: Vec<u8>,
    pub commit_code: i32,
    pub evaluate_response: Response,
    pub fail_endorse: bool,
}

impl Default for FakeGatewayRpc {
    fn default() -> Self {
        Self {
            calls: Arc::default(),
            transaction_result: Vec::new(),
            commit_code: 0,
            evaluate_response: Response {
                status: 200,
                message: String::new(),
                payload: br#"{"id":5}"#.to_vec(),
            },
            fail_endorse: false,
        }
    }
}

impl FakeGatewayRpc {
    pub fn calls(&self) -> Vec<RpcCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RpcCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GatewayRpc for FakeGatewayRpc {
    async fn endorse(
        &self,
        request: EndorseRequest,
        options: CallOptions,
    ) -> GatewayResult<EndorseResponse> {
        self.record(RpcCall::Endorse(request, options.remaining()));
        if self.fail_endorse {
            return Err(GatewayError::Rpc {
                kind: options.kind,
                code: tonic::Code::Aborted,
                message: "failed to collect enough endorsements".to_string(),
            });
        }
        Ok(EndorseResponse {
            prepared_transaction: Some(prepared_transaction(&self.transaction_result)),
        })
    }

    async fn submit(
        &self,
        request: SubmitRequest,
        options: CallOptions,
    ) -> GatewayResult<SubmitResponse> {
        self.record(RpcCall::Submit(request, options.remaining()));
        Ok(SubmitResponse {})
    }

    async fn commit_status(
        &self,
        request: SignedCommitStatusRequest,
        options: CallOptions,
    ) -> GatewayResult<CommitStatusResponse> {
        self.record(RpcCall::CommitStatus(request, options.remaining()));
        Ok(CommitStatusResponse {
            result: self.commit_code,
            block_number: 42,
        })
    }

    async fn evaluate(
        &self,
        request: EvaluateRequest,
        options: CallOptions,
    ) -> GatewayResult<EvaluateResponse> {
        self.record(RpcCall::Evaluate(request, options.remaining()));
        Ok(EvaluateResponse {
            result: Some(self.evaluate_response.clone()),
        })
    }
}

/// Unsigned envelope as the gateway returns it from Endorse, carrying
/// `result` as the chaincode response payload.
pub fn prepared_transaction(result: &[u8]) -> Envelope {
    let chaincode_action = ChaincodeAction {
        response: Some(Response {
            status: 200,
            message: String::new(),
            payload: result.to_vec(),
        }),
        ..Default::default()
    };
    let action_payload = ChaincodeActionPayload {
        action: Some(ChaincodeEndorsedAction {
            proposal_response_payload: ProposalResponsePayload {
                extension: chaincode_action.encode_to_vec(),
                ..Default::default()
            }
            .encode_to_vec(),
            endorsements: Vec::new(),
        }),
        ..Default::default()
    };
    let transaction = Transaction {
        actions: vec![TransactionAction {
            payload: action_payload.encode_to_vec(),
            ..Default::default()
        }],
    };
    Envelope {
        payload: Payload {
            header: None,
            data: transaction.encode_to_vec(),
        }
        .encode_to_vec(),
        signature: Vec::new(),
    }
}
