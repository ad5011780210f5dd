//! gRPC client for the `gateway.Gateway` service.
//!
//! # Responsibilities
//! - Issue the four unary gateway calls over a shared channel
//! - Bound every call by its deadline, locally and on the wire
//! - Map gRPC failures to [`GatewayError`]

use async_trait::async_trait;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;

use crate::gateway::protos::gateway::{
    CommitStatusResponse, EndorseRequest, EndorseResponse, EvaluateRequest, EvaluateResponse,
    SignedCommitStatusRequest, SubmitRequest, SubmitResponse,
};
use crate::gateway::timeouts::CallOptions;
use crate::gateway::types::{GatewayError, GatewayResult};

const ENDORSE_PATH: &str = "/gateway.Gateway/Endorse";
const SUBMIT_PATH: &str = "/gateway.Gateway/Submit";
const COMMIT_STATUS_PATH: &str = "/gateway.Gateway/CommitStatus";
const EVALUATE_PATH: &str = "/gateway.Gateway/Evaluate";

/// The gateway service as seen by a session.
#[async_trait]
pub trait GatewayRpc: Send + Sync {
    async fn endorse(
        &self,
        request: EndorseRequest,
        options: CallOptions,
    ) -> GatewayResult<EndorseResponse>;

    async fn submit(
        &self,
        request: SubmitRequest,
        options: CallOptions,
    ) -> GatewayResult<SubmitResponse>;

    async fn commit_status(
        &self,
        request: SignedCommitStatusRequest,
        options: CallOptions,
    ) -> GatewayResult<CommitStatusResponse>;

    async fn evaluate(
        &self,
        request: EvaluateRequest,
        options: CallOptions,
    ) -> GatewayResult<EvaluateResponse>;
}

/// [`GatewayRpc`] over a tonic channel.
#[derive(Debug, Clone)]
pub struct GrpcGatewayClient {
    channel: Channel,
}

impl GrpcGatewayClient {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }

    async fn unary<Req, Resp>(
        &self,
        path: &'static str,
        request: Req,
        options: CallOptions,
    ) -> GatewayResult<Resp>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let kind = options.kind;
        let mut grpc = tonic::client::Grpc::new(self.channel.clone());

        let mut request = tonic::Request::new(request);
        request.set_timeout(options.remaining());

        options
            .run(async move {
                grpc.ready().await.map_err(|e| {
                    GatewayError::rpc(
                        kind,
                        tonic::Status::unavailable(format!("service was not ready: {e}")),
                    )
                })?;

                let codec = ProstCodec::<Req, Resp>::default();
                let response = grpc
                    .unary(request, PathAndQuery::from_static(path), codec)
                    .await
                    .map_err(|status| GatewayError::rpc(kind, status))?;

                Ok(response.into_inner())
            })
            .await
    }
}

#[async_trait]
impl GatewayRpc for GrpcGatewayClient {
    async fn endorse(
        &self,
        request: EndorseRequest,
        options: CallOptions,
    ) -> GatewayResult<EndorseResponse> {
        self.unary(ENDORSE_PATH, request, options).await
    }

    async fn submit(
        &self,
        request: SubmitRequest,
        options: CallOptions,
    ) -> GatewayResult<SubmitResponse> {
        self.unary(SUBMIT_PATH, request, options).await
    }

    async fn commit_status(
        &self,
        request: SignedCommitStatusRequest,
        options: CallOptions,
    ) -> GatewayResult<CommitStatusResponse> {
        self.unary(COMMIT_STATUS_PATH, request, options).await
    }

    async fn evaluate(
        &self,
        request: EvaluateRequest,
        options: CallOptions,
    ) -> GatewayResult<EvaluateResponse> {
        self.unary(EVALUATE_PATH, request, options).await
    }
}
