//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the transport and load credentials
//! - Compose the gateway session
//! - Run the requested command inside a scope that always releases both

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::gateway::{Gateway, GatewaySession, GrpcGatewayClient};
use crate::identity::{load_identity, load_signer};
use crate::lifecycle::shutdown::release;
use crate::net::{GrpcTransport, TransportHandle};
use crate::orders::{read_order_by_id, register_order, DecodeError, Order};

/// What a run does once connected.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Register the sample order, then read it back.
    Demo,
    /// Register the given order.
    Register(Order),
    /// Read the order with the given ID.
    Read { id: String },
}

/// Connect with `config` and run `command`.
pub async fn run(config: &ClientConfig, command: Command) -> ClientResult<()> {
    config.log_parameters();

    let transport = GrpcTransport::connect(config).await?;

    let credentials = tokio::try_join!(load_identity(config), load_signer(config));
    let (identity, signer) = match credentials {
        Ok(credentials) => credentials,
        Err(e) => {
            transport.close();
            return Err(e.into());
        }
    };

    let rpc = GrpcGatewayClient::new(transport.channel());
    let session = Gateway::new(rpc, identity, Arc::new(signer), config);

    execute(transport, session, &command).await
}

/// Run `command` on `session`, then release the session and the transport
/// whether or not the command succeeded.
pub async fn execute<T, S>(transport: T, session: S, command: &Command) -> ClientResult<()>
where
    T: TransportHandle,
    S: GatewaySession,
{
    let outcome = dispatch(&session, command).await;
    release(session, transport);
    outcome
}

async fn dispatch<S: GatewaySession>(session: &S, command: &Command) -> ClientResult<()> {
    match command {
        Command::Demo => {
            let order = Order::sample();
            register_order(session, &order).await?;
            let record = read_order_by_id(session, &order.id.to_string()).await?;
            print_record(&record)
        }
        Command::Register(order) => register_order(session, order).await,
        Command::Read { id } => {
            let record = read_order_by_id(session, id).await?;
            print_record(&record)
        }
    }
}

fn print_record(record: &serde_json::Value) -> ClientResult<()> {
    let pretty = serde_json::to_string_pretty(record).map_err(DecodeError::Json)?;
    println!("*** Result: {pretty}");
    Ok(())
}
