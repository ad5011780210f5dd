//! Fabric order client.
//!
//! Registers an energy-trading order on a Hyperledger Fabric network through
//! a gateway peer and reads it back.
//!
//! # Architecture Overview
//!
//! ```text
//!   environment / .env
//!          │
//!          ▼
//!   ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//!   │    config    │────▶│   identity   │────▶│              │
//!   │ ClientConfig │     │ cert + key   │     │   gateway    │     ┌──────────────┐
//!   │              │────▶│     net      │────▶│   session    │────▶│    orders    │
//!   └──────────────┘     │ TLS channel  │     │              │     │ Register/Read│
//!                        └──────────────┘     └──────┬───────┘     └──────────────┘
//!                                                    │ gRPC (Endorse, Submit,
//!                                                    ▼ CommitStatus, Evaluate)
//!                                             ┌──────────────┐
//!                                             │ gateway peer │
//!                                             └──────────────┘
//! ```

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use fabric_order_client::config::load_config;
use fabric_order_client::lifecycle::{self, Command};
use fabric_order_client::observability::logging::init_logging;
use fabric_order_client::orders::DecodeError;
use fabric_order_client::{ClientResult, Order};

#[derive(Parser)]
#[command(name = "fabric-order-client")]
#[command(about = "Register and query energy-trading orders through a Fabric gateway peer")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register the sample order and read it back (default)
    Demo,
    /// Submit a RegisterOrder transaction
    Register {
        /// Order as JSON with camelCase keys, e.g. '{"bidMatchId":1,"bidStatus":0,"id":5,...}'.
        /// Integer fields take whole numbers, written 5 or 5.0
        #[arg(long)]
        order: String,
    },
    /// Evaluate ReadOrder for an order ID
    Read {
        #[arg(long)]
        id: i64,
    },
}

impl Commands {
    fn into_command(self) -> ClientResult<Command> {
        Ok(match self {
            Commands::Demo => Command::Demo,
            Commands::Register { order } => {
                let order: Order = serde_json::from_str(&order).map_err(DecodeError::Json)?;
                Command::Register(order)
            }
            Commands::Read { id } => Command::Read { id: id.to_string() },
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "******** FAILED to run the application");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let command = cli.command.unwrap_or(Commands::Demo).into_command()?;
    let config = load_config()?;
    lifecycle::run(&config, command).await
}
