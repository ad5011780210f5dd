//! Transaction driver: one submit and one query against the order contract.
//!
//! Stateless; each call stands alone and failures are returned to the
//! caller unretried.

use serde_json::Value;

use crate::error::ClientResult;
use crate::gateway::GatewaySession;
use crate::orders::types::{DecodeError, Order};

/// Contract function registering (or updating) an order.
pub const REGISTER_ORDER: &str = "RegisterOrder";

/// Contract function returning an order by ID.
pub const READ_ORDER: &str = "ReadOrder";

/// Submit `RegisterOrder` for `order`, blocking until it commits.
pub async fn register_order<S: GatewaySession>(session: &S, order: &Order) -> ClientResult<()> {
    tracing::info!(order_id = order.id, "--> Submit Transaction: {REGISTER_ORDER}");

    session
        .submit_transaction(REGISTER_ORDER, &order.to_args())
        .await?;

    tracing::info!(order_id = order.id, "*** Transaction committed successfully");
    Ok(())
}

/// Evaluate `ReadOrder` for `order_id` and decode the JSON record it returns.
pub async fn read_order_by_id<S: GatewaySession>(
    session: &S,
    order_id: &str,
) -> ClientResult<Value> {
    tracing::info!(
        order_id,
        "--> Evaluate Transaction: {READ_ORDER}, function returns asset attributes"
    );

    let bytes = session
        .evaluate_transaction(READ_ORDER, &[order_id.to_string()])
        .await?;

    Ok(decode_record(bytes)?)
}

/// Decode a query payload: UTF-8 text holding one JSON value.
pub fn decode_record(bytes: Vec<u8>) -> Result<Value, DecodeError> {
    let text = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&text)?)
}
