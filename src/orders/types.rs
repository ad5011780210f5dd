//! Order record and its enumerated codes.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Lifecycle state of a bid, as numbered by the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "WholeNumber")]
pub enum BidStatus {
    Created = 0,
    Accepted = 1,
    Rejected = 2,
    Executed = 3,
    Terminated = 4,
}

/// Side of the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "WholeNumber")]
pub enum OrderAction {
    Buy = 0,
    Sell = 1,
}

/// A JSON number with no fractional part, written either `5` or `5.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "serde_json::Number")]
pub struct WholeNumber(pub i64);

impl TryFrom<serde_json::Number> for WholeNumber {
    type Error = String;

    fn try_from(number: serde_json::Number) -> Result<Self, Self::Error> {
        if let Some(value) = number.as_i64() {
            return Ok(Self(value));
        }
        match number.as_f64() {
            Some(value)
                if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 =>
            {
                Ok(Self(value as i64))
            }
            _ => Err(format!("expected a whole number, got {number}")),
        }
    }
}

fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    WholeNumber::deserialize(deserializer).map(|number| number.0)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} code {code}")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: i64,
}

impl From<BidStatus> for i64 {
    fn from(status: BidStatus) -> Self {
        status as i64
    }
}

impl TryFrom<i64> for BidStatus {
    type Error = UnknownCode;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Created),
            1 => Ok(Self::Accepted),
            2 => Ok(Self::Rejected),
            3 => Ok(Self::Executed),
            4 => Ok(Self::Terminated),
            code => Err(UnknownCode { kind: "bid status", code }),
        }
    }
}

impl TryFrom<WholeNumber> for BidStatus {
    type Error = UnknownCode;

    fn try_from(code: WholeNumber) -> Result<Self, Self::Error> {
        Self::try_from(code.0)
    }
}

impl From<OrderAction> for i64 {
    fn from(action: OrderAction) -> Self {
        action as i64
    }
}

impl TryFrom<i64> for OrderAction {
    type Error = UnknownCode;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Buy),
            1 => Ok(Self::Sell),
            code => Err(UnknownCode { kind: "action", code }),
        }
    }
}

impl TryFrom<WholeNumber> for OrderAction {
    type Error = UnknownCode;

    fn try_from(code: WholeNumber) -> Result<Self, Self::Error> {
        Self::try_from(code.0)
    }
}

impl fmt::Display for BidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", i64::from(*self))
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", i64::from(*self))
    }
}

/// An energy buy or sell order.
///
/// Integer fields accept any JSON number without a fractional part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(deserialize_with = "whole_number")]
    pub bid_match_id: i64,
    pub bid_status: BidStatus,
    #[serde(deserialize_with = "whole_number")]
    pub id: i64,
    pub on_market_price: f64,
    pub order_cost: f64,
    #[serde(deserialize_with = "whole_number")]
    pub payment_id: i64,
    pub slot_id: String,
    #[serde(deserialize_with = "whole_number")]
    pub slot_exec_date: i64,
    #[serde(deserialize_with = "whole_number")]
    pub total_quantity: i64,
    pub unit_cost: f64,
    pub action: OrderAction,
    #[serde(deserialize_with = "whole_number")]
    pub user_id: i64,
}

impl Order {
    /// Number of positional arguments `RegisterOrder` expects.
    pub const ARG_COUNT: usize = 12;

    /// The demonstration order registered by the default run.
    pub fn sample() -> Self {
        Self {
            bid_match_id: 1,
            bid_status: BidStatus::Created,
            id: 5,
            on_market_price: 0.0,
            order_cost: 200.0,
            payment_id: 5,
            slot_id: "slot1234".to_string(),
            slot_exec_date: 50,
            total_quantity: 300,
            unit_cost: 3.5,
            action: OrderAction::Buy,
            user_id: 6,
        }
    }

    /// Arguments in the order the contract reads them.
    pub fn to_args(&self) -> Vec<String> {
        vec![
            self.bid_match_id.to_string(),
            self.bid_status.to_string(),
            self.id.to_string(),
            self.on_market_price.to_string(),
            self.order_cost.to_string(),
            self.payment_id.to_string(),
            self.slot_id.clone(),
            self.total_quantity.to_string(),
            self.unit_cost.to_string(),
            self.user_id.to_string(),
            self.slot_exec_date.to_string(),
            self.action.to_string(),
        ]
    }
}

/// Errors decoding a query result.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("result is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("result is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
