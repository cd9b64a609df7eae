//! Refunds (`/tpc/transaction/refund`).

use crate::client::{Service, TapPayClient};
use crate::decode::null_as_default;
use crate::errors::Result;
use crate::marshal::MarshalMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters of a refund request.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RefundParams {
    /// TapPay identifier of the transaction to refund
    pub rec_trade_id: String,

    /// Refund identifier chosen by the merchant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_refund_id: Option<String>,

    /// Amount to refund; the whole transaction is refunded when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,

    /// Extra data forwarded as-is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<Value>,
}

impl RefundParams {
    /// Creates a full refund of `rec_trade_id`.
    pub fn new(rec_trade_id: impl Into<String>) -> Self {
        Self {
            rec_trade_id: rec_trade_id.into(),
            ..Default::default()
        }
    }

    /// Limits the refund to `amount`.
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount.to_string());
        self
    }
}

impl MarshalMap for RefundParams {}

/// Response of a refund request.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RefundResponse {
    /// TapPay status code, 0 on success
    #[serde(deserialize_with = "null_as_default")]
    pub status: i32,
    /// Status message
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
    /// Refund identifier
    #[serde(deserialize_with = "null_as_default")]
    pub refund_id: String,
    /// Amount refunded
    #[serde(deserialize_with = "null_as_default")]
    pub refund_amount: i64,
    /// Whether the original transaction had been captured
    #[serde(deserialize_with = "null_as_default")]
    pub is_captured: bool,
    /// Bank result code
    #[serde(deserialize_with = "null_as_default")]
    pub bank_result_code: String,
    /// Bank result message
    #[serde(deserialize_with = "null_as_default")]
    pub bank_result_msg: String,
    /// Currency code
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
}

impl RefundResponse {
    /// Returns `true` when TapPay reported success.
    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

impl TapPayClient {
    /// Refunds a transaction, fully or partially.
    ///
    /// An unknown `rec_trade_id` is reported by TapPay through a non-zero
    /// [`RefundResponse::status`], not as an error.
    pub async fn refund(&self, params: &RefundParams) -> Result<RefundResponse> {
        self.call(Service::Refund, params).await
    }
}
