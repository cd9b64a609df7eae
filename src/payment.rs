//! Pay-by-prime charges (`/tpc/payment/pay-by-prime`).
//!
//! A prime is the one-time token the TapPay frontend SDK returns in place of
//! raw card data. The backend exchanges it for a charge through
//! [`TapPayClient::pay_by_prime`]. Nothing is validated locally: a malformed
//! request is rejected by TapPay through a non-zero `status`.

use crate::client::{Service, TapPayClient};
use crate::decode::null_as_default;
use crate::errors::Result;
use crate::marshal::MarshalMap;
use crate::record::{
    RecordCardInfo, RecordInstalmentInfo, RecordMerchandiseDetails, RecordMerchantReferenceInfo,
    RecordRedeemInfo,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cardholder of a pay-by-prime request.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentParamsCardholder {
    /// Phone number, e.g. "+886923456789" or "0912345678"
    pub phone_number: String,

    /// Full name
    pub name: String,

    /// Email address
    pub email: String,

    /// Postal code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,

    /// Postal address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// National identity number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,

    /// Merchant-side member identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
}

impl PaymentParamsCardholder {
    /// Creates a cardholder with the three required fields.
    pub fn new(
        phone_number: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            phone_number: phone_number.into(),
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }
}

/// Redirect and notify URLs, required for 3-D Secure and some wallets.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentParamsResultUrl {
    /// Where the cardholder's browser is sent after authentication
    pub frontend_redirect_url: String,

    /// Where TapPay posts the transaction result
    pub backend_notify_url: String,
}

/// Cardholder fields the issuing bank should verify.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentParamsCardholderVerify {
    /// Verify the phone number
    #[serde(default, skip_serializing_if = "is_false")]
    pub phone_number: bool,

    /// Verify the national identity number
    #[serde(default, skip_serializing_if = "is_false")]
    pub national_id: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Parameters of a pay-by-prime request.
///
/// # Examples
///
/// ```
/// use tappay_rs::payment::{PaymentParamsCardholder, PaymentPrimeParams};
///
/// let mut params = PaymentPrimeParams::new(
///     "test_3a2fb2b7e892b914a03c95dd4dd5dc7970c908df67a49527c0a648b2bc9",
///     "GlobalTesting_CTBC",
///     100,
///     "Coffee beans",
///     PaymentParamsCardholder::new("0912345678", "Wang Xiao Ming", "buyer@example.com"),
/// );
/// params.order_number = Some("order-42".to_string());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PaymentPrimeParams {
    /// One-time prime token from the frontend SDK
    pub prime: String,

    /// Merchant ID
    pub merchant_id: String,

    /// Merchant group ID, used instead of a merchant ID for group accounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_group_id: Option<String>,

    /// Amount to charge
    pub amount: i64,

    /// Merchandise details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchandise_details: Option<RecordMerchandiseDetails>,

    /// Currency code, defaults to TWD on the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Merchant order number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,

    /// Bank transaction identifier chosen by the merchant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_transaction_id: Option<String>,

    /// Trade description
    pub details: String,

    /// Cardholder
    pub cardholder: PaymentParamsCardholder,

    /// Cardholder fields to verify
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardholder_verify: Option<PaymentParamsCardholderVerify>,

    /// Number of instalments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instalment: Option<u32>,

    /// Days before the authorization is captured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_capture_in_days: Option<u32>,

    /// Request 3-D Secure authentication
    #[serde(default, skip_serializing_if = "is_false")]
    pub three_domain_secure: bool,

    /// Redirect and notify URLs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_url: Option<PaymentParamsResultUrl>,

    /// Ask TapPay to return a card secret for later pay-by-token charges
    #[serde(default, skip_serializing_if = "is_false")]
    pub remember: bool,

    /// Redeem card points
    #[serde(default, skip_serializing_if = "is_false")]
    pub redeem: bool,

    /// Extra data forwarded as-is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<Value>,

    /// Bank event code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_code: Option<String>,

    /// Product image shown on some wallet payment pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_image_url: Option<String>,
}

impl PaymentPrimeParams {
    /// Creates parameters with the required fields set and everything else
    /// absent.
    pub fn new(
        prime: impl Into<String>,
        merchant_id: impl Into<String>,
        amount: i64,
        details: impl Into<String>,
        cardholder: PaymentParamsCardholder,
    ) -> Self {
        Self {
            prime: prime.into(),
            merchant_id: merchant_id.into(),
            amount,
            details: details.into(),
            cardholder,
            ..Default::default()
        }
    }
}

impl MarshalMap for PaymentPrimeParams {}

/// Card secret returned when `remember` was requested.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PaymentCardSecret {
    /// Card token
    #[serde(deserialize_with = "null_as_default")]
    pub card_token: String,
    /// Card key
    #[serde(deserialize_with = "null_as_default")]
    pub card_key: String,
}

/// Card metadata of a pay-by-prime response.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PaymentCardInfo {
    /// Fields shared with trade records
    #[serde(flatten)]
    pub card: RecordCardInfo,
    /// Card expiry date, YYYYMM
    #[serde(deserialize_with = "null_as_default")]
    pub expiry_date: String,
}

/// Bank processing window of a transaction, in Unix milliseconds.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PaymentBankTransactionTime {
    /// Start of bank processing
    #[serde(deserialize_with = "null_as_default")]
    pub start_time_millis: String,
    /// End of bank processing
    #[serde(deserialize_with = "null_as_default")]
    pub end_time_millis: String,
}

/// Bank-specific redemption details.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PaymentRedeemExtraInfo {
    /// Points used
    #[serde(deserialize_with = "null_as_default")]
    pub redeem_used: String,
    /// Credit amount
    #[serde(deserialize_with = "null_as_default")]
    pub credit_amt: String,
    /// Remaining points
    #[serde(deserialize_with = "null_as_default")]
    pub redeem_balance: String,
    /// Redemption type
    #[serde(deserialize_with = "null_as_default")]
    pub redeem_type: String,
}

/// Redemption details of a pay-by-prime response.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PaymentRedeemInfo {
    /// Fields shared with trade records
    #[serde(flatten)]
    pub redeem: RecordRedeemInfo,
    /// Bank-specific details
    #[serde(deserialize_with = "null_as_default")]
    pub extra_info: PaymentRedeemExtraInfo,
}

/// Response of a pay-by-prime request.
///
/// Nested structures are left at their zero value when they do not apply to
/// the transaction.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PaymentPrimeResponse {
    /// TapPay status code, 0 on success
    #[serde(deserialize_with = "null_as_default")]
    pub status: i32,
    /// Status message
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
    /// TapPay transaction identifier, used for refunds and record queries
    #[serde(deserialize_with = "null_as_default")]
    pub rec_trade_id: String,
    /// Bank transaction identifier
    #[serde(deserialize_with = "null_as_default")]
    pub bank_transaction_id: String,
    /// Bank authorization code
    #[serde(deserialize_with = "null_as_default")]
    pub auth_code: String,
    /// Card secret, present when `remember` was requested
    #[serde(deserialize_with = "null_as_default")]
    pub card_secret: PaymentCardSecret,
    /// Charged amount
    #[serde(deserialize_with = "null_as_default")]
    pub amount: i64,
    /// Currency code
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    /// Card metadata
    #[serde(deserialize_with = "null_as_default")]
    pub card_info: PaymentCardInfo,
    /// Merchant order number
    #[serde(deserialize_with = "null_as_default")]
    pub order_number: String,
    /// Acquiring bank
    #[serde(deserialize_with = "null_as_default")]
    pub acquirer: String,
    /// Transaction time, Unix milliseconds
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_time_millis: i64,
    /// Bank processing window
    #[serde(deserialize_with = "null_as_default")]
    pub bank_transaction_time: PaymentBankTransactionTime,
    /// Bank result code
    #[serde(deserialize_with = "null_as_default")]
    pub bank_result_code: String,
    /// Bank result message
    #[serde(deserialize_with = "null_as_default")]
    pub bank_result_msg: String,
    /// URL the cardholder must visit, for 3-D Secure and wallet flows
    #[serde(deserialize_with = "null_as_default")]
    pub payment_url: String,
    /// Instalment plan
    #[serde(deserialize_with = "null_as_default")]
    pub instalment_info: RecordInstalmentInfo,
    /// Redemption details
    #[serde(deserialize_with = "null_as_default")]
    pub redeem_info: PaymentRedeemInfo,
    /// Card identifier, stable across trades with the same card
    #[serde(deserialize_with = "null_as_default")]
    pub card_identifier: String,
    /// Merchant reference information
    #[serde(deserialize_with = "null_as_default")]
    pub merchant_reference_info: RecordMerchantReferenceInfo,
    /// Bank event code
    #[serde(deserialize_with = "null_as_default")]
    pub event_code: String,
}

impl PaymentPrimeResponse {
    /// Returns `true` when TapPay reported success.
    pub fn is_success(&self) -> bool {
        self.status == 0
    }

    /// Transaction time as a UTC timestamp.
    pub fn transaction_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.transaction_time_millis)
    }
}

impl TapPayClient {
    /// Charges a card through a prime token.
    ///
    /// A declined or malformed charge is not an error: check
    /// [`PaymentPrimeResponse::status`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tappay_rs::client::{TapPayClient, SANDBOX_API_URL};
    /// use tappay_rs::payment::{PaymentParamsCardholder, PaymentPrimeParams};
    ///
    /// # async fn example() -> tappay_rs::Result<()> {
    /// let client = TapPayClient::builder("partner_key")
    ///     .with_server(SANDBOX_API_URL)
    ///     .build()?;
    ///
    /// let params = PaymentPrimeParams::new(
    ///     "test_3a2fb2b7e892b914a03c95dd4dd5dc7970c908df67a49527c0a648b2bc9",
    ///     "GlobalTesting_CTBC",
    ///     100,
    ///     "Coffee beans",
    ///     PaymentParamsCardholder::new("0912345678", "Wang Xiao Ming", "buyer@example.com"),
    /// );
    /// let payment = client.pay_by_prime(&params).await?;
    /// if payment.is_success() {
    ///     println!("charged, rec_trade_id = {}", payment.rec_trade_id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn pay_by_prime(&self, params: &PaymentPrimeParams) -> Result<PaymentPrimeResponse> {
        self.call(Service::PayByPrime, params).await
    }
}
