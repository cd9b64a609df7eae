//! Trade record query (`/tpc/transaction/query`).
//!
//! Records are looked up with optional filter groups and an optional sort
//! order. The server decides which records match and in which order they are
//! returned; the client keeps that order untouched.
//!
//! Several nested record types defined here (card info, instalment info,
//! redeem info, merchant reference info) are shared with the pay-by-prime
//! response.

use crate::client::{Service, TapPayClient};
use crate::decode::null_as_default;
use crate::errors::Result;
use crate::marshal::MarshalMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a trade record.
///
/// Values outside the documented set are kept as [`RecordStatus::Unknown`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(from = "i32", into = "i32")]
pub enum RecordStatus {
    /// Transaction failed
    Error,
    /// Authorized, not yet captured
    #[default]
    Auth,
    /// Captured
    Ok,
    /// Partially refunded
    PartialRefunded,
    /// Fully refunded
    Refunded,
    /// Pending
    Pending,
    /// Cancelled
    Cancel,
    /// A status code this library does not know about
    Unknown(i32),
}

impl From<i32> for RecordStatus {
    fn from(code: i32) -> Self {
        match code {
            -1 => RecordStatus::Error,
            0 => RecordStatus::Auth,
            1 => RecordStatus::Ok,
            2 => RecordStatus::PartialRefunded,
            3 => RecordStatus::Refunded,
            4 => RecordStatus::Pending,
            5 => RecordStatus::Cancel,
            other => RecordStatus::Unknown(other),
        }
    }
}

impl From<RecordStatus> for i32 {
    fn from(status: RecordStatus) -> Self {
        match status {
            RecordStatus::Error => -1,
            RecordStatus::Auth => 0,
            RecordStatus::Ok => 1,
            RecordStatus::PartialRefunded => 2,
            RecordStatus::Refunded => 3,
            RecordStatus::Pending => 4,
            RecordStatus::Cancel => 5,
            RecordStatus::Unknown(code) => code,
        }
    }
}

/// Filter on a range of transaction times, in Unix milliseconds.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilterTime {
    /// Lower bound of the transaction time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,

    /// Upper bound of the transaction time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
}

impl RecordFilterTime {
    /// Builds a time filter covering `start..=end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Duration, Utc};
    /// use tappay_rs::record::RecordFilterTime;
    ///
    /// let end = Utc::now();
    /// let filter = RecordFilterTime::between(end - Duration::days(7), end);
    /// assert_eq!(filter.end_time, Some(end.timestamp_millis()));
    /// ```
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start_time: Some(start.timestamp_millis()),
            end_time: Some(end.timestamp_millis()),
        }
    }
}

/// Filter on a range of transaction amounts.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilterAmount {
    /// Highest amount to include
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_limit: Option<i64>,

    /// Lowest amount to include
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_limit: Option<i64>,
}

/// Filter on cardholder properties.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilterCardholder {
    /// Cardholder phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// Cardholder name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Cardholder email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Filters applied to a record query. Every group is optional.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilters {
    /// Transaction time range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<RecordFilterTime>,

    /// Transaction amount range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<RecordFilterAmount>,

    /// Cardholder properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardholder: Option<RecordFilterCardholder>,

    /// Merchant IDs to include; omitted when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merchant_id: Vec<String>,

    /// Record status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_status: Option<RecordStatus>,

    /// TapPay transaction identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rec_trade_id: Option<String>,

    /// Merchant order number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,

    /// Bank transaction identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_transaction_id: Option<String>,

    /// Currency code, e.g. "TWD"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Record attribute the results are sorted by.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortAttribute {
    /// Transaction time
    Time,
    /// Transaction amount
    Amount,
}

/// Sort order of the returned records.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSort {
    /// Attribute to sort by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<SortAttribute>,

    /// Sort descending instead of ascending
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_descending: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Parameters of a record query.
///
/// The default value queries without filters or sort order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordParams {
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records_per_page: Option<u32>,

    /// Zero-based page index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Filters to apply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<RecordFilters>,

    /// Sort order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<RecordSort>,
}

impl MarshalMap for RecordParams {}

/// Cardholder of a trade record.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RecordCardholder {
    /// Name
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Phone number
    #[serde(deserialize_with = "null_as_default")]
    pub phone_number: String,
    /// Email
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
}

/// Merchandise details of a trade.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RecordMerchandiseDetails {
    /// Part of the amount not eligible for card rebates
    #[serde(deserialize_with = "null_as_default")]
    pub no_rebate_amount: i64,
}

/// Merchant reference information of a trade.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RecordMerchantReferenceInfo {
    /// Affiliate codes attached to the trade
    #[serde(deserialize_with = "null_as_default")]
    pub affiliate_codes: Vec<String>,
}

/// E-invoice carrier of a trade.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RecordEInvoiceCarrier {
    /// Carrier type
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub carrier_type: i32,
    /// Carrier number
    #[serde(deserialize_with = "null_as_default")]
    pub number: String,
    /// Whether the invoice is donated
    #[serde(deserialize_with = "null_as_default")]
    pub donation: bool,
    /// Donation recipient code
    #[serde(deserialize_with = "null_as_default")]
    pub donation_id: String,
}

/// Instalment plan of a trade.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RecordInstalmentInfo {
    /// Number of instalments
    #[serde(deserialize_with = "null_as_default")]
    pub number_of_instalments: i32,
    /// Amount of the first payment
    #[serde(deserialize_with = "null_as_default")]
    pub first_payment: i64,
    /// Amount of each following payment
    #[serde(deserialize_with = "null_as_default")]
    pub each_payment: i64,
}

/// Breakdown of how a trade was paid.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RecordPayInfo {
    /// Payment method
    #[serde(deserialize_with = "null_as_default")]
    pub method: String,
    /// Masked card number
    #[serde(deserialize_with = "null_as_default")]
    pub masked_credit_card_number: String,
    /// Amount paid with points
    #[serde(deserialize_with = "null_as_default")]
    pub point: i64,
    /// Discount amount
    #[serde(deserialize_with = "null_as_default")]
    pub discount: i64,
    /// Amount paid by credit card
    #[serde(deserialize_with = "null_as_default")]
    pub credit_card: i64,
    /// Amount paid from wallet balance
    #[serde(deserialize_with = "null_as_default")]
    pub balance: i64,
    /// Amount paid from a bank account
    #[serde(deserialize_with = "null_as_default")]
    pub bank_account: i64,
}

/// Card point redemption of a trade.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RecordRedeemInfo {
    /// Points used
    #[serde(deserialize_with = "null_as_default")]
    pub used_point: String,
    /// Remaining points
    #[serde(deserialize_with = "null_as_default")]
    pub balance: String,
    /// Amount offset by points
    #[serde(deserialize_with = "null_as_default")]
    pub offset_amount: String,
    /// Amount still due after redemption
    #[serde(deserialize_with = "null_as_default")]
    pub due_amount: String,
}

/// Card metadata of a trade.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RecordCardInfo {
    /// First six digits of the card number
    #[serde(deserialize_with = "null_as_default")]
    pub bin_code: String,
    /// Last four digits of the card number
    #[serde(deserialize_with = "null_as_default")]
    pub last_four: String,
    /// Issuing bank
    #[serde(deserialize_with = "null_as_default")]
    pub issuer: String,
    /// Issuing bank, Traditional Chinese name
    #[serde(deserialize_with = "null_as_default")]
    pub issuer_zh_tw: String,
    /// Issuing bank code
    #[serde(deserialize_with = "null_as_default")]
    pub bank_id: String,
    /// Funding type (credit, debit, prepaid)
    #[serde(deserialize_with = "null_as_default")]
    pub funding: i32,
    /// Card brand
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub card_type: i32,
    /// Card level
    #[serde(deserialize_with = "null_as_default")]
    pub level: String,
    /// Issuing country
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    /// Issuing country code
    #[serde(deserialize_with = "null_as_default")]
    pub country_code: String,
}

/// A trade record returned by the record query.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Record {
    /// TapPay transaction identifier
    #[serde(deserialize_with = "null_as_default")]
    pub rec_trade_id: String,
    /// Bank authorization code
    #[serde(deserialize_with = "null_as_default")]
    pub auth_code: String,
    /// Merchant ID
    #[serde(deserialize_with = "null_as_default")]
    pub merchant_id: String,
    /// Merchant name
    #[serde(deserialize_with = "null_as_default")]
    pub merchant_name: String,
    /// Application name
    #[serde(deserialize_with = "null_as_default")]
    pub app_name: String,
    /// Transaction time, Unix milliseconds
    #[serde(deserialize_with = "null_as_default")]
    pub time: i64,
    /// Current amount
    #[serde(deserialize_with = "null_as_default")]
    pub amount: i64,
    /// Amount refunded so far
    #[serde(deserialize_with = "null_as_default")]
    pub refunded_amount: i64,
    /// Record status
    #[serde(deserialize_with = "null_as_default")]
    pub record_status: RecordStatus,
    /// Bank transaction identifier
    #[serde(deserialize_with = "null_as_default")]
    pub bank_transaction_id: String,
    /// Capture time, Unix milliseconds
    #[serde(deserialize_with = "null_as_default")]
    pub cap_millis: i64,
    /// Amount at the time of the charge
    #[serde(deserialize_with = "null_as_default")]
    pub original_amount: i64,
    /// Bank transaction start, Unix milliseconds
    #[serde(deserialize_with = "null_as_default")]
    pub bank_transaction_start_millis: i64,
    /// Bank transaction end, Unix milliseconds
    #[serde(deserialize_with = "null_as_default")]
    pub bank_transaction_end_millis: i64,
    /// Whether the trade has been captured
    #[serde(deserialize_with = "null_as_default")]
    pub is_captured: bool,
    /// Bank result code
    #[serde(deserialize_with = "null_as_default")]
    pub bank_result_code: String,
    /// Bank result message
    #[serde(deserialize_with = "null_as_default")]
    pub bank_result_msg: String,
    /// Partial card number
    #[serde(deserialize_with = "null_as_default")]
    pub partial_card_number: String,
    /// Payment method
    #[serde(deserialize_with = "null_as_default")]
    pub payment_method: String,
    /// Trade description
    #[serde(deserialize_with = "null_as_default")]
    pub details: String,
    /// Cardholder
    #[serde(deserialize_with = "null_as_default")]
    pub cardholder: RecordCardholder,
    /// Merchandise details
    #[serde(deserialize_with = "null_as_default")]
    pub merchandise_details: RecordMerchandiseDetails,
    /// Currency code
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    /// Merchant reference information
    #[serde(deserialize_with = "null_as_default")]
    pub merchant_reference_info: RecordMerchantReferenceInfo,
    /// E-invoice carrier
    #[serde(deserialize_with = "null_as_default")]
    pub e_invoice_carrier: RecordEInvoiceCarrier,
    /// Whether 3-D Secure was used
    #[serde(deserialize_with = "null_as_default")]
    pub three_domain_secure: bool,
    /// Whether the trade is paid by instalment
    #[serde(deserialize_with = "null_as_default")]
    pub pay_by_instalment: bool,
    /// Instalment plan
    #[serde(deserialize_with = "null_as_default")]
    pub instalment_info: RecordInstalmentInfo,
    /// Merchant order number
    #[serde(deserialize_with = "null_as_default")]
    pub order_number: String,
    /// Payment breakdown
    #[serde(deserialize_with = "null_as_default")]
    pub pay_info: RecordPayInfo,
    /// Whether points were redeemed
    #[serde(deserialize_with = "null_as_default")]
    pub pay_by_redeem: bool,
    /// Redemption details
    #[serde(deserialize_with = "null_as_default")]
    pub redeem_info: RecordRedeemInfo,
    /// Card identifier, stable across trades with the same card
    #[serde(deserialize_with = "null_as_default")]
    pub card_identifier: String,
    /// Card metadata
    #[serde(deserialize_with = "null_as_default")]
    pub card_info: RecordCardInfo,
}

impl Record {
    /// Transaction time as a UTC timestamp.
    pub fn transaction_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time)
    }
}

/// Response of the record query.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RecordResponse {
    /// TapPay status code, 0 on success
    #[serde(deserialize_with = "null_as_default")]
    pub status: i32,
    /// Status message
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
    /// Page size
    #[serde(deserialize_with = "null_as_default")]
    pub records_per_page: u32,
    /// Page index
    #[serde(deserialize_with = "null_as_default")]
    pub page: u32,
    /// Number of pages matching the filters
    #[serde(deserialize_with = "null_as_default")]
    pub total_page_count: u32,
    /// Number of transactions matching the filters
    #[serde(deserialize_with = "null_as_default")]
    pub number_of_transactions: i64,
    /// Records of the requested page, in server order
    #[serde(deserialize_with = "null_as_default")]
    pub trade_records: Vec<Record>,
}

impl RecordResponse {
    /// Returns `true` when TapPay reported success.
    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

impl TapPayClient {
    /// Queries trade records.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tappay_rs::client::{TapPayClient, SANDBOX_API_URL};
    /// use tappay_rs::record::{RecordFilters, RecordParams};
    ///
    /// # async fn example() -> tappay_rs::Result<()> {
    /// let client = TapPayClient::builder("partner_key")
    ///     .with_server(SANDBOX_API_URL)
    ///     .build()?;
    ///
    /// let params = RecordParams {
    ///     filters: Some(RecordFilters {
    ///         order_number: Some("order-42".to_string()),
    ///         ..Default::default()
    ///     }),
    ///     ..Default::default()
    /// };
    /// let records = client.records(&params).await?;
    /// println!("{} matching records", records.number_of_transactions);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn records(&self, params: &RecordParams) -> Result<RecordResponse> {
        self.call(Service::Record, params).await
    }
}
