//! # tappay-rs
//!
//! An async Rust client for the [TapPay](https://www.tappaysdk.com) backend payment API.
//!
//! The library covers three operations:
//!
//! - **Pay by prime**: charge a card through the one-time prime token produced by the
//!   TapPay frontend SDK
//! - **Record query**: look up trade records with optional filters and sort order
//! - **Refund**: refund a completed transaction, fully or partially
//!
//! Each operation builds a JSON body from a typed parameter struct, adds the
//! `partner_key` credential, POSTs it to TapPay and decodes a typed response.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tappay_rs::client::{TapPayClient, SANDBOX_API_URL};
//! use tappay_rs::refund::RefundParams;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TapPayClient::builder("partner_YOUR_KEY")
//!     .with_server(SANDBOX_API_URL)
//!     .build()?;
//!
//! let refund = client.refund(&RefundParams::new("D20240101abc123")).await?;
//! if !refund.is_success() {
//!     println!("refund rejected: {} {}", refund.status, refund.msg);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! The base URL defaults to the production server. It can be overridden by the
//! `TAPPAY_SERVER` environment variable, which in turn is overridden by
//! [`ClientBuilder::with_server`](client::ClientBuilder::with_server). Requests time out
//! after 30 seconds unless another timeout or HTTP client is supplied.
//!
//! ## Errors
//!
//! [`TapPayError`] only covers local failures: configuration, network and JSON
//! problems. TapPay reports declined or invalid requests through the `status`
//! field of the response, where `0` means success.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
mod decode;
pub mod errors;
pub mod marshal;
pub mod payment;
pub mod record;
pub mod refund;

// Re-export commonly used items
pub use client::{with_deadline, ClientBuilder, Service, TapPayClient, API_URL, SANDBOX_API_URL};
pub use errors::{Result, TapPayError};
pub use marshal::MarshalMap;
pub use payment::{PaymentParamsCardholder, PaymentPrimeParams, PaymentPrimeResponse};
pub use record::{Record, RecordFilters, RecordParams, RecordResponse, RecordSort, RecordStatus};
pub use refund::{RefundParams, RefundResponse};
