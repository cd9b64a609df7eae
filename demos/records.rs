//! Example: list the last week of trade records, newest first.
//!
//! Run with:
//! ```bash
//! cargo run --example records
//! ```
//!
//! Environment variables (a `.env` file is read if present):
//! - TAPPAY_PARTNER_KEY: your partner key
//! - TAPPAY_SERVER: base URL, defaults to the production server

use anyhow::Context;
use chrono::{Duration, Utc};
use tappay_rs::client::TapPayClient;
use tappay_rs::record::{RecordFilterTime, RecordFilters, RecordParams, RecordSort, SortAttribute};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let partner_key = std::env::var("TAPPAY_PARTNER_KEY").context("TAPPAY_PARTNER_KEY is not set")?;
    let client = TapPayClient::new(partner_key)?;

    let now = Utc::now();
    let params = RecordParams {
        records_per_page: Some(20),
        page: Some(0),
        filters: Some(RecordFilters {
            time: Some(RecordFilterTime::between(now - Duration::days(7), now)),
            ..Default::default()
        }),
        order_by: Some(RecordSort {
            attribute: Some(SortAttribute::Time),
            is_descending: true,
        }),
    };

    let response = client.records(&params).await?;
    println!(
        "status {} ({}): {} transactions over {} pages",
        response.status, response.msg, response.number_of_transactions, response.total_page_count
    );

    for record in &response.trade_records {
        let time = record
            .transaction_time()
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        println!(
            "{}  {}  {:>8} {}  {:?}",
            time, record.rec_trade_id, record.amount, record.currency, record.record_status
        );
    }

    Ok(())
}
