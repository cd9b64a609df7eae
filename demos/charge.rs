//! Example: charge a sandbox prime, then refund part of it.
//!
//! Run with:
//! ```bash
//! cargo run --example charge
//! ```
//!
//! Environment variables (a `.env` file is read if present):
//! - TAPPAY_PARTNER_KEY: your sandbox partner key
//! - TAPPAY_MERCHANT_ID: merchant to charge, defaults to GlobalTesting_CTBC
//! - TAPPAY_PRIME: prime from the frontend SDK, defaults to the sandbox test prime

use anyhow::{bail, Context};
use tappay_rs::client::{TapPayClient, SANDBOX_API_URL};
use tappay_rs::payment::{PaymentParamsCardholder, PaymentPrimeParams};
use tappay_rs::refund::RefundParams;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let partner_key = std::env::var("TAPPAY_PARTNER_KEY").context("TAPPAY_PARTNER_KEY is not set")?;
    let merchant_id =
        std::env::var("TAPPAY_MERCHANT_ID").unwrap_or_else(|_| "GlobalTesting_CTBC".to_string());
    let prime = std::env::var("TAPPAY_PRIME").unwrap_or_else(|_| {
        "test_3a2fb2b7e892b914a03c95dd4dd5dc7970c908df67a49527c0a648b2bc9".to_string()
    });

    let client = TapPayClient::builder(partner_key)
        .with_server(SANDBOX_API_URL)
        .build()?;

    let mut params = PaymentPrimeParams::new(
        prime,
        merchant_id,
        100,
        "tappay-rs demo",
        PaymentParamsCardholder::new("0912345678", "Demo Buyer", "buyer@example.com"),
    );
    params.order_number = Some(format!("demo-{}", chrono::Utc::now().timestamp_millis()));

    println!("Charging {} TWD...", params.amount);
    let payment = client.pay_by_prime(&params).await?;
    if !payment.is_success() {
        bail!("charge rejected: status {} ({})", payment.status, payment.msg);
    }
    println!(
        "Charged, rec_trade_id {} card ****{}",
        payment.rec_trade_id, payment.card_info.card.last_four
    );

    let refund = client
        .refund(&RefundParams::new(&payment.rec_trade_id).with_amount(30))
        .await?;
    println!(
        "Refund status {} ({}), refunded {}",
        refund.status, refund.msg, refund.refund_amount
    );

    Ok(())
}
