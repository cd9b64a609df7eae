//! Live tests against the TapPay sandbox.
//!
//! Ignored by default. Run them with a sandbox partner key:
//!
//! ```bash
//! TAPPAY_PARTNER_KEY=partner_xxx cargo test --test sandbox -- --ignored
//! ```

use chrono::Utc;
use tappay_rs::{
    client::{TapPayClient, SANDBOX_API_URL},
    payment::{PaymentParamsCardholder, PaymentPrimeParams},
    record::{RecordFilters, RecordParams},
    refund::RefundParams,
};

/// Prime accepted by the sandbox for the GlobalTesting_CTBC merchant.
const TEST_PRIME: &str = "test_3a2fb2b7e892b914a03c95dd4dd5dc7970c908df67a49527c0a648b2bc9";

fn sandbox_client() -> TapPayClient {
    let partner_key = std::env::var("TAPPAY_PARTNER_KEY").expect("TAPPAY_PARTNER_KEY must be set");
    TapPayClient::builder(partner_key)
        .with_server(SANDBOX_API_URL)
        .build()
        .unwrap()
}

fn test_charge() -> PaymentPrimeParams {
    let mut params = PaymentPrimeParams::new(
        TEST_PRIME,
        "GlobalTesting_CTBC",
        100,
        "test-tappay-rs-package",
        PaymentParamsCardholder::new("0912345678", "tappay-rs", "tappayrs@example.com"),
    );
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    params.order_number = Some(format!("tappay-rs-{}", nanos));
    params
}

#[tokio::test]
#[ignore = "hits the TapPay sandbox"]
async fn test_sandbox_pay_by_prime() {
    let payment = sandbox_client().pay_by_prime(&test_charge()).await.unwrap();
    assert_eq!(payment.status, 0, "{}", payment.msg);
}

#[tokio::test]
#[ignore = "hits the TapPay sandbox"]
async fn test_sandbox_records() {
    let client = sandbox_client();

    let all = client.records(&RecordParams::default()).await.unwrap();
    assert!(all.status == 0 || all.status == 2, "{}", all.msg);

    let payment = client.pay_by_prime(&test_charge()).await.unwrap();
    let by_id = client
        .records(&RecordParams {
            filters: Some(RecordFilters {
                rec_trade_id: Some(payment.rec_trade_id),
                ..Default::default()
            }),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(by_id.status == 0 || by_id.status == 2, "{}", by_id.msg);
}

#[tokio::test]
#[ignore = "hits the TapPay sandbox"]
async fn test_sandbox_refund() {
    let client = sandbox_client();

    let invalid = client
        .refund(&RefundParams::new("Invalid_trade_id"))
        .await
        .unwrap();
    assert_eq!(invalid.status, 11000);

    let payment = client.pay_by_prime(&test_charge()).await.unwrap();
    let refund = client
        .refund(&RefundParams::new(payment.rec_trade_id))
        .await
        .unwrap();
    assert_eq!(refund.status, 0, "{}", refund.msg);
}
