//! In-process fake of the TapPay backend endpoints.
//!
//! The fake keeps an in-memory trade ledger so a charge can be queried and
//! refunded afterwards, and it records every request it receives so tests can
//! assert on headers and bodies exactly as they went over the wire.

#![allow(dead_code)]

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// A request as received by the fake server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: &'static str,
    pub api_key: Option<String>,
    pub content_type: Option<String>,
    pub user_agent: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct Ledger {
    requests: Vec<CapturedRequest>,
    trades: Vec<Value>,
    next_id: u64,
}

/// Handle to a running fake TapPay server.
#[derive(Clone, Default)]
pub struct FakeTapPay {
    ledger: Arc<Mutex<Ledger>>,
}

impl FakeTapPay {
    /// Starts the fake on a random local port and returns it with its base URL.
    pub async fn start() -> (Self, String) {
        let fake = FakeTapPay::default();
        let app = Router::new()
            .route("/tpc/payment/pay-by-prime", post(pay_by_prime))
            .route("/tpc/transaction/query", post(query))
            .route("/tpc/transaction/refund", post(refund))
            .with_state(fake.clone());
        let url = serve(app).await;
        (fake, url)
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.ledger.lock().unwrap().requests.clone()
    }

    fn capture(&self, path: &'static str, headers: &HeaderMap, body: &Value) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.ledger.lock().unwrap().requests.push(CapturedRequest {
            path,
            api_key: header("x-api-key"),
            content_type: header("content-type"),
            user_agent: header("user-agent"),
            body: body.clone(),
        });
    }
}

/// Serves `app` on a random local port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn pay_by_prime(
    State(fake): State<FakeTapPay>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    fake.capture("/tpc/payment/pay-by-prime", &headers, &body);

    let prime = body["prime"].as_str().unwrap_or_default();
    if !prime.starts_with("test_") {
        return Json(json!({"status": 121, "msg": "Invalid prime"}));
    }

    let mut ledger = fake.ledger.lock().unwrap();
    ledger.next_id += 1;
    let rec_trade_id = format!("D{:012}", ledger.next_id);
    let amount = body["amount"].as_i64().unwrap_or_default();
    let time = 1_704_067_200_000_i64 + ledger.next_id as i64 * 1000;

    ledger.trades.push(json!({
        "rec_trade_id": rec_trade_id,
        "merchant_id": body["merchant_id"],
        "amount": amount,
        "original_amount": amount,
        "refunded_amount": 0,
        "record_status": 1,
        "time": time,
        "order_number": body["order_number"],
        "details": body["details"],
        "cardholder": {
            "name": body["cardholder"]["name"],
            "phone_number": body["cardholder"]["phone_number"],
            "email": body["cardholder"]["email"]
        },
        "currency": "TWD",
        "card_info": {"bin_code": "424242", "last_four": "4242", "type": 1}
    }));

    Json(json!({
        "status": 0,
        "msg": "Success",
        "rec_trade_id": rec_trade_id,
        "bank_transaction_id": format!("TP{:012}", ledger.next_id),
        "auth_code": "123456",
        "amount": amount,
        "currency": "TWD",
        "order_number": body["order_number"],
        "acquirer": "TW_CTBC",
        "transaction_time_millis": time,
        "card_info": {
            "bin_code": "424242",
            "last_four": "4242",
            "issuer": "JPMORGAN CHASE BANK NA",
            "funding": 0,
            "type": 1,
            "level": "",
            "country": "UNITED STATES",
            "country_code": "US",
            "expiry_date": "203012"
        },
        "bank_result_code": "",
        "bank_result_msg": ""
    }))
}

async fn query(
    State(fake): State<FakeTapPay>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    fake.capture("/tpc/transaction/query", &headers, &body);

    let ledger = fake.ledger.lock().unwrap();
    let filters = &body["filters"];
    let mut matching: Vec<Value> = ledger
        .trades
        .iter()
        .filter(|trade| {
            ["rec_trade_id", "order_number"].iter().all(|key| {
                filters[*key].is_null() || filters[*key] == trade[*key]
            })
        })
        .cloned()
        .collect();

    if body["order_by"]["is_descending"] == json!(true) {
        matching.reverse();
    }

    let per_page = body["records_per_page"].as_u64().unwrap_or(50).max(1) as usize;
    let page = body["page"].as_u64().unwrap_or(0) as usize;
    let total = matching.len();
    let total_pages = (total + per_page - 1) / per_page;
    let records: Vec<Value> = matching.into_iter().skip(page * per_page).take(per_page).collect();

    let (status, msg) = if total == 0 {
        (2, "No matching records")
    } else {
        (0, "Success")
    };

    Json(json!({
        "status": status,
        "msg": msg,
        "records_per_page": per_page,
        "page": page,
        "total_page_count": total_pages,
        "number_of_transactions": total,
        "trade_records": records
    }))
}

async fn refund(
    State(fake): State<FakeTapPay>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    fake.capture("/tpc/transaction/refund", &headers, &body);

    let mut ledger = fake.ledger.lock().unwrap();
    let rec_trade_id = body["rec_trade_id"].as_str().unwrap_or_default().to_string();
    let Some(trade) = ledger
        .trades
        .iter_mut()
        .find(|trade| trade["rec_trade_id"] == json!(rec_trade_id))
    else {
        return Json(json!({"status": 11000, "msg": "Invalid rec_trade_id"}));
    };

    let remaining = trade["amount"].as_i64().unwrap_or_default();
    let requested = body["amount"]
        .as_str()
        .and_then(|a| a.parse::<i64>().ok())
        .unwrap_or(remaining);
    if requested > remaining || remaining == 0 {
        return Json(json!({"status": 10016, "msg": "Refund amount exceeds remaining amount"}));
    }

    let left = remaining - requested;
    let refunded = trade["refunded_amount"].as_i64().unwrap_or_default() + requested;
    trade["amount"] = json!(left);
    trade["refunded_amount"] = json!(refunded);
    trade["record_status"] = json!(if left == 0 { 3 } else { 2 });

    Json(json!({
        "status": 0,
        "msg": "Success",
        "refund_id": format!("R{}", rec_trade_id),
        "refund_amount": requested,
        "is_captured": true,
        "currency": "TWD"
    }))
}
