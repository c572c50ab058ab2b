//! In-process gateway double for integration tests.
//!
//! [`FakeGateway`] is a stateful wiremock responder that issues tokens, tracks
//! orders through their statuses and answers with the gateway's error envelopes,
//! so the services can be exercised end to end over real HTTP.

#![allow(dead_code, reason = "each test binary uses a different subset of helpers")]
#![allow(clippy::unwrap_used, reason = "test helpers fail loudly")]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use serde_json::{Value, json};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate, matchers::any};
use worldpay_sdk::{WorldpayClient, config::ClientConfig, model::CardRequest};

pub const SERVICE_KEY: &str = "T_S_test-service-key";
pub const CLIENT_KEY: &str = "T_C_test-client-key";
pub const MERCHANT_ID: &str = "test-merchant";

pub const ACCEPT_HEADER: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
pub const SHOPPER_IP: &str = "195.35.90.111";
pub const SESSION_ID: &str = "021ui8ib1";
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:33.0) Gecko/20100101 Firefox/33.0";

const CAPTURE_EXCEEDED: &str = "Capture amount cannot be more than authorized order amount";

/// Installs a test subscriber once; `RUST_LOG=worldpay_sdk=debug` shows SDK spans.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test Mastercard accepted by the gateway's test environment.
pub fn mastercard() -> CardRequest {
    CardRequest::new("javalib client", "5555 5555 5555 4444", "123", 2, 2018)
}

/// A request as seen by the fake gateway.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub user_agent: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct State {
    next_id: u32,
    tokens: HashMap<String, Token>,
    orders: HashMap<String, Value>,
    requests: Vec<RecordedRequest>,
}

#[derive(Debug, Clone)]
struct Token {
    reusable: bool,
    consumed: bool,
    card: Value,
}

/// Stateful gateway double.
#[derive(Debug, Clone, Default)]
pub struct FakeGateway {
    state: Arc<Mutex<State>>,
}

/// Running fake gateway plus a client configured against it.
pub struct TestGateway {
    pub server: MockServer,
    pub fake: FakeGateway,
    pub client: WorldpayClient,
}

impl TestGateway {
    pub async fn start() -> Self {
        init_tracing();

        let server = MockServer::start().await;
        let fake = FakeGateway::default();
        Mock::given(any()).respond_with(fake.clone()).mount(&server).await;

        let config = ClientConfig::new(SERVICE_KEY)
            .with_client_key(CLIENT_KEY)
            .with_merchant_id(MERCHANT_ID)
            .with_base_url(server.uri());
        let client = WorldpayClient::new(config).unwrap();

        Self { server, fake, client }
    }

    /// Issues a fresh single-use token for the test Mastercard.
    pub async fn token(&self) -> String {
        self.client.tokens().tokenize(mastercard(), false).await.unwrap().token
    }
}

impl FakeGateway {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state().requests.clone()
    }

    /// Number of requests whose path starts with `prefix`.
    pub fn count(&self, method: &str, prefix: &str) -> usize {
        self.state()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path.starts_with(prefix))
            .count()
    }

    /// Current server-side status of an order.
    pub fn order_status(&self, order_code: &str) -> Option<String> {
        self.state()
            .orders
            .get(order_code)
            .and_then(|o| o["paymentStatus"].as_str().map(str::to_owned))
    }

    fn handle(&self, request: &Request) -> ResponseTemplate {
        let header = |name: &str| {
            request.headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned)
        };
        let body: Option<Value> = serde_json::from_slice(&request.body).ok();
        let method = request.method.as_str().to_owned();
        let path = request.url.path().to_owned();

        let mut state = self.state();
        state.requests.push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            query: request.url.query().map(str::to_owned),
            authorization: header("Authorization"),
            user_agent: header("X-wp-client-user-agent"),
            content_type: header("Content-Type"),
            body: body.clone(),
        });

        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

        if method == "POST" && segments == ["tokens"] {
            return state.create_token(body.as_ref());
        }

        if header("Authorization").as_deref() != Some(SERVICE_KEY) {
            return error(401, "UNAUTHORIZED", "Unauthorized access");
        }

        match (method.as_str(), segments.as_slice()) {
            ("POST", ["orders"]) => state.create_order(body.as_ref()),
            ("GET", ["orders", code]) => state
                .orders
                .get(*code)
                .map_or_else(order_not_found, |o| ok(&json!({"orderResponse": o}))),
            ("PUT", ["orders", code]) => state.authorize(code, body.as_ref()),
            ("DELETE", ["orders", code]) => state.cancel(code),
            ("POST", ["orders", code, "capture"]) => state.capture(code, body.as_ref()),
            ("POST", ["orders", code, "refund"]) => state.refund(code, body.as_ref()),
            ("GET", ["tokens", token]) => state.get_token(token),
            ("PUT", ["tokens", token]) => state.update_cvc(token, body.as_ref()),
            ("DELETE", ["tokens", token]) => {
                if state.tokens.remove(*token).is_some() {
                    ResponseTemplate::new(200)
                } else {
                    token_not_found()
                }
            }
            ("GET", ["transfers"]) => search_transfers(request),
            ("GET", ["transfers", id]) => ok(&json!({
                "transferId": id,
                "merchantId": MERCHANT_ID,
                "amount": 9700,
                "grossAmount": 10000,
                "fees": 300,
                "currencyCode": "GBP",
                "status": "PAID",
                "orderCodes": ["order-1"]
            })),
            _ => error(404, "NOT_FOUND", "Resource not found"),
        }
    }
}

impl Respond for FakeGateway {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.handle(request)
    }
}

impl State {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn create_token(&mut self, body: Option<&Value>) -> ResponseTemplate {
        let Some(body) = body else {
            return error(400, "BAD_REQUEST", "Request body is not valid JSON");
        };
        if body["clientKey"] != CLIENT_KEY {
            return error(401, "UNAUTHORIZED", "Invalid client key");
        }

        let method = &body["paymentMethod"];
        let number: String = method["cardNumber"]
            .as_str()
            .unwrap_or_default()
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        let last_four = &number[number.len().saturating_sub(4)..];
        let card_type = if number.starts_with('5') { "MASTERCARD_CREDIT" } else { "VISA_CREDIT" };
        let card = json!({
            "type": "ObfuscatedCard",
            "name": method["name"],
            "expiryMonth": method["expiryMonth"],
            "expiryYear": method["expiryYear"],
            "cardType": card_type,
            "maskedCardNumber": format!("**** **** **** {last_four}")
        });

        let reusable = body["reusable"].as_bool().unwrap_or(false);
        let token = format!("TEST_{}_{}", if reusable { "RU" } else { "SU" }, self.next_id());
        self.tokens
            .insert(token.clone(), Token { reusable, consumed: false, card: card.clone() });

        ok(&json!({"token": token, "reusable": reusable, "paymentMethod": card}))
    }

    fn get_token(&self, token: &str) -> ResponseTemplate {
        match self.tokens.get(token) {
            Some(t) => ok(&json!({"token": token, "reusable": t.reusable, "paymentMethod": t.card})),
            None => token_not_found(),
        }
    }

    fn update_cvc(&mut self, token: &str, body: Option<&Value>) -> ResponseTemplate {
        let Some(body) = body else {
            return error(400, "BAD_REQUEST", "Request body is not valid JSON");
        };
        if body["clientKey"] != CLIENT_KEY || body["cvc"].as_str().is_none() {
            return error(400, "BAD_REQUEST", "cvc and clientKey are required");
        }
        if self.tokens.contains_key(token) { ResponseTemplate::new(200) } else { token_not_found() }
    }

    fn create_order(&mut self, body: Option<&Value>) -> ResponseTemplate {
        let Some(body) = body else {
            return error(400, "BAD_REQUEST", "Request body is not valid JSON");
        };

        let token_id = body["token"].as_str().unwrap_or_default().to_owned();
        let card = match self.tokens.get_mut(&token_id) {
            Some(token) if !token.consumed => {
                token.consumed = !token.reusable;
                token.card.clone()
            }
            _ => return error(400, "TKN_NOT_FOUND", "Token not found"),
        };

        let is_3ds = body["is3DSOrder"].as_bool().unwrap_or(false);
        if is_3ds && body["threeDSecureInfo"].is_null() {
            return error(400, "BAD_REQUEST", "threeDSecureInfo is required for 3DS orders");
        }

        let requested = body["amount"].as_u64().unwrap_or(0);
        let authorize_only = body["authorizeOnly"].as_bool().unwrap_or(false);
        let (status, amount) = if is_3ds {
            ("PRE_AUTHORIZED", requested)
        } else if authorize_only {
            ("AUTHORIZED", 0)
        } else {
            ("SUCCESS", requested)
        };

        let order_code = format!("order-{}", self.next_id());
        let identifiers = body.get("customerIdentifiers").cloned().unwrap_or_else(|| json!({}));
        let mut order = json!({
            "orderCode": order_code,
            "token": token_id,
            "orderDescription": body["orderDescription"],
            "amount": amount,
            "authorizedAmount": requested,
            "currencyCode": body["currencyCode"],
            "paymentStatus": status,
            "paymentResponse": card,
            "customerIdentifiers": identifiers,
            "keyValueResponse": {"customerIdentifiers": identifiers},
            "environment": "TEST",
            "is3DSOrder": is_3ds,
            "threeDSecureInfo": body["threeDSecureInfo"]
        });
        if is_3ds {
            order["redirectURL"] = json!("https://secure-test.worldpay.com/3ds/challenge");
            order["oneTime3DsToken"] = json!(format!("PaRes-{order_code}"));
        }

        self.orders.insert(order_code, order.clone());
        ok(&order)
    }

    fn authorize(&mut self, code: &str, body: Option<&Value>) -> ResponseTemplate {
        let Some(order) = self.orders.get_mut(code) else {
            return order_not_found();
        };
        let response_code = body.and_then(|b| b["threeDSResponseCode"].as_str());
        let info_matches =
            body.is_some_and(|b| b["threeDSecureInfo"] == order["threeDSecureInfo"]);

        if order["paymentStatus"] != "PRE_AUTHORIZED" || response_code != Some("IDENTIFIED") {
            return invalid_state(code);
        }
        if !info_matches {
            return error(400, "BAD_REQUEST", "threeDSecureInfo does not match the order");
        }

        order["paymentStatus"] = json!("SUCCESS");
        ok(order)
    }

    fn capture(&mut self, code: &str, body: Option<&Value>) -> ResponseTemplate {
        let Some(order) = self.orders.get_mut(code) else {
            return order_not_found();
        };
        if order["paymentStatus"] != "AUTHORIZED" {
            return invalid_state(code);
        }

        let authorized = order["authorizedAmount"].as_u64().unwrap_or(0);
        let amount = body.and_then(|b| b["captureAmount"].as_u64()).unwrap_or(authorized);
        if amount > authorized {
            return error(400, "BAD_REQUEST", CAPTURE_EXCEEDED);
        }

        order["amount"] = json!(amount);
        order["paymentStatus"] = json!("SUCCESS");
        ok(order)
    }

    fn cancel(&mut self, code: &str) -> ResponseTemplate {
        let Some(order) = self.orders.get_mut(code) else {
            return order_not_found();
        };
        if order["paymentStatus"] != "AUTHORIZED" {
            return invalid_state(code);
        }
        order["paymentStatus"] = json!("CANCELLED");
        ResponseTemplate::new(200)
    }

    fn refund(&mut self, code: &str, body: Option<&Value>) -> ResponseTemplate {
        let Some(order) = self.orders.get_mut(code) else {
            return order_not_found();
        };
        if order["paymentStatus"] != "SUCCESS" {
            return invalid_state(code);
        }

        let captured = order["amount"].as_u64().unwrap_or(0);
        match body.and_then(|b| b["refundAmount"].as_u64()) {
            None => order["paymentStatus"] = json!("REFUNDED"),
            Some(amount) if amount <= captured => {
                order["paymentStatus"] = json!("PARTIALLY_REFUNDED");
            }
            Some(_) => {
                return error(400, "BAD_REQUEST", "Refund amount exceeds captured amount");
            }
        }
        ResponseTemplate::new(200)
    }
}

fn search_transfers(request: &Request) -> ResponseTemplate {
    let params: HashMap<String, String> = request.url.query_pairs().into_owned().collect();
    if params.get("merchantId").map(String::as_str) != Some(MERCHANT_ID) {
        return error(404, "MERCHANT_NOT_FOUND", "Merchant not found");
    }
    let page: u32 = params.get("pageNumber").and_then(|p| p.parse().ok()).unwrap_or(0);

    ok(&json!({
        "transfers": [{
            "transferId": format!("transfer-{page}"),
            "amount": 9700,
            "currencyCode": "GBP",
            "status": "PAID"
        }],
        "pageNumber": page,
        "numberOfPages": 2,
        "numberOfTransfers": 2
    }))
}

fn ok(body: &Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

fn error(status: u16, code: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "httpStatusCode": status,
        "customCode": code,
        "message": message,
        "description": message,
        "errorHelpUrl": null
    }))
}

fn invalid_state(code: &str) -> ResponseTemplate {
    error(400, "INVALID_STATE", &format!("Order {code} is not in a valid state for this operation"))
}

fn order_not_found() -> ResponseTemplate {
    error(404, "ORDR_NOT_FOUND", "Order not found")
}

fn token_not_found() -> ResponseTemplate {
    error(400, "TKN_NOT_FOUND", "Token not found")
}
