// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! End-to-end tests driving the full router: login, auth gate, asset CRUD,
//! and valuation against a fixed-price provider.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use cryptofolio_server::{
    api::router,
    auth::{CredentialStore, TokenClaims, TokenIssuer, TOKEN_ISSUER},
    rates::{RateSnapshot, StaticRates},
    state::AppState,
    storage::AssetStore,
};

const SECRET: &[u8] = b"integration-test-secret";

struct TestApp {
    app: Router,
    state: AppState,
    _dir: TempDir,
}

impl TestApp {
    fn new(rates: StaticRates) -> Self {
        let dir = TempDir::new().unwrap();
        let store = AssetStore::open(&dir.path().join("assets.redb")).unwrap();
        let credentials: CredentialStore = [("alice", "alice-pw"), ("bob", "bob-pw")]
            .into_iter()
            .collect();
        let state = AppState::new(store, rates, TokenIssuer::new(SECRET).unwrap(), credentials);
        Self {
            app: router(state.clone()),
            state,
            _dir: dir,
        }
    }

    fn with_prices() -> Self {
        Self::new(StaticRates::new(RateSnapshot {
            btc: 50_000.0,
            eth: 3_000.0,
            ltc: 80.0,
        }))
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(body) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/login",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    async fn create(&self, token: &str, label: &str, currency: &str, amount: f64) -> u64 {
        let (status, body) = self
            .send(
                Method::POST,
                "/assets",
                Some(token),
                Some(json!({ "label": label, "currency": currency, "amount": amount })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
        body["id"].as_u64().unwrap()
    }
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn login_returns_usable_token() {
    let app = TestApp::with_prices();
    let token = app.login("alice", "alice-pw").await;

    let (status, body) = app.send(Method::GET, "/assets", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = TestApp::with_prices();

    for (username, password) in [("alice", "wrong"), ("nobody", "alice-pw")] {
        let (status, body) = app
            .send(
                Method::POST,
                "/login",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials");
    }
}

#[tokio::test]
async fn login_rejects_malformed_json() {
    let app = TestApp::with_prices();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Auth gate
// =============================================================================

#[tokio::test]
async fn assets_require_token() {
    let app = TestApp::with_prices();

    for (method, uri) in [
        (Method::GET, "/assets"),
        (Method::GET, "/assets/1"),
        (Method::DELETE, "/assets/1"),
        (Method::GET, "/assets/value/total"),
    ] {
        let (status, body) = app.send(method, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["error_code"], "missing_auth_header");
    }
}

#[tokio::test]
async fn token_from_other_secret_is_rejected() {
    let app = TestApp::with_prices();
    let forged = TokenIssuer::new(b"not-the-server-secret")
        .unwrap()
        .issue("alice")
        .unwrap();

    let (status, _) = app.send(Method::GET, "/assets", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = TestApp::with_prices();
    let now = chrono::Utc::now().timestamp();
    let expired = TokenIssuer::new(SECRET)
        .unwrap()
        .sign(&TokenClaims {
            sub: "alice".to_string(),
            iss: TOKEN_ISSUER.to_string(),
            iat: now - 2 * 86_400,
            exp: now - 86_400,
        })
        .unwrap();

    let (status, body) = app.send(Method::GET, "/assets", Some(&expired), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "token_expired");
}

// =============================================================================
// Asset CRUD
// =============================================================================

#[tokio::test]
async fn create_list_and_update_asset() {
    let app = TestApp::with_prices();
    let token = app.login("alice", "alice-pw").await;
    let id = app.create(&token, "Ledger", "BTC", 0.5).await;

    let (status, body) = app.send(Method::GET, "/assets", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "id": id, "label": "Ledger", "currency": "BTC", "amount": 0.5 }])
    );

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/assets/{id}"),
            Some(&token),
            Some(json!({ "label": "Trezor", "currency": "LTC", "amount": 12.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let asset = app.state.store.get("alice", id).unwrap();
    assert_eq!(asset.label, "Trezor");
    assert_eq!(asset.amount, 12.0);
}

#[tokio::test]
async fn unsupported_currency_is_rejected_and_not_stored() {
    let app = TestApp::with_prices();
    let token = app.login("alice", "alice-pw").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/assets",
            Some(&token),
            Some(json!({ "label": "meme", "currency": "DOGE", "amount": 1000.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid currency 'DOGE'. Only BTC, ETH, LTC are supported."
    );
    assert!(app.state.store.list("alice").unwrap().is_empty());
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let app = TestApp::with_prices();
    let token = app.login("alice", "alice-pw").await;

    let (status, body) = app.send(Method::GET, "/assets/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid asset id"));
}

#[tokio::test]
async fn owners_are_isolated() {
    let app = TestApp::with_prices();
    let alice = app.login("alice", "alice-pw").await;
    let bob = app.login("bob", "bob-pw").await;
    let id = app.create(&alice, "alice-btc", "BTC", 1.0).await;

    let (status, body) = app.send(Method::GET, "/assets", Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = app
        .send(Method::GET, &format!("/assets/{id}"), Some(&bob), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/assets/{id}"),
            Some(&bob),
            Some(json!({ "label": "mine now", "currency": "ETH", "amount": 0.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(Method::DELETE, &format!("/assets/{id}"), Some(&bob), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let asset = app.state.store.get("alice", id).unwrap();
    assert_eq!(asset.label, "alice-btc");
    assert_eq!(asset.amount, 1.0);
}

#[tokio::test]
async fn delete_missing_asset_is_no_content() {
    let app = TestApp::with_prices();
    let token = app.login("alice", "alice-pw").await;
    let id = app.create(&token, "x", "ETH", 1.0).await;

    for _ in 0..2 {
        let (status, _) = app
            .send(Method::DELETE, &format!("/assets/{id}"), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    let (status, _) = app
        .send(Method::GET, &format!("/assets/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Valuation
// =============================================================================

#[tokio::test]
async fn get_includes_usd_value() {
    let app = TestApp::with_prices();
    let token = app.login("alice", "alice-pw").await;
    let id = app.create(&token, "eth", "ETH", 2.0).await;

    let (status, body) = app
        .send(Method::GET, &format!("/assets/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "id": id, "label": "eth", "currency": "ETH", "amount": 2.0, "usd_value": 6000.0 })
    );
}

#[tokio::test]
async fn total_value_sums_holdings() {
    let app = TestApp::with_prices();
    let token = app.login("alice", "alice-pw").await;
    app.create(&token, "btc", "BTC", 1.0).await;
    app.create(&token, "eth", "ETH", 2.0).await;

    let (status, body) = app
        .send(Method::GET, "/assets/value/total", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_usd"].as_f64().unwrap(), 56_000.0);
}

#[tokio::test]
async fn unavailable_rates_are_bad_gateway() {
    let app = TestApp::new(StaticRates::unavailable());
    let token = app.login("alice", "alice-pw").await;
    let id = app.create(&token, "btc", "BTC", 1.0).await;

    let (status, body) = app
        .send(Method::GET, &format!("/assets/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().starts_with("Rate fetch failed"));

    let (status, _) = app
        .send(Method::GET, "/assets/value/total", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_endpoints_are_public() {
    let app = TestApp::with_prices();

    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["storage"], "ok");

    let (status, body) = app.send(Method::GET, "/health/live", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
