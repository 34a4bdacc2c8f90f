//! HTTP test harness
//!
//! Builds the full router over an in-memory store and drives it with
//! `tower::ServiceExt::oneshot`, no socket involved.

#![allow(dead_code)]

use analitica::auth::{AdminKey, ADMIN_KEY_HEADER};
use analitica::http_server::{HttpServer, HttpServerConfig};
use analitica::store::{Store, StoreLocation};
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "secret123";

/// A router plus a handle on its store, for checking side effects directly
pub struct TestApp {
    pub router: Router,
    pub store: Store,
}

impl TestApp {
    /// App with the `estadistica` table created and `ADMIN_KEY=secret123`
    pub async fn new() -> Self {
        Self::with_admin_key(Some(SECRET)).await
    }

    pub async fn with_admin_key(admin_key: Option<&str>) -> Self {
        let store = Store::open(&StoreLocation::InMemory).await.unwrap();
        store.create_estadistica_table().await.unwrap();
        Self::build(store, admin_key)
    }

    /// App whose store has no `estadistica` table
    pub async fn without_estadistica_table() -> Self {
        let store = Store::open(&StoreLocation::InMemory).await.unwrap();
        Self::build(store, Some(SECRET))
    }

    fn build(store: Store, admin_key: Option<&str>) -> Self {
        let admin_key = AdminKey::new(admin_key.map(String::from));
        let router = HttpServer::new(HttpServerConfig::default(), store.clone(), admin_key).router();
        Self { router, store }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(request("GET", uri, None, None)).await
    }

    pub async fn message_texts(&self) -> Vec<String> {
        self.store
            .list_messages()
            .await
            .unwrap()
            .iter()
            .filter_map(|row| row["message"].as_str().map(String::from))
            .collect()
    }
}

/// Build a request with an optional `admin_key` header and JSON body
pub fn request(method: &str, uri: &str, admin_key: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = admin_key {
        builder = builder.header(ADMIN_KEY_HEADER, key);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

/// Build a form-encoded request
pub fn form_request(method: &str, uri: &str, admin_key: Option<&str>, body: &'static str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(key) = admin_key {
        builder = builder.header(ADMIN_KEY_HEADER, key);
    }
    builder.body(Body::from(body)).unwrap()
}
