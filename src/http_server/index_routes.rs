//! Index Route
//!
//! `GET /` describes the API and lists every registered endpoint.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

pub const INDEX_ROUTES: &[(&str, &str)] = &[("GET", "/")];

const TITLE: &str = "Hello SQLite (blank)";
const INTRO: &str = "This is a database-backed API with the following endpoints";

#[derive(Debug, Clone, Serialize)]
pub struct IndexResponse {
    pub title: String,
    pub intro: String,
    pub routes: Vec<String>,
}

/// Index state: the endpoint listing, built once when the router is assembled
pub struct IndexState {
    pub endpoints: Vec<String>,
}

impl IndexState {
    /// Render `(method, path)` pairs as `"METHOD /path"`
    pub fn from_routes<'a>(routes: impl IntoIterator<Item = &'a (&'a str, &'a str)>) -> Self {
        Self {
            endpoints: routes
                .into_iter()
                .map(|(method, path)| format!("{} {}", method, path))
                .collect(),
        }
    }
}

pub fn index_routes(state: Arc<IndexState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .with_state(state)
}

async fn index_handler(State(state): State<Arc<IndexState>>) -> Json<IndexResponse> {
    Json(IndexResponse {
        title: TITLE.to_string(),
        intro: INTRO.to_string(),
        routes: state.endpoints.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_rendering() {
        let state = IndexState::from_routes(&[("GET", "/"), ("DELETE", "/message")]);
        assert_eq!(state.endpoints, vec!["GET /", "DELETE /message"]);
    }
}
