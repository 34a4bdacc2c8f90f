//! Estadistica HTTP Routes
//!
//! Unauthenticated CRUD over visit statistics records.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::store::{EstadisticaFields, FieldValue, NewEstadistica, Record, Store};

use super::extract::Payload;
use super::DB_ERROR_MESSAGE;

pub const NOT_FOUND_MESSAGE: &str = "Estadística no encontrada.";
pub const INSERT_FAILED_MESSAGE: &str = "Error al insertar la estadística.";
pub const UPDATE_FAILED_MESSAGE: &str = "Error al actualizar la estadística.";
pub const DELETE_FAILED_MESSAGE: &str = "Error al eliminar la estadística.";
pub const DELETED_MESSAGE: &str = "Estadística eliminada con éxito.";

/// Routes served by this module, as `(method, path)`
pub const ESTADISTICA_ROUTES: &[(&str, &str)] = &[
    ("GET", "/estadisticas"),
    ("POST", "/estadisticas"),
    ("GET", "/estadisticas/:id"),
    ("PUT", "/estadisticas/:id"),
    ("DELETE", "/estadisticas/:id"),
];

/// Estadistica state shared across handlers
pub struct EstadisticaState {
    pub store: Store,
}

impl EstadisticaState {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct EstadisticasResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estadisticas: Option<Vec<Record>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body for single-record operations
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstadisticaResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estadistica: Option<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_estadistica: Option<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EstadisticaResponse {
    fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    fn failed(error: &str) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            ..Default::default()
        }
    }
}

type Reply = (StatusCode, Json<EstadisticaResponse>);

// ==================
// Estadistica Routes
// ==================

/// Create estadistica routes
pub fn estadistica_routes(state: Arc<EstadisticaState>) -> Router {
    Router::new()
        .route(
            "/estadisticas",
            get(list_estadisticas_handler).post(create_estadistica_handler),
        )
        .route(
            "/estadisticas/:id",
            get(get_estadistica_handler)
                .put(update_estadistica_handler)
                .delete(delete_estadistica_handler),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_estadisticas_handler(
    State(state): State<Arc<EstadisticaState>>,
) -> (StatusCode, Json<EstadisticasResponse>) {
    match state.store.list_estadisticas().await {
        Ok(rows) => (
            StatusCode::OK,
            Json(EstadisticasResponse {
                estadisticas: Some(rows),
                error: None,
            }),
        ),
        Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(EstadisticasResponse {
                estadisticas: None,
                error: Some(DB_ERROR_MESSAGE.to_string()),
            }),
        ),
    }
}

async fn get_estadistica_handler(
    State(state): State<Arc<EstadisticaState>>,
    Path(id): Path<String>,
) -> Reply {
    match state.store.get_estadistica(&id).await {
        Ok(Some(row)) => (
            StatusCode::OK,
            Json(EstadisticaResponse {
                estadistica: Some(row),
                ..EstadisticaResponse::ok()
            }),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(EstadisticaResponse::failed(NOT_FOUND_MESSAGE)),
        ),
        // Storage failures stay within the client-facing status set
        Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(EstadisticaResponse::failed(DB_ERROR_MESSAGE)),
        ),
    }
}

async fn create_estadistica_handler(
    State(state): State<Arc<EstadisticaState>>,
    Payload(body): Payload<NewEstadistica>,
) -> Reply {
    // The key is caller-supplied and required
    let Some(estadistica) = body.filter(|e| e.id.as_ref().is_some_and(FieldValue::is_truthy)) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(EstadisticaResponse::failed(INSERT_FAILED_MESSAGE)),
        );
    };

    match state.store.insert_estadistica(estadistica).await {
        Ok(true) => (StatusCode::CREATED, Json(EstadisticaResponse::ok())),
        Ok(false) | Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(EstadisticaResponse::failed(INSERT_FAILED_MESSAGE)),
        ),
    }
}

async fn update_estadistica_handler(
    State(state): State<Arc<EstadisticaState>>,
    Path(id): Path<String>,
    Payload(body): Payload<EstadisticaFields>,
) -> Reply {
    let Some(fields) = body else {
        return (
            StatusCode::BAD_REQUEST,
            Json(EstadisticaResponse::failed(UPDATE_FAILED_MESSAGE)),
        );
    };

    match state.store.update_estadistica(&id, &fields).await {
        Ok(true) => {
            // Separate round trip; not atomic with the update
            let updated = state.store.get_estadistica(&id).await.ok().flatten();
            (
                StatusCode::OK,
                Json(EstadisticaResponse {
                    updated_estadistica: updated,
                    ..EstadisticaResponse::ok()
                }),
            )
        }
        Ok(false) | Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(EstadisticaResponse::failed(UPDATE_FAILED_MESSAGE)),
        ),
    }
}

async fn delete_estadistica_handler(
    State(state): State<Arc<EstadisticaState>>,
    Path(id): Path<String>,
) -> Reply {
    match state.store.delete_estadistica(&id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(EstadisticaResponse {
                message: Some(DELETED_MESSAGE.to_string()),
                ..EstadisticaResponse::ok()
            }),
        ),
        Ok(false) | Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(EstadisticaResponse::failed(DELETE_FAILED_MESSAGE)),
        ),
    }
}
