//! Message HTTP Routes
//!
//! Read access to the message log is open. Writes require the `admin_key`
//! header and answer `201` on success for POST, PUT and DELETE alike.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::{AdminKey, AuthError, ADMIN_KEY_HEADER};
use crate::store::{FieldValue, Record, Store, StoreResult};

use super::extract::Payload;
use super::DB_ERROR_MESSAGE;

/// Routes served by this module, as `(method, path)`
pub const MESSAGE_ROUTES: &[(&str, &str)] = &[
    ("GET", "/messages"),
    ("POST", "/message"),
    ("PUT", "/message"),
    ("DELETE", "/message"),
];

// ==================
// Shared State
// ==================

/// Message state shared across handlers
pub struct MessageState {
    pub store: Store,
    pub admin_key: AdminKey,
}

impl MessageState {
    pub fn new(store: Store, admin_key: AdminKey) -> Self {
        Self { store, admin_key }
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let supplied = headers
            .get(ADMIN_KEY_HEADER)
            .and_then(|v| v.to_str().ok());
        self.admin_key.authorize(supplied)
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat: Option<Vec<Record>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WriteResponse {
    pub success: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub id: Option<FieldValue>,
    #[serde(default)]
    pub message: Option<FieldValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MessageIdQuery {
    #[serde(default)]
    pub id: Option<String>,
}

// ==================
// Message Routes
// ==================

/// Create message routes
pub fn message_routes(state: Arc<MessageState>) -> Router {
    Router::new()
        .route("/messages", get(list_messages_handler))
        .route(
            "/message",
            post(add_message_handler)
                .put(update_message_handler)
                .delete(delete_message_handler),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

type WriteReply = (StatusCode, Json<WriteResponse>);

fn reply(status: StatusCode) -> WriteReply {
    let success = status == StatusCode::CREATED;
    (status, Json(WriteResponse { success }))
}

fn unauthorized(operation: &str, err: AuthError) -> WriteReply {
    warn!(operation, reason = %err, "Rejected message write");
    reply(StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::UNAUTHORIZED))
}

fn write_outcome(result: StoreResult<bool>) -> WriteReply {
    match result {
        Ok(true) => reply(StatusCode::CREATED),
        Ok(false) | Err(_) => reply(StatusCode::BAD_REQUEST),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Any truthy scalar is accepted as message text
fn message_text(value: Option<FieldValue>) -> Option<String> {
    value.filter(FieldValue::is_truthy).map(FieldValue::into_text)
}

// ==================
// Handlers
// ==================

async fn list_messages_handler(
    State(state): State<Arc<MessageState>>,
) -> (StatusCode, Json<MessagesResponse>) {
    match state.store.list_messages().await {
        Ok(chat) => {
            debug!(count = chat.len(), "Listing messages");
            (
                StatusCode::OK,
                Json(MessagesResponse {
                    chat: Some(chat),
                    error: None,
                }),
            )
        }
        Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(MessagesResponse {
                chat: None,
                error: Some(DB_ERROR_MESSAGE.to_string()),
            }),
        ),
    }
}

async fn add_message_handler(
    State(state): State<Arc<MessageState>>,
    headers: HeaderMap,
    Payload(body): Payload<MessageBody>,
) -> WriteReply {
    if let Err(e) = state.authorize(&headers) {
        return unauthorized("add_message", e);
    }

    let Some(message) = message_text(body.and_then(|b| b.message)) else {
        return reply(StatusCode::BAD_REQUEST);
    };

    write_outcome(state.store.insert_message(&message).await)
}

async fn update_message_handler(
    State(state): State<Arc<MessageState>>,
    headers: HeaderMap,
    Payload(body): Payload<MessageBody>,
) -> WriteReply {
    if let Err(e) = state.authorize(&headers) {
        return unauthorized("update_message", e);
    }

    let MessageBody { id, message } = body.unwrap_or_default();
    let (Some(id), Some(message)) = (id.filter(FieldValue::is_truthy), message_text(message)) else {
        return reply(StatusCode::BAD_REQUEST);
    };

    write_outcome(state.store.update_message(&id, &message).await)
}

async fn delete_message_handler(
    State(state): State<Arc<MessageState>>,
    headers: HeaderMap,
    query: Option<Query<MessageIdQuery>>,
) -> WriteReply {
    if let Err(e) = state.authorize(&headers) {
        return unauthorized("delete_message", e);
    }

    let Some(id) = non_empty(query.and_then(|Query(q)| q.id)) else {
        return reply(StatusCode::BAD_REQUEST);
    };

    write_outcome(state.store.delete_message(&id).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_success_flag_follows_status() {
        assert!(reply(StatusCode::CREATED).1.success);
        assert!(!reply(StatusCode::BAD_REQUEST).1.success);
        assert!(!reply(StatusCode::UNAUTHORIZED).1.success);
    }

    #[test]
    fn test_storage_error_is_bad_request() {
        let (status, _) = write_outcome(Err(sqlx::Error::PoolClosed.into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = write_outcome(Ok(false));
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unauthorized_reply() {
        let (status, Json(body)) = unauthorized("add_message", AuthError::MissingKey);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!body.success);
    }

    #[test]
    fn test_message_text_accepts_truthy_scalars() {
        assert_eq!(message_text(Some(FieldValue::Integer(42))), Some("42".to_string()));
        assert_eq!(message_text(Some(FieldValue::from("hola"))), Some("hola".to_string()));
        assert_eq!(message_text(Some(FieldValue::Integer(0))), None);
        assert_eq!(message_text(Some(FieldValue::from(""))), None);
        assert_eq!(message_text(None), None);
    }

    #[test]
    fn test_messages_response_omits_missing_fields() {
        let body = MessagesResponse {
            chat: None,
            error: Some(DB_ERROR_MESSAGE.to_string()),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("chat").is_none());
        assert_eq!(json["error"], DB_ERROR_MESSAGE);
    }
}
