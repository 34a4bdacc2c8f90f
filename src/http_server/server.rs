//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::AdminKey;
use crate::store::Store;

use super::config::HttpServerConfig;
use super::estadistica_routes::{estadistica_routes, EstadisticaState, ESTADISTICA_ROUTES};
use super::index_routes::{index_routes, IndexState, INDEX_ROUTES};
use super::message_routes::{message_routes, MessageState, MESSAGE_ROUTES};

/// HTTP Server for the analitica API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over an already opened store
    pub fn new(config: HttpServerConfig, store: Store, admin_key: AdminKey) -> Self {
        let router = Self::build_router(&config, store, admin_key);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, store: Store, admin_key: AdminKey) -> Router {
        let index_state = Arc::new(IndexState::from_routes(
            INDEX_ROUTES
                .iter()
                .chain(MESSAGE_ROUTES)
                .chain(ESTADISTICA_ROUTES),
        ));
        let message_state = Arc::new(MessageState::new(store.clone(), admin_key));
        let estadistica_state = Arc::new(EstadisticaState::new(store));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(index_routes(index_state))
            .merge(message_routes(message_state))
            .merge(estadistica_routes(estadistica_state))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the listener and serve until the process exits
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(address = %addr, "Your app is listening");

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
