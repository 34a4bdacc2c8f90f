//! # HTTP Server Module
//!
//! The request router for analitica. Each route module maps an HTTP verb and
//! path onto one store operation and turns the outcome into a status code and
//! JSON body.
//!
//! # Endpoints
//!
//! - `GET /` - Endpoint listing
//! - `/messages`, `/message` - Message log (writes need the `admin_key` header)
//! - `/estadisticas`, `/estadisticas/:id` - Visit statistics

pub mod config;
pub mod estadistica_routes;
pub mod extract;
pub mod index_routes;
pub mod message_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;

/// Body text for reads that could not reach the store
pub const DB_ERROR_MESSAGE: &str = "Whoops! Error connecting to the database–please try again!";
