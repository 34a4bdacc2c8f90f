//! analitica - HTTP API over a SQLite message log and visit statistics
//!
//! - [`store`]: the single SQLite connection and one function per CRUD operation
//! - [`http_server`]: routes mapping HTTP requests onto store operations
//! - [`auth`]: admin-key authorization for message writes
//! - [`cli`]: configuration and process entry point
//! - [`observability`]: tracing setup

pub mod auth;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod store;
