//! Observability for analitica
//!
//! Structured logging through `tracing`. Request-level spans come from the
//! `TraceLayer` installed by the HTTP server.
//!
//! # Usage
//!
//! ```ignore
//! use analitica::observability::init_tracing;
//!
//! init_tracing()?;
//! tracing::info!(port = 3000, "listening");
//! ```

mod logger;

pub use logger::{env_filter, init_tracing, DEFAULT_LOG_FILTER};
