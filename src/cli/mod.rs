//! CLI module for analitica
//!
//! Provides command-line interface for:
//! - serve: Open the store and run the HTTP API
//! - init: Create the database schema and exit

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, ServeArgs, StoreArgs, DEFAULT_DATABASE_PATH};
pub use commands::{init, run, run_command, serve, AppConfig};
pub use errors::{CliError, CliErrorCode, CliResult};
