//! CLI command implementations
//!
//! Configuration is resolved once, the store is opened and bootstrapped, and
//! only then does the HTTP listener start accepting connections.

use tracing::{info, warn};

use crate::auth::AdminKey;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::store::{Store, StoreLocation};

use super::args::{Command, ServeArgs, StoreArgs};
use super::errors::{CliError, CliResult};

/// Runtime configuration for `serve`
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: HttpServerConfig,
    pub store: StoreLocation,
    pub admin_key: AdminKey,
}

impl AppConfig {
    /// Build and validate the configuration from parsed arguments
    pub fn from_serve_args(args: ServeArgs) -> CliResult<Self> {
        let config = Self {
            server: HttpServerConfig {
                host: args.host,
                port: args.port,
                cors_origins: args.cors_origins,
            },
            store: StoreLocation::File(args.store.database),
            admin_key: AdminKey::new(args.admin_key),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.server.port == 0 {
            return Err(CliError::config_error("PORT must be > 0"));
        }

        if self.server.host.trim().is_empty() {
            return Err(CliError::config_error("HOST must not be empty"));
        }

        Ok(())
    }
}

/// Parse arguments, install logging and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();

    crate::observability::init_tracing()
        .map_err(|e| CliError::boot_failed(format!("Failed to initialize logging: {}", e)))?;

    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    match cmd {
        Command::Serve(args) => {
            let config = AppConfig::from_serve_args(args)?;
            rt.block_on(serve(config))
        }
        Command::Init(args) => rt.block_on(init(args)),
    }
}

/// Open the store, then serve the HTTP API until the process exits
pub async fn serve(config: AppConfig) -> CliResult<()> {
    let store = Store::open(&config.store).await?;

    if !config.admin_key.is_configured() {
        warn!("ADMIN_KEY is not set; all message writes will be rejected");
    }

    let server = HttpServer::new(config.server, store, config.admin_key);
    info!(address = %server.socket_addr(), "Starting analitica HTTP server");

    server
        .start()
        .await
        .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
}

/// Create both tables in the store at `args.database`
pub async fn init(args: StoreArgs) -> CliResult<()> {
    let store = Store::open(&StoreLocation::File(args.database)).await?;
    store.create_estadistica_table().await?;
    info!("Store initialized");
    Ok(())
}
