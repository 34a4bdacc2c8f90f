//! CLI argument definitions using clap
//!
//! Commands:
//! - analitica serve --port <port> [--admin-key <key>] [--database <path>]
//! - analitica init [--database <path>]
//!
//! Every flag can also come from the environment (`PORT`, `ADMIN_KEY`, ...).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Default location of the SQLite database file
pub const DEFAULT_DATABASE_PATH: &str = "./.data/analitica.db";

/// analitica - HTTP API over a SQLite message log and visit statistics
#[derive(Parser, Debug)]
#[command(name = "analitica")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the store and serve the HTTP API
    Serve(ServeArgs),

    /// Create the Messages and estadistica tables, then exit
    Init(StoreArgs),
}

/// Location of the backing store
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Path to the SQLite database file
    #[arg(long, env = "DATABASE_PATH", default_value = DEFAULT_DATABASE_PATH)]
    pub database: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: u16,

    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Shared secret for message writes; without it every write is rejected
    #[arg(long, env = "ADMIN_KEY", hide_env_values = true)]
    pub admin_key: Option<String>,

    /// Allowed CORS origin (repeatable); none means any origin
    #[arg(long = "cors-origin", env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    #[command(flatten)]
    pub store: StoreArgs,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "analitica",
            "serve",
            "--port",
            "8080",
            "--admin-key",
            "secret123",
            "--database",
            "/tmp/a.db",
            "--cors-origin",
            "http://a.test,http://b.test",
        ])
        .unwrap();

        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.port, 8080);
                assert_eq!(args.admin_key.as_deref(), Some("secret123"));
                assert_eq!(args.store.database, PathBuf::from("/tmp/a.db"));
                assert_eq!(args.cors_origins, vec!["http://a.test", "http://b.test"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(Cli::try_parse_from(["analitica", "serve", "--port", "http"]).is_err());
    }

    #[test]
    fn test_init_database_flag() {
        let cli = Cli::try_parse_from(["analitica", "init", "--database", "x.db"]).unwrap();
        assert!(matches!(cli.command, Command::Init(args) if args.database == PathBuf::from("x.db")));
    }
}
