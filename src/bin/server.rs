//! deliq Server Binary
//!
//! Starts the TCP server for deliq.

use std::sync::Arc;

use clap::Parser;
use deliq::config::{DEFAULT_HOST, DEFAULT_PORT};
use deliq::network::Server;
use deliq::{Config, Engine};
use tracing_subscriber::{fmt, EnvFilter};

/// deliq Server
#[derive(Parser, Debug)]
#[command(name = "deliq-server")]
#[command(about = "In-memory work queue server")]
#[command(version)]
struct Args {
    /// Host/interface to bind
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Close connections idle for this long (milliseconds, 0 = never)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Give up on writes that block this long (milliseconds, 0 = never)
    #[arg(long, default_value = "0")]
    write_timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,deliq=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("deliq Server v{}", deliq::VERSION);

    let config = Config::builder()
        .listen_addr(format!("{}:{}", args.host, args.port))
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .build();

    let server = match Server::bind(config, Arc::new(Engine::new())) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    let shutdown = match server.shutdown_handle() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!("Failed to create shutdown handle: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = ctrlc::set_handler(move || {
        tracing::info!("Received Ctrl+C, initiating shutdown...");
        shutdown.shutdown();
    }) {
        tracing::warn!("Could not install Ctrl+C handler: {}", e);
    }

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
