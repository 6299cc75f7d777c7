//! DiVI Server Binary
//!
//! Starts the TCP server over one process-wide bucket.

use std::sync::Arc;

use clap::Parser;
use divi::network::Server;
use divi::{Bucket, Config};
use tracing_subscriber::{fmt, EnvFilter};

const BANNER: &str = "
    _/_/_/    _/  _/      _/  _/_/_/
   _/    _/      _/      _/    _/
  _/    _/  _/  _/      _/    _/
 _/    _/  _/    _/  _/      _/
_/_/_/    _/      _/      _/_/_/";

/// DiVI Server
#[derive(Parser, Debug)]
#[command(name = "divi-server")]
#[command(about = "In-memory key-value and counter store for cluster coordination")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8000")]
    listen: String,

    /// Number of worker threads
    #[arg(short, long, default_value = "8")]
    workers: usize,

    /// Maximum request body size in KiB
    #[arg(short = 'm', long, default_value = "1024")]
    max_request_kb: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,divi=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    println!("{}", BANNER);
    println!("\nWelcome to DiVI.");

    tracing::info!("DiVI Server v{}", divi::VERSION);
    tracing::info!("Listen address: {}", args.listen);

    // Build config from args
    let config = Config::builder()
        .listen_addr(&args.listen)
        .worker_threads(args.workers)
        .max_request_bytes(args.max_request_kb * 1024)
        .build();

    // The single shared store for the whole process
    let bucket = Arc::new(Bucket::new());

    // Bind and start server
    let server = match Server::new(config, bucket) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", args.listen, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
