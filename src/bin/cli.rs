//! DiVI CLI Client
//!
//! One-shot command-line interface for a running DiVI server.

use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream};
use std::process;

use clap::{Parser, Subcommand};
use divi::protocol::Response;
use divi::{DiviError, Result};

/// DiVI CLI
#[derive(Parser, Debug)]
#[command(name = "divi-cli")]
#[command(about = "CLI for the DiVI key-value and counter store")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:8000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Put a key-value pair
    Put {
        /// The key to put
        key: String,

        /// The value to put
        value: String,
    },

    /// Read a counter
    Count {
        /// The counter key to read
        key: String,
    },

    /// Increment a counter
    Inc {
        /// The counter key to increment
        key: String,
    },

    /// Send raw command text (newline-separated lines)
    Exec {
        /// The command text to send verbatim
        text: String,
    },
}

fn main() {
    let args = Args::parse();

    let text = match &args.command {
        Commands::Get { key } => format!("GET {}", key),
        Commands::Put { key, value } => format!("PUT {} {}", key, value),
        Commands::Count { key } => format!("COUNT {}", key),
        Commands::Inc { key } => format!("INC {}", key),
        Commands::Exec { text } => text.clone(),
    };

    match send(&args.server, &text) {
        Ok(Response::Ok { results }) => {
            for result in results {
                println!("{}", result);
            }
        }
        Ok(Response::Err { error }) => {
            eprintln!("server rejected request: {}", error);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("request failed: {}", e);
            process::exit(1);
        }
    }
}

/// Send one command text and read back the JSON envelope.
fn send(addr: &str, text: &str) -> Result<Response> {
    let mut stream = TcpStream::connect(addr)?;
    stream.write_all(text.as_bytes())?;
    stream.shutdown(Shutdown::Write)?;

    let mut body = String::new();
    stream.read_to_string(&mut body)?;

    serde_json::from_str(&body)
        .map_err(|e| DiviError::Protocol(format!("malformed response: {}", e)))
}
