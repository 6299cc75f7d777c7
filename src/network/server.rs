//! TCP Server
//!
//! Accepts connections and dispatches to worker threads.

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::store::Bucket;
use super::{Connection, WorkerPool};

/// TCP server for DiVI
///
/// Binds eagerly so the listen address (possibly port 0) is resolved at
/// construction; every accepted connection is serviced on the worker pool
/// with a clone of the shared bucket handle.
pub struct Server {
    config: Config,
    bucket: Arc<Bucket>,
    listener: TcpListener,
}

impl Server {
    /// Create a server bound to the config's listen address
    pub fn new(config: Config, bucket: Arc<Bucket>) -> Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr)?;
        Ok(Server {
            config,
            bucket,
            listener,
        })
    }

    /// The address the server is actually bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Start accepting connections (blocking).
    ///
    /// Runs until the listener fails; individual connection errors are
    /// logged and do not tear the server down.
    pub fn run(&self) -> Result<()> {
        tracing::info!("Listening on {}", self.local_addr()?);

        let pool = WorkerPool::new(self.config.worker_threads)?;

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    let bucket = Arc::clone(&self.bucket);
                    let max_request_bytes = self.config.max_request_bytes;
                    let read_ms = self.config.read_timeout_ms;
                    let write_ms = self.config.write_timeout_ms;

                    pool.spawn(move || {
                        let served = Connection::new(stream, bucket, max_request_bytes)
                            .and_then(|mut conn| {
                                conn.set_timeouts(read_ms, write_ms)?;
                                conn.handle()
                            });
                        if let Err(e) = served {
                            tracing::error!("Error serving client: {}", e);
                        }
                    });
                }
                Err(e) => tracing::error!("Connection failed: {}", e),
            }
        }

        Ok(())
    }
}
