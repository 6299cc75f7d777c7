//! Connection Handler
//!
//! Handles individual client connections.

use std::io::{BufReader, BufWriter, Read, Write};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{DiviError, Result};
use crate::plan::{LogicalPlan, OpResult};
use crate::protocol::{decode_body, Response};
use crate::store::Bucket;

/// Handles a single client connection
///
/// The protocol is one-shot: the client writes its command text and shuts
/// down its write side; the server answers with one JSON object and
/// closes.
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// The process-wide shared store
    bucket: Arc<Bucket>,

    /// Request body cap, enforced before parsing
    max_request_bytes: usize,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O on separate read/write handles.
    pub fn new(stream: TcpStream, bucket: Arc<Bucket>, max_request_bytes: usize) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            bucket,
            max_request_bytes,
            peer_addr,
        })
    }

    /// Configure connection timeouts
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read_stream = self.reader.get_ref();
        let write_stream = self.writer.get_ref();

        if read_ms > 0 {
            read_stream.set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            write_stream.set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }

        Ok(())
    }

    /// Handle the connection: read the request, run the pipeline, answer.
    ///
    /// Disconnects and timeouts while reading are treated as normal ends;
    /// a request that fails to parse or compile gets an error envelope and
    /// leaves the bucket untouched.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        // Read the whole body, bounded one byte past the cap so the
        // protocol layer can report the overflow.
        let mut body = Vec::new();
        let limit = self.max_request_bytes as u64 + 1;
        match self.reader.by_ref().take(limit).read_to_end(&mut body) {
            Ok(_) => {}
            Err(ref e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::UnexpectedEof
                        | std::io::ErrorKind::ConnectionReset
                        | std::io::ErrorKind::ConnectionAborted
                ) =>
            {
                tracing::debug!("Client {} disconnected mid-request", self.peer_addr);
                return Ok(());
            }
            Err(ref e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                ) =>
            {
                tracing::debug!("Read timeout for client {}", self.peer_addr);
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                return Err(e.into());
            }
        }

        let response = match self.run_plan(body) {
            Ok(results) => Response::from_results(&results),
            Err(ref e) if e.is_client_error() => {
                tracing::warn!("Bad request from {}: {}", self.peer_addr, e);
                // An oversized body is only partially read at this point;
                // drain the rest so closing the socket does not reset the
                // connection underneath the response.
                let _ = std::io::copy(&mut self.reader, &mut std::io::sink());
                Response::from_error(e)
            }
            Err(e) => {
                tracing::warn!("Error handling request from {}: {}", self.peer_addr, e);
                let _ = self.send_response(&Response::from_error(&e));
                return Err(e);
            }
        };

        self.send_response(&response)
    }

    /// Run the full pipeline for one request body.
    fn run_plan(&self, body: Vec<u8>) -> Result<Vec<OpResult>> {
        let text = decode_body(body, self.max_request_bytes)?;
        let plan = LogicalPlan::from_text(&text)?;

        tracing::trace!("Plan from {}: {} op(s)", self.peer_addr, plan.len());

        Ok(plan.execute(&self.bucket))
    }

    /// Send a response to the client
    fn send_response(&mut self, response: &Response) -> Result<()> {
        if let Err(e) = self.write_response(response) {
            // If the client disconnected before we could send the response,
            // log and exit gracefully rather than treating it as a server
            // error.
            if let DiviError::Io(ref io_err) = e {
                match io_err.kind() {
                    std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::BrokenPipe => {
                        tracing::debug!(
                            "Client {} disconnected before response could be sent: {}",
                            self.peer_addr,
                            e
                        );
                        return Ok(());
                    }
                    _ => {}
                }
            }
            tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
            return Err(e);
        }
        Ok(())
    }

    fn write_response(&mut self, response: &Response) -> Result<()> {
        serde_json::to_writer(&mut self.writer, response)
            .map_err(|e| DiviError::Protocol(format!("failed to encode response: {}", e)))?;
        self.writer.flush()?;
        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
