//! Network Module
//!
//! TCP front end for the command pipeline.
//!
//! ## Architecture
//! - Single acceptor thread
//! - Worker thread pool for connections
//! - One request per connection: body read to EOF, one JSON response back
//! - Every worker shares one [`Bucket`](crate::store::Bucket) handle

mod connection;
mod pool;
mod server;

pub use connection::Connection;
pub use pool::WorkerPool;
pub use server::Server;
