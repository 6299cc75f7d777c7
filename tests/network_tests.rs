//! Network Tests
//!
//! End-to-end request/response round trips over a real TCP server.

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread;

use divi::network::Server;
use divi::{Bucket, Config};

/// Bind a server on an ephemeral port and run it on a background thread.
fn start_server(config_builder: impl FnOnce() -> Config) -> SocketAddr {
    let mut config = config_builder();
    config.listen_addr = "127.0.0.1:0".to_string();

    let bucket = Arc::new(Bucket::new());
    let server = Server::new(config, bucket).unwrap();
    let addr = server.local_addr().unwrap();

    thread::spawn(move || {
        let _ = server.run();
    });

    addr
}

/// Send one request body and read the whole response.
fn request(addr: SocketAddr, body: &str) -> String {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(body.as_bytes()).unwrap();
    stream.shutdown(Shutdown::Write).unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

#[test]
fn test_request_round_trip() {
    let addr = start_server(Config::default);

    let response = request(addr, "GET key\nPUT key value\nGET key");

    assert_eq!(response, r#"{"results":["","$ok","value"]}"#);
}

#[test]
fn test_state_survives_across_requests() {
    let addr = start_server(Config::default);

    assert_eq!(request(addr, "PUT key value"), r#"{"results":["$ok"]}"#);
    assert_eq!(request(addr, "GET key"), r#"{"results":["value"]}"#);
    assert_eq!(request(addr, "INC n\nINC n"), r#"{"results":["1","2"]}"#);
    assert_eq!(request(addr, "COUNT n"), r#"{"results":["2"]}"#);
}

#[test]
fn test_compile_failure_returns_error_envelope() {
    let addr = start_server(Config::default);

    let response = request(addr, "FOO key");

    assert_eq!(response, r#"{"error":"line 1: unknown operation \"FOO\""}"#);
}

#[test]
fn test_failed_request_mutates_nothing() {
    let addr = start_server(Config::default);

    // The PUT on line 1 compiles but must never execute.
    let response = request(addr, "PUT key value\nFOO key");
    assert!(response.starts_with(r#"{"error":"#), "got: {}", response);

    assert_eq!(request(addr, "GET key"), r#"{"results":[""]}"#);
}

#[test]
fn test_oversized_body_is_rejected() {
    let addr = start_server(|| Config::builder().max_request_bytes(16).build());

    let response = request(addr, "PUT key averylongvaluepastthecap");

    assert!(response.starts_with(r#"{"error":"#), "got: {}", response);
}

#[test]
fn test_concurrent_clients_share_one_store() {
    const CLIENTS: usize = 8;

    let addr = start_server(Config::default);

    let handles: Vec<_> = (0..CLIENTS)
        .map(|_| thread::spawn(move || request(addr, "INC shared")))
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        request(addr, "COUNT shared"),
        format!(r#"{{"results":["{}"]}}"#, CLIENTS)
    );
}
