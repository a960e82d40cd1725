//! Shared test helpers
//!
//! A scripted single-connection TCP peer standing in for a NimbusDB
//! server, plus canned protocol lines.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use nimbusdb_client::ClientConfig;

/// Welcome line sent by the peer before anything else
pub const WELCOME: &str = "Connected to NimbusDB. Send a query or use FETCH.";

/// Successful login reply
pub const LOGIN_OK: &str = r#"{"Status":"ok","Message":"Login successful"}"#;

/// Rejected login reply
pub const LOGIN_REJECTED: &str = r#"{"Status":"error","Message":"Invalid username or password"}"#;

/// Config pointing at a peer on localhost
///
/// Carries a generous read timeout so a broken test fails instead of
/// hanging the suite.
pub fn test_config(port: u16) -> ClientConfig {
    ClientConfig::builder()
        .host("127.0.0.1")
        .port(port)
        .username("admin")
        .password("secret")
        .read_timeout(Some(Duration::from_secs(5)))
        .build()
}

/// Spawn a server that accepts exactly one connection on an ephemeral port
///
/// The closure plays the server side of the conversation; whatever lines
/// it collects come back through the join handle.
pub fn spawn_peer<F>(serve: F) -> (u16, JoinHandle<Vec<String>>)
where
    F: FnOnce(TcpStream) -> Vec<String> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        serve(stream)
    });
    (port, handle)
}

/// Write one line to the client
pub fn send_line(stream: &mut TcpStream, line: &str) {
    stream.write_all(line.as_bytes()).unwrap();
    stream.write_all(b"\n").unwrap();
}

/// Read one line from the client; `None` on EOF
pub fn read_peer_line(reader: &mut BufReader<TcpStream>) -> Option<String> {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim_end().to_string()),
        Err(_) => None,
    }
}

/// Play the server side of a successful handshake
///
/// Sends the welcome, consumes the LOGIN line, and confirms it. Returns
/// the reader for the rest of the conversation plus the raw LOGIN line.
pub fn accept_login(stream: &mut TcpStream) -> (BufReader<TcpStream>, String) {
    send_line(stream, WELCOME);
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let login = read_peer_line(&mut reader).expect("client should send LOGIN");
    send_line(stream, LOGIN_OK);
    (reader, login)
}
