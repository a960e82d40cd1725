//! Line Transport Tests
//!
//! Line framing, EOF reporting, and close behavior against a real TCP peer.

mod common;

use std::io::{BufReader, Write};
use std::net::TcpListener;

use common::{read_peer_line, send_line, spawn_peer, test_config};
use nimbusdb_client::transport::LineTransport;
use nimbusdb_client::NimbusError;

#[test]
fn test_connect_refused_is_connection_error() {
    // Grab a free port, then close the listener so nothing is there
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let err = LineTransport::connect(&test_config(port)).unwrap_err();
    assert!(matches!(err, NimbusError::Connection(_)), "got {:?}", err);
}

#[test]
fn test_write_then_read_line() {
    let (port, peer) = spawn_peer(|mut stream| {
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let request = read_peer_line(&mut reader).unwrap();
        send_line(&mut stream, "reply");
        vec![request]
    });

    let mut transport = LineTransport::connect(&test_config(port)).unwrap();
    transport.write_line("hello").unwrap();
    assert_eq!(transport.read_line().unwrap().as_deref(), Some("reply"));

    drop(transport);
    assert_eq!(peer.join().unwrap(), vec!["hello".to_string()]);
}

#[test]
fn test_read_line_strips_crlf() {
    let (port, peer) = spawn_peer(|mut stream| {
        stream.write_all(b"windows line\r\n").unwrap();
        stream.write_all(b"unix line\n").unwrap();
        stream.write_all(b"\n").unwrap();
        vec![]
    });

    let mut transport = LineTransport::connect(&test_config(port)).unwrap();
    assert_eq!(
        transport.read_line().unwrap().as_deref(),
        Some("windows line")
    );
    assert_eq!(transport.read_line().unwrap().as_deref(), Some("unix line"));

    // A bare terminator is an empty line, not EOF
    assert_eq!(transport.read_line().unwrap().as_deref(), Some(""));

    peer.join().unwrap();
}

#[test]
fn test_read_line_reports_eof_as_none() {
    let (port, peer) = spawn_peer(|stream| {
        drop(stream);
        vec![]
    });

    let mut transport = LineTransport::connect(&test_config(port)).unwrap();
    assert_eq!(transport.read_line().unwrap(), None);
    // EOF is sticky, not an error
    assert_eq!(transport.read_line().unwrap(), None);

    peer.join().unwrap();
}

#[test]
fn test_close_is_idempotent() {
    let (port, peer) = spawn_peer(|stream| {
        let mut reader = BufReader::new(stream);
        // Wait for the client to actually close
        assert!(read_peer_line(&mut reader).is_none());
        vec![]
    });

    let mut transport = LineTransport::connect(&test_config(port)).unwrap();
    transport.close();
    transport.close();

    // The socket is really gone: writing fails now
    assert!(transport.write_line("after close").is_err());

    peer.join().unwrap();
}
