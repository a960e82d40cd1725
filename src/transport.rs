//! Line Transport
//!
//! Owns the TCP connection and moves newline-delimited UTF-8 lines over it.

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::{Shutdown, TcpStream};

use crate::config::ClientConfig;
use crate::error::{NimbusError, Result};

/// A line-oriented view of a single TCP connection
pub struct LineTransport {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,

    /// Set once the socket has been shut down
    closed: bool,
}

impl LineTransport {
    /// Open a connection to the address in `config`
    ///
    /// Applies the socket options (nodelay, timeouts) before handing the
    /// transport back. Any failure while establishing the connection maps
    /// to [`NimbusError::Connection`].
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let addr = config.addr();
        let stream = TcpStream::connect(&addr)
            .map_err(|e| NimbusError::Connection(format!("cannot connect to {}: {}", addr, e)))?;

        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        Self::configure_socket(&stream, config)
            .map_err(|e| NimbusError::Connection(format!("cannot configure socket: {}", e)))?;

        // Clone stream for separate read/write handles
        let read_stream = stream
            .try_clone()
            .map_err(|e| NimbusError::Connection(format!("cannot clone stream: {}", e)))?;
        let write_stream = stream;

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
            closed: false,
        })
    }

    /// Apply socket options from the config
    fn configure_socket(stream: &TcpStream, config: &ClientConfig) -> std::io::Result<()> {
        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(config.tcp_nodelay)?;
        stream.set_read_timeout(config.read_timeout)?;
        stream.set_write_timeout(config.write_timeout)?;
        Ok(())
    }

    /// Write one line and flush it to the wire
    ///
    /// Appends the `\n` terminator; `line` itself must not contain one.
    /// The flush matters: the caller blocks on the reply next, so the
    /// request cannot sit in the write buffer.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        tracing::trace!("-> {}: {}", self.peer_addr, line);

        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Read one line, blocking until it arrives
    ///
    /// Returns `Ok(None)` when the peer has closed the connection (EOF).
    /// The line terminator is stripped; both `\n` and `\r\n` are accepted.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let bytes_read = self.reader.read_line(&mut line)?;

        if bytes_read == 0 {
            tracing::debug!("Peer {} closed the connection", self.peer_addr);
            return Ok(None);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }

        tracing::trace!("<- {}: {}", self.peer_addr, line);
        Ok(Some(line))
    }

    /// Shut the connection down in both directions
    ///
    /// Idempotent: repeated calls are no-ops. Shutdown also forces a read
    /// blocked on this socket (via a cloned handle) to return instead of
    /// hanging forever.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Err(e) = self.writer.get_ref().shutdown(Shutdown::Both) {
            // NotConnected just means the peer got there first
            if e.kind() != std::io::ErrorKind::NotConnected {
                tracing::debug!("Error shutting down socket to {}: {}", self.peer_addr, e);
            }
        } else {
            tracing::debug!("Closed connection to {}", self.peer_addr);
        }
    }

    /// A second handle on the underlying socket
    ///
    /// Used by the session to shut the socket down without waiting for
    /// the transport itself to become available.
    pub fn try_clone_stream(&self) -> std::io::Result<TcpStream> {
        self.reader.get_ref().try_clone()
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl std::fmt::Debug for LineTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineTransport")
            .field("peer_addr", &self.peer_addr)
            .field("closed", &self.closed)
            .finish()
    }
}
