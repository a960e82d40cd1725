//! Session
//!
//! The protocol state machine: an authenticated connection that exchanges
//! strictly paired request/response lines with the server.

use std::fmt;
use std::net::{Shutdown, TcpStream};

use parking_lot::Mutex;

use crate::config::ClientConfig;
use crate::error::{NimbusError, Result};
use crate::protocol::{
    commands, decode_response, encode_request, login_reply_ok, Request, Response,
};
use crate::transport::LineTransport;

/// Lifecycle states of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Connected but the LOGIN exchange has not completed. Sessions are
    /// only handed to callers after authentication, so this state is
    /// internal to construction.
    Unauthenticated,

    /// Handshake succeeded; requests are permitted
    Authenticated,

    /// Closed by the client; no further I/O
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Unauthenticated => "unauthenticated",
            SessionState::Authenticated => "authenticated",
            SessionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// An authenticated connection to a NimbusDB server
///
/// The wire protocol carries no correlation ids, so the Nth request line
/// must pair with the Nth response line. `Session` enforces that pairing
/// by holding an internal lock for the full write+read round trip: it is
/// safe to share across threads, and requests serialize one at a time.
pub struct Session {
    /// Transport guarded for the whole round trip. `None` once closed.
    transport: Mutex<Option<LineTransport>>,

    /// Second handle on the socket, used only to break a blocked read
    /// when the session is closed from another thread. Deliberately not
    /// behind the transport lock: the lock may be held by the very
    /// request that close() is meant to unblock.
    socket: TcpStream,

    /// Current lifecycle state. Guarded separately from the transport so
    /// state queries never wait behind an in-flight request.
    state: Mutex<SessionState>,

    /// Peer address for logging
    peer_addr: String,
}

impl Session {
    /// Connect to the server and authenticate
    ///
    /// Runs the fixed handshake: read the server's welcome line, send
    /// `LOGIN` with `"<username>,<password>"`, and verify the reply. The
    /// returned session is authenticated and ready for requests. Every
    /// failure path closes the socket before returning, so a failed
    /// construction leaves nothing open.
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let mut transport = LineTransport::connect(config)?;

        let socket = match transport.try_clone_stream() {
            Ok(socket) => socket,
            Err(e) => {
                transport.close();
                return Err(NimbusError::Connection(format!(
                    "cannot clone stream: {}",
                    e
                )));
            }
        };

        if let Err(e) = Self::handshake(&mut transport, config) {
            transport.close();
            return Err(e);
        }

        let peer_addr = transport.peer_addr().to_string();
        tracing::debug!("Session authenticated as {} on {}", config.username, peer_addr);

        Ok(Self {
            transport: Mutex::new(Some(transport)),
            socket,
            state: Mutex::new(SessionState::Authenticated),
            peer_addr,
        })
    }

    /// Run the LOGIN handshake on a fresh transport
    fn handshake(transport: &mut LineTransport, config: &ClientConfig) -> Result<()> {
        // The server speaks first. The welcome content is free-form and
        // deliberately not interpreted.
        let welcome = transport.read_line()?.ok_or_else(|| {
            NimbusError::Protocol("connection closed by peer before welcome".to_string())
        })?;
        tracing::debug!("Server welcome: {}", welcome);

        let credentials = format!("{},{}", config.username, config.password);
        let login = Request::new(commands::LOGIN, Some(&credentials));
        transport.write_line(&encode_request(&login))?;

        let reply = transport.read_line()?.ok_or_else(|| {
            NimbusError::Protocol("connection closed by peer during login".to_string())
        })?;

        if !login_reply_ok(&reply) {
            let response = decode_response(&reply);
            let message = response.message.unwrap_or(reply);
            tracing::debug!("Login rejected: {}", message);
            return Err(NimbusError::Authentication(message));
        }

        Ok(())
    }

    /// Send one request and wait for its response
    ///
    /// This is the unit of mutual exclusion: the internal lock is held
    /// from the moment the request line is written until its response
    /// line has been read, so concurrent callers serialize and responses
    /// can never be attributed to the wrong request.
    ///
    /// An empty command is rejected before any I/O: it would produce a
    /// line the server cannot attribute, desynchronizing the stream.
    pub fn send_request(&self, command: &str, data: Option<&str>) -> Result<Response> {
        let state = *self.state.lock();
        if state != SessionState::Authenticated {
            return Err(NimbusError::InvalidState(state));
        }

        if command.is_empty() {
            return Err(NimbusError::Protocol("command must not be empty".to_string()));
        }

        let line = encode_request(&Request::new(command, data));

        let mut guard = self.transport.lock();
        let transport = guard
            .as_mut()
            .ok_or(NimbusError::InvalidState(SessionState::Closed))?;

        tracing::trace!("Request {} -> {}", command, self.peer_addr);
        transport.write_line(&line)?;

        match transport.read_line()? {
            Some(reply) => Ok(decode_response(&reply)),
            None => Err(NimbusError::Protocol(
                "connection closed by peer".to_string(),
            )),
        }
    }

    /// Close the session
    ///
    /// Idempotent. The socket is shut down first, outside the round-trip
    /// lock, so a request blocked in a read on another thread fails with
    /// an error instead of hanging; only then is the transport released.
    pub fn close(&self) {
        if let Err(e) = self.socket.shutdown(Shutdown::Both) {
            if e.kind() != std::io::ErrorKind::NotConnected {
                tracing::debug!("Error shutting down socket to {}: {}", self.peer_addr, e);
            }
        }

        *self.state.lock() = SessionState::Closed;

        if let Some(mut transport) = self.transport.lock().take() {
            transport.close();
            tracing::debug!("Session to {} closed", self.peer_addr);
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    /// Whether the session is open and authenticated
    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("peer_addr", &self.peer_addr)
            .field("state", &self.state())
            .finish()
    }
}
