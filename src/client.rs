//! High-level client
//!
//! Wraps an authenticated [`Session`] with a fluent method per database,
//! collection, document, and profile operation, plus the named control
//! commands the server understands.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::protocol::{commands, Response};
use crate::query;
use crate::session::Session;

/// A connected, authenticated NimbusDB client
pub struct Client {
    /// The underlying session; owns the connection
    session: Session,

    /// Advisory cursor: the last database selected with a successful
    /// [`use_database`](Self::use_database). The server keeps the
    /// authoritative selection per session; this is client-side
    /// bookkeeping only and is never sent on the wire.
    current_database: Option<String>,
}

impl Client {
    /// Connect to the server and authenticate
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            session: Session::connect(config)?,
            current_database: None,
        })
    }

    // =========================================================================
    // Control Commands
    // =========================================================================

    /// Execute a raw command expression
    ///
    /// The expression is sent as the request's `Command` field with no
    /// payload. Every fluent method below goes through here; use it
    /// directly for expressions the builders do not cover.
    pub fn execute(&self, expression: &str) -> Result<Response> {
        self.session.send_request(expression, None)
    }

    /// Retrieve the result stored by the last executed query
    pub fn fetch(&self) -> Result<Response> {
        self.session.send_request(commands::FETCH, None)
    }

    /// Toggle server-side debug logging for this session
    pub fn set_debug(&self, enabled: bool) -> Result<Response> {
        let flag = if enabled { "true" } else { "false" };
        self.session.send_request(commands::DEBUG, Some(flag))
    }

    /// Describe the profile this session is authenticated as
    pub fn server_profile(&self) -> Result<Response> {
        self.session.send_request(commands::PROFILE, None)
    }

    /// Tell the server to end the session, then close the connection
    pub fn quit(self) -> Result<Response> {
        let response = self.session.send_request(commands::QUIT, None)?;
        self.session.close();
        Ok(response)
    }

    // =========================================================================
    // Database Operations
    // =========================================================================

    /// Create a database
    pub fn create_database(&self, name: &str) -> Result<Response> {
        self.execute(&query::create_database(name))
    }

    /// Select the database that later operations target
    ///
    /// On success the advisory [`current_database`](Self::current_database)
    /// cursor is updated; on failure it is left untouched.
    pub fn use_database(&mut self, name: &str) -> Result<Response> {
        let response = self.execute(&query::use_database(name))?;
        if response.is_success() {
            self.current_database = Some(name.to_string());
            tracing::debug!("Current database set to {}", name);
        }
        Ok(response)
    }

    /// Drop a database by name
    pub fn drop_database(&self, name: &str) -> Result<Response> {
        self.execute(&query::drop_database(name))
    }

    /// Drop the currently selected database
    pub fn drop_current_database(&self) -> Result<Response> {
        self.execute(&query::drop_current_database())
    }

    /// List all databases
    pub fn list_databases(&self) -> Result<Response> {
        self.execute(&query::list_databases())
    }

    // =========================================================================
    // Collection Operations
    // =========================================================================

    /// Create a collection in the currently selected database
    pub fn create_collection(&self, name: &str) -> Result<Response> {
        self.execute(&query::create_collection(name))
    }

    /// Drop a collection
    pub fn drop_collection(&self, name: &str) -> Result<Response> {
        self.execute(&query::drop_collection(name))
    }

    /// List collections in the currently selected database
    pub fn list_collections(&self) -> Result<Response> {
        self.execute(&query::list_collections())
    }

    // =========================================================================
    // Document Operations
    //
    // `document`, `filter`, and `changes` are raw JSON fragments and are
    // passed through to the server untouched.
    // =========================================================================

    /// Insert a document into a collection
    pub fn insert(&self, collection: &str, document: &str) -> Result<Response> {
        self.execute(&query::insert(collection, document))
    }

    /// Find documents matching a filter
    pub fn find(&self, collection: &str, filter: &str) -> Result<Response> {
        self.execute(&query::find(collection, filter))
    }

    /// Find every document in a collection
    pub fn find_all(&self, collection: &str) -> Result<Response> {
        self.execute(&query::find_all(collection))
    }

    /// Update documents matching a filter
    pub fn update(&self, collection: &str, filter: &str, changes: &str) -> Result<Response> {
        self.execute(&query::update(collection, filter, changes))
    }

    /// Delete documents matching a filter
    pub fn delete(&self, collection: &str, filter: &str) -> Result<Response> {
        self.execute(&query::delete(collection, filter))
    }

    /// Count documents matching a filter
    pub fn count(&self, collection: &str, filter: &str) -> Result<Response> {
        self.execute(&query::count(collection, filter))
    }

    /// Dump a collection's contents server-side
    pub fn print_collection(&self, collection: &str) -> Result<Response> {
        self.execute(&query::print_collection(collection))
    }

    // =========================================================================
    // Profile Operations
    // =========================================================================

    /// Create a user profile; the role defaults server-side when `None`
    pub fn create_profile(
        &self,
        username: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<Response> {
        self.execute(&query::create_profile(username, password, role))
    }

    /// Delete a user profile
    pub fn delete_profile(&self, username: &str) -> Result<Response> {
        self.execute(&query::delete_profile(username))
    }

    /// List user profiles
    pub fn list_profiles(&self) -> Result<Response> {
        self.execute(&query::list_profiles())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The advisory current-database cursor, if one has been selected
    pub fn current_database(&self) -> Option<&str> {
        self.current_database.as_deref()
    }

    /// The underlying session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Close the connection without notifying the server
    ///
    /// Idempotent; prefer [`quit`](Self::quit) for a graceful goodbye.
    pub fn close(&self) {
        self.session.close();
    }
}
