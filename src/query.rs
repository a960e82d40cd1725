//! Query builder
//!
//! Stateless helpers that format database, collection, document, and
//! profile operations into the textual command expressions the server
//! executes. Builders only produce strings; they never touch the
//! connection. [`crate::Client`] has a method per builder that sends the
//! expression and returns the server's response.
//!
//! Name arguments (database names, collection names in create/drop,
//! usernames) are rendered as JSON string literals with escaping, so an
//! exotic name cannot break the expression apart. Document and filter
//! arguments are raw JSON fragments and pass through untouched.

use crate::protocol::escape_json;

/// Quote a value as a JSON string literal, escaping as needed
pub fn string_literal(value: &str) -> String {
    format!("\"{}\"", escape_json(value))
}

// =============================================================================
// Database Operations
// =============================================================================

/// `database.create("<name>")`
pub fn create_database(name: &str) -> String {
    format!("database.create({})", string_literal(name))
}

/// `database.use("<name>")`
///
/// Selects the database that later operations target.
pub fn use_database(name: &str) -> String {
    format!("database.use({})", string_literal(name))
}

/// `database.drop("<name>")`
pub fn drop_database(name: &str) -> String {
    format!("database.drop({})", string_literal(name))
}

/// `database.drop()`
///
/// Drops the currently selected database.
pub fn drop_current_database() -> String {
    "database.drop()".to_string()
}

/// `database.list()`
pub fn list_databases() -> String {
    "database.list()".to_string()
}

// =============================================================================
// Collection Operations
// =============================================================================

/// `collection.create("<name>")`
///
/// Creates a collection in the currently selected database.
pub fn create_collection(name: &str) -> String {
    format!("collection.create({})", string_literal(name))
}

/// `collection.drop("<name>")`
pub fn drop_collection(name: &str) -> String {
    format!("collection.drop({})", string_literal(name))
}

/// `collection.list()`
pub fn list_collections() -> String {
    "collection.list()".to_string()
}

// =============================================================================
// Document Operations
//
// The collection name sits in namespace position (`<collection>.verb`)
// and is interpolated as-is; `document` and `filter` are raw JSON.
// =============================================================================

/// `<collection>.insert(<document>)`
pub fn insert(collection: &str, document: &str) -> String {
    format!("{}.insert({})", collection, document)
}

/// `<collection>.find(<filter>)`
pub fn find(collection: &str, filter: &str) -> String {
    format!("{}.find({})", collection, filter)
}

/// `<collection>.find({})`, the empty filter that matches every document
pub fn find_all(collection: &str) -> String {
    find(collection, "{}")
}

/// `<collection>.update(<filter>, <changes>)`
pub fn update(collection: &str, filter: &str, changes: &str) -> String {
    format!("{}.update({}, {})", collection, filter, changes)
}

/// `<collection>.delete(<filter>)`
pub fn delete(collection: &str, filter: &str) -> String {
    format!("{}.delete({})", collection, filter)
}

/// `<collection>.count(<filter>)`
pub fn count(collection: &str, filter: &str) -> String {
    format!("{}.count({})", collection, filter)
}

/// `<collection>.print()`
///
/// Asks the server to dump the collection contents to its own log.
pub fn print_collection(collection: &str) -> String {
    format!("{}.print()", collection)
}

// =============================================================================
// Profile Operations
// =============================================================================

/// `profile.create("<username>", "<password>"[, "<role>"])`
///
/// The role defaults server-side when omitted.
pub fn create_profile(username: &str, password: &str, role: Option<&str>) -> String {
    match role {
        Some(role) => format!(
            "profile.create({}, {}, {})",
            string_literal(username),
            string_literal(password),
            string_literal(role)
        ),
        None => format!(
            "profile.create({}, {})",
            string_literal(username),
            string_literal(password)
        ),
    }
}

/// `profile.delete("<username>")`
pub fn delete_profile(username: &str) -> String {
    format!("profile.delete({})", string_literal(username))
}

/// `profile.list()`
pub fn list_profiles() -> String {
    "profile.list()".to_string()
}
