//! BrewBrowser database layer.
//!
//! Provides SQLite connection management and schema migrations. The only
//! table the application relies on is a small key-value store holding
//! client-local state such as the saved-items list.
//!
//! # Usage
//!
//! ```no_run
//! use brewbrowser::database::Database;
//!
//! // Open a persistent database
//! let db = Database::open("brewbrowser.db").expect("failed to open database");
//!
//! // Or use an in-memory database for testing
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//!
//! // Access the underlying connection for queries
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
