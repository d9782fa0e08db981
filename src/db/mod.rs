//! Database module
//!
//! Handles the SQLite connection and its transaction.

pub mod connection;

pub use connection::Database;
