//! Database access layer shared across Tryline services
//!
//! All services open the same SQLite database; `init_database` creates
//! missing tables on startup so any service can run first.

pub mod init;
pub mod models;

pub use init::init_database;
