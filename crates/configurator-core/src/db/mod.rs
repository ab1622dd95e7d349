//! SQLite store for configurator definitions and submissions.
//!
//! Definitions are stored flat (one row per step, one row per option) and
//! reassembled into [`crate::models::ConfiguratorSchema`] on load. Each
//! submission is one row with its answers as JSON.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod configurator_queries;
pub mod migrations;
pub mod submission_queries;
pub mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database file and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
