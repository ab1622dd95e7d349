//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

/// Columns added after the first release, as `(table, column, definition)`.
const ADDED_COLUMNS: &[(&str, &str, &str)] = &[
    ("submissions", "locale", "TEXT NOT NULL DEFAULT 'en'"),
    ("submissions", "appointment_service_type", "TEXT"),
    ("configurator_steps", "min_selections", "INTEGER"),
    ("configurator_steps", "max_selections", "INTEGER"),
];

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Adds columns that databases created by older versions lack.
    fn apply_migrations(&self) -> Result<()> {
        for (table, column, definition) in ADDED_COLUMNS {
            if !self.has_column(table, column)? {
                log::info!("Migrating database: adding {table}.{column}");
                self.connection
                    .execute(
                        &format!("ALTER TABLE {table} ADD COLUMN {column} {definition}"),
                        [],
                    )
                    .db_context("Failed to add missing column")?;
            }
        }
        Ok(())
    }

    fn has_column(&self, table: &str, column: &str) -> Result<bool> {
        self.connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
                [table, column],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .db_context("Failed to inspect table columns")
    }
}
