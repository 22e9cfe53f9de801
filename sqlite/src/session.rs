//! The data-access session.
//!
//! A [`Session`] owns one SQLite connection for the lifetime of a linear
//! open → ensure-schema → insert/update/query/delete → close sequence.
//! Every call is a blocking, single-shot operation against the engine.
//! Errors are returned to the caller typed by the operation that failed.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use userinfo_core::NewUser;
//! use userinfo_sqlite::{Session, SessionError};
//!
//! let mut session = Session::open_in_memory().unwrap();
//! session.ensure_schema().unwrap();
//!
//! let created = NaiveDate::from_ymd_opt(2010, 10, 10).unwrap();
//! let id = session
//!     .insert(&NewUser::new("Maria Izotopovna", created).with_department("HR"))
//!     .unwrap();
//! assert_eq!(session.update(id, "Yurii Potapovich").unwrap(), 1);
//!
//! let users = session.list().unwrap();
//! assert_eq!(users[0].username.as_deref(), Some("Yurii Potapovich"));
//!
//! assert_eq!(session.delete(id).unwrap(), 1);
//! session.close().unwrap();
//! assert!(matches!(session.count(), Err(SessionError::Closed)));
//! ```

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info, warn};
use userinfo_core::{NewUser, UserRecord, validate_new_user, validate_username};

use crate::config::SessionConfig;
use crate::convert::row_to_record;
use crate::cursor::UserCursor;
use crate::error::{Result, SessionError};
use crate::schema::{Statements, generate_drop_sql, generate_schema_sql, validate_table_name};

/// Connection handle plus the statements for the configured table.
///
/// The connection is released by [`close`](Self::close) or, failing that,
/// when the session is dropped.
pub struct Session {
    conn: Option<Connection>,
    config: SessionConfig,
    statements: Statements,
}

impl Session {
    /// Opens or creates the store described by `config`.
    ///
    /// Applies `PRAGMA foreign_keys` and the journal mode from the config.
    /// Does not create the table; call [`ensure_schema`](Self::ensure_schema).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidTableName`] for a bad table name and
    /// [`SessionError::ConnectionError`] if the file cannot be opened or
    /// configured.
    pub fn open(config: SessionConfig) -> Result<Self> {
        validate_table_name(&config.table)?;

        let conn = Connection::open_with_flags(&config.path, config.open_flags())
            .map_err(SessionError::ConnectionError)?;

        if config.foreign_keys {
            conn.execute_batch("PRAGMA foreign_keys = ON;")
                .map_err(SessionError::ConnectionError)?;
        }
        if let Some(mode) = config.journal_mode {
            // The pragma reports the mode actually in effect, which differs
            // from the request for in-memory stores.
            let applied: String = conn
                .query_row(
                    &format!("PRAGMA journal_mode = {}", mode.as_pragma()),
                    [],
                    |row| row.get(0),
                )
                .map_err(SessionError::ConnectionError)?;
            debug!(requested = mode.as_pragma(), applied = %applied, "journal mode set");
        }

        info!(
            path = %config.path.display(),
            table = %config.table,
            read_only = config.read_only,
            "opened session"
        );

        let statements = Statements::for_table(&config.table);
        Ok(Self {
            conn: Some(conn),
            config,
            statements,
        })
    }

    /// Opens a private in-memory store with default options.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(SessionConfig::in_memory())
    }

    /// Creates the table if it does not exist. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SchemaError`] if the DDL fails.
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        let sql = generate_schema_sql(&self.config.table)?;
        conn.execute_batch(&sql).map_err(SessionError::SchemaError)?;
        info!(table = %self.config.table, "schema ensured");
        Ok(())
    }

    /// Drops the table if it exists. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SchemaError`] if the DDL fails.
    pub fn drop_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        let sql = generate_drop_sql(&self.config.table)?;
        conn.execute_batch(&sql).map_err(SessionError::SchemaError)?;
        info!(table = %self.config.table, "schema dropped");
        Ok(())
    }

    /// Reports whether the table exists and how many rows it holds.
    pub fn status(&self) -> Result<SchemaStatus> {
        let conn = self.conn()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![self.config.table],
                |row| row.get(0),
            )
            .map_err(SessionError::ReadError)?;

        if count == 0 {
            return Ok(SchemaStatus {
                table_exists: false,
                row_count: 0,
            });
        }

        Ok(SchemaStatus {
            table_exists: true,
            row_count: self.count()?,
        })
    }

    /// Inserts a record and returns the id the store assigned to it.
    ///
    /// Values are bound positionally; nothing from `user` is spliced into
    /// the SQL text.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidUser`] if a field exceeds its column
    /// width and [`SessionError::WriteError`] if the engine rejects the row.
    pub fn insert(&self, user: &NewUser) -> Result<i64> {
        let conn = self.conn()?;
        validate_new_user(user)?;

        conn.execute(
            &self.statements.insert,
            params![user.username, user.department, user.created],
        )
        .map_err(SessionError::WriteError)?;

        let id = conn.last_insert_rowid();
        debug!(id, "inserted user");
        Ok(id)
    }

    /// Sets the username of the row with `id`.
    ///
    /// Returns the number of rows changed: `1` on a match, `0` when no row
    /// has that id.
    pub fn update(&self, id: i64, new_username: &str) -> Result<usize> {
        let conn = self.conn()?;
        validate_username(new_username)?;

        let affected = conn
            .execute(&self.statements.update_username, params![new_username, id])
            .map_err(SessionError::WriteError)?;
        debug!(id, affected, "updated username");
        Ok(affected)
    }

    /// Deletes the row with `id`, returning the number of rows removed.
    pub fn delete(&self, id: i64) -> Result<usize> {
        let conn = self.conn()?;
        let affected = conn
            .execute(&self.statements.delete, params![id])
            .map_err(SessionError::WriteError)?;
        debug!(id, affected, "deleted user");
        Ok(affected)
    }

    /// Looks up a single row by id.
    pub fn get(&self, id: i64) -> Result<Option<UserRecord>> {
        let conn = self.conn()?;
        conn.query_row(&self.statements.select_one, params![id], row_to_record)
            .optional()
            .map_err(SessionError::ReadError)
    }

    /// Counts the rows in the table.
    pub fn count(&self) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn
            .query_row(&self.statements.count, [], |row| row.get(0))
            .map_err(SessionError::ReadError)?;
        Ok(count as usize)
    }

    /// Runs `consume` over a cursor of every row, in the order the engine
    /// returns them.
    ///
    /// The cursor and its statement are released when `consume` returns,
    /// whether it read every row, stopped early, or failed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ReadError`] if the query cannot be prepared
    /// or started, and whatever `consume` returns otherwise.
    pub fn query_all<T, F>(&self, consume: F) -> Result<T>
    where
        F: FnOnce(UserCursor<'_>) -> Result<T>,
    {
        self.run_query(&self.statements.select_all, consume)
    }

    /// Like [`query_all`](Self::query_all) but ordered by ascending id.
    pub fn query_all_ordered<T, F>(&self, consume: F) -> Result<T>
    where
        F: FnOnce(UserCursor<'_>) -> Result<T>,
    {
        self.run_query(&self.statements.select_all_ordered, consume)
    }

    /// Collects every row, ordered by id.
    pub fn list(&self) -> Result<Vec<UserRecord>> {
        self.query_all_ordered(|cursor| cursor.collect())
    }

    /// Closes the connection.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] if the session is already closed and
    /// [`SessionError::ConnectionError`] if the engine refuses to close; in
    /// that case the session stays open.
    pub fn close(&mut self) -> Result<()> {
        let conn = self.conn.take().ok_or(SessionError::Closed)?;
        if let Err((conn, err)) = conn.close() {
            self.conn = Some(conn);
            return Err(SessionError::ConnectionError(err));
        }
        info!(path = %self.config.path.display(), "closed session");
        Ok(())
    }

    /// Returns `true` after a successful [`close`](Self::close).
    pub fn is_closed(&self) -> bool {
        self.conn.is_none()
    }

    /// Returns the configuration the session was opened with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the store path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(SessionError::Closed)
    }

    fn run_query<T, F>(&self, sql: &str, consume: F) -> Result<T>
    where
        F: FnOnce(UserCursor<'_>) -> Result<T>,
    {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql).map_err(SessionError::ReadError)?;
        let rows = stmt.query([]).map_err(SessionError::ReadError)?;
        consume(UserCursor::new(rows))
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((_, err)) = conn.close() {
                warn!(path = %self.config.path.display(), error = %err, "failed to close session on drop");
            }
        }
    }
}

/// Table presence and size, as reported by [`Session::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaStatus {
    /// Whether the configured table exists.
    pub table_exists: bool,
    /// Number of rows; `0` when the table is absent.
    pub row_count: usize,
}
