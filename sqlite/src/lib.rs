//! SQLite data-access session for the `userinfo` table.
//!
//! This crate wraps an embedded SQLite file behind a [`Session`] that
//! creates the table on demand and offers insert, update, query and delete
//! operations with parameter binding and typed errors.
//!
//! # Architecture
//!
//! - **`config`** — [`SessionConfig`]: store path, table name, engine options, YAML load/save
//! - **`schema`** — DDL generation and table-name validation
//! - **`session`** — [`Session`] lifecycle and CRUD operations
//! - **`cursor`** — [`UserCursor`], the scoped single-pass result iterator
//! - **`convert`** — row → [`UserRecord`](userinfo_core::UserRecord) decoding
//!
//! # Quick start
//!
//! ```no_run
//! use userinfo_core::{NewUser, parse_created_date};
//! use userinfo_sqlite::{Session, SessionConfig};
//!
//! let mut session = Session::open(SessionConfig::new("./foo.db")).unwrap();
//! session.ensure_schema().unwrap();
//!
//! let created = parse_created_date("2010-10-10").unwrap();
//! let id = session
//!     .insert(&NewUser::new("Maria Izotopovna", created).with_department("HR"))
//!     .unwrap();
//!
//! session
//!     .query_all(|cursor| {
//!         for user in cursor {
//!             let user = user?;
//!             println!("{}: {}", user.id, user.display_name());
//!         }
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! session.delete(id).unwrap();
//! session.close().unwrap();
//! ```
//!
//! # Table name customization
//!
//! The table defaults to `userinfo`. Other names let several isolated
//! record sets share one file; names must be plain ASCII identifiers.

mod config;
mod convert;
mod cursor;
mod error;
mod schema;
mod session;

pub use config::{DEFAULT_DB_PATH, IN_MEMORY_PATH, JournalMode, SessionConfig};
pub use cursor::UserCursor;
pub use error::{Result, SessionError};
pub use schema::{DEFAULT_TABLE, generate_drop_sql, generate_schema_sql};
pub use session::{SchemaStatus, Session};
