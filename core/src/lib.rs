//! Core record types for the `userinfo` store.
//!
//! This crate defines the data model shared by the storage backend and the
//! command-line tool:
//!
//! - [`UserRecord`] — a row as read back from the store.
//! - [`NewUser`] — the payload for an insert.
//!
//! Validation ([`validate_new_user`]) enforces the declared column widths
//! and [`parse_created_date`] accepts the date formats the CLI takes.
//!
//! # Example
//!
//! ```
//! use userinfo_core::*;
//!
//! let created = parse_created_date("2010-10-10").unwrap();
//! let user = NewUser::new("Maria Izotopovna", created).with_department("HR");
//! assert!(validate_new_user(&user).is_ok());
//!
//! let record = user.into_record(1);
//! assert_eq!(record.id, 1);
//! ```

mod types;
mod validate;

pub use types::*;
pub use validate::{
    ValidationError, parse_created_date, validate_department, validate_new_user,
    validate_username,
};
