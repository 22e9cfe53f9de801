//! Single-pass cursor over query results.
//!
//! A [`UserCursor`] wraps the engine's row iterator for one prepared
//! statement. It is only handed out inside
//! [`Session::query_all`](crate::Session::query_all), which owns the
//! statement and finalizes it when the consuming closure returns, so the
//! read handle is released even when the caller bails out early.

use std::iter::FusedIterator;

use rusqlite::Rows;
use tracing::debug;
use userinfo_core::UserRecord;

use crate::convert::row_to_record;
use crate::error::{Result, SessionError};

/// Lazy, finite iterator of [`UserRecord`]s.
///
/// Yields `Err(SessionError::ReadError)` at most once; after an error or
/// the last row the cursor is released and only yields `None`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use userinfo_core::NewUser;
/// use userinfo_sqlite::Session;
///
/// let session = Session::open_in_memory().unwrap();
/// session.ensure_schema().unwrap();
/// let created = NaiveDate::from_ymd_opt(2010, 10, 10).unwrap();
/// session.insert(&NewUser::new("Maria Izotopovna", created)).unwrap();
///
/// let first = session
///     .query_all(|mut cursor| cursor.next().transpose())
///     .unwrap();
/// assert_eq!(first.unwrap().id, 1);
/// ```
pub struct UserCursor<'stmt> {
    rows: Option<Rows<'stmt>>,
    read: usize,
}

impl<'stmt> UserCursor<'stmt> {
    pub(crate) fn new(rows: Rows<'stmt>) -> Self {
        Self {
            rows: Some(rows),
            read: 0,
        }
    }

    /// Number of records yielded so far.
    pub fn rows_read(&self) -> usize {
        self.read
    }

    /// Returns `true` once the cursor has been exhausted, failed, or closed.
    pub fn is_released(&self) -> bool {
        self.rows.is_none()
    }

    /// Releases the cursor before the end of the result set.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.rows.take().is_some() {
            debug!(rows_read = self.read, "cursor released");
        }
    }
}

impl Iterator for UserCursor<'_> {
    type Item = Result<UserRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let rows = self.rows.as_mut()?;
        let step = match rows.next() {
            Ok(Some(row)) => row_to_record(row).map(Some),
            Ok(None) => Ok(None),
            Err(err) => Err(err),
        };
        match step {
            Ok(Some(record)) => {
                self.read += 1;
                Some(Ok(record))
            }
            Ok(None) => {
                self.release();
                None
            }
            Err(err) => {
                self.release();
                Some(Err(SessionError::ReadError(err)))
            }
        }
    }
}

impl FusedIterator for UserCursor<'_> {}

impl Drop for UserCursor<'_> {
    fn drop(&mut self) {
        self.release();
    }
}
