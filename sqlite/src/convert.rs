//! Row-level conversion between SQLite rows and [`UserRecord`].
//!
//! The `created` column is declared `DATE`, which SQLite stores as text.
//! Rows written through a session use ISO dates, but files produced by
//! other tools may hold the day-first dotted form, so both are accepted on
//! read.

use chrono::NaiveDate;
use rusqlite::Row;
use rusqlite::types::{FromSqlError, Type, ValueRef};
use userinfo_core::{UserRecord, parse_created_date};

/// Column order shared by every `SELECT` in [`Statements`](crate::schema::Statements).
const COL_ID: usize = 0;
const COL_USERNAME: usize = 1;
const COL_DEPARTMENT: usize = 2;
const COL_CREATED: usize = 3;

/// Decodes one result row into a [`UserRecord`].
pub(crate) fn row_to_record(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
    Ok(UserRecord {
        id: row.get(COL_ID)?,
        username: row.get(COL_USERNAME)?,
        department: row.get(COL_DEPARTMENT)?,
        created: created_from_row(row)?,
    })
}

fn created_from_row(row: &Row<'_>) -> rusqlite::Result<Option<NaiveDate>> {
    match row.get_ref(COL_CREATED)? {
        ValueRef::Null => Ok(None),
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(COL_CREATED, Type::Text, Box::new(e))
            })?;
            // Timestamps such as "2010-10-10 00:00:00" keep only the date part.
            let date_part = text.split([' ', 'T']).next().unwrap_or(text);
            parse_created_date(date_part).map(Some).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(COL_CREATED, Type::Text, Box::new(e))
            })
        }
        other => Err(rusqlite::Error::FromSqlConversionFailure(
            COL_CREATED,
            other.data_type(),
            Box::new(FromSqlError::InvalidType),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn decode(created_sql: &str) -> rusqlite::Result<UserRecord> {
        let conn = Connection::open_in_memory().unwrap();
        conn.query_row(
            &format!("SELECT 5, 'ann', NULL, {created_sql}"),
            [],
            row_to_record,
        )
    }

    #[test]
    fn test_iso_date() {
        let record = decode("'2010-10-10'").unwrap();
        assert_eq!(record.id, 5);
        assert_eq!(record.username.as_deref(), Some("ann"));
        assert_eq!(record.department, None);
        assert_eq!(record.created, NaiveDate::from_ymd_opt(2010, 10, 10));
    }

    #[test]
    fn test_dotted_date() {
        let record = decode("'10.10.2010'").unwrap();
        assert_eq!(record.created, NaiveDate::from_ymd_opt(2010, 10, 10));
    }

    #[test]
    fn test_timestamp_text_keeps_date() {
        let record = decode("'2010-10-10 12:30:00'").unwrap();
        assert_eq!(record.created, NaiveDate::from_ymd_opt(2010, 10, 10));
        let record = decode("'2010-10-10T12:30:00Z'").unwrap();
        assert_eq!(record.created, NaiveDate::from_ymd_opt(2010, 10, 10));
    }

    #[test]
    fn test_null_date() {
        assert_eq!(decode("NULL").unwrap().created, None);
    }

    #[test]
    fn test_bad_date_is_conversion_failure() {
        assert!(matches!(
            decode("'someday'"),
            Err(rusqlite::Error::FromSqlConversionFailure(COL_CREATED, Type::Text, _))
        ));
        assert!(matches!(
            decode("20101010"),
            Err(rusqlite::Error::FromSqlConversionFailure(COL_CREATED, Type::Integer, _))
        ));
    }
}
