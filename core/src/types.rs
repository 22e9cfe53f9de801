//! Record type definitions for the `userinfo` table.
//!
//! This module defines the data model persisted by the session layer. The
//! types are designed for serialization with [`serde`] and round-trip
//! through SQLite rows and JSON output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Declared width of the `username` and `department` columns.
///
/// SQLite accepts any length for `VARCHAR(64)`, so the limit is checked by
/// [`validate_new_user`](crate::validate_new_user) instead.
pub const MAX_FIELD_LEN: usize = 64;

/// A row of the `userinfo` table as read back from the store.
///
/// The `id` is assigned by the store on insertion and never changes.
/// `created` is optional because rows written by other tools may leave
/// the column `NULL`; rows inserted through a session always carry it.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use userinfo_core::UserRecord;
///
/// let record = UserRecord {
///     id: 1,
///     username: Some("Maria Izotopovna".into()),
///     department: Some("HR".into()),
///     created: NaiveDate::from_ymd_opt(2010, 10, 10),
/// };
/// assert_eq!(record.display_name(), "Maria Izotopovna");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Store-assigned identifier.
    pub id: i64,
    /// Login or display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Department the user belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Date the record was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<NaiveDate>,
}

impl UserRecord {
    /// Returns the username, or `"<null>"` when the column is `NULL`.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("<null>")
    }
}

/// Payload for inserting a new row.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use userinfo_core::NewUser;
///
/// let created = NaiveDate::from_ymd_opt(2010, 10, 10).unwrap();
/// let user = NewUser::new("Maria Izotopovna", created).with_department("HR");
/// assert_eq!(user.department.as_deref(), Some("HR"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Login or display name; `None` stores `NULL`.
    #[serde(default)]
    pub username: Option<String>,
    /// Department; `None` stores `NULL`.
    #[serde(default)]
    pub department: Option<String>,
    /// Creation date written to the `created` column.
    pub created: NaiveDate,
}

impl NewUser {
    /// Creates a payload with a username and no department.
    pub fn new(username: impl Into<String>, created: NaiveDate) -> Self {
        Self {
            username: Some(username.into()),
            department: None,
            created,
        }
    }

    /// Creates a payload with both text columns left `NULL`.
    pub fn anonymous(created: NaiveDate) -> Self {
        Self {
            username: None,
            department: None,
            created,
        }
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Builds the record this payload becomes once the store assigns `id`.
    pub fn into_record(self, id: i64) -> UserRecord {
        UserRecord {
            id,
            username: self.username,
            department: self.department,
            created: Some(self.created),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_display_name_null() {
        let record = UserRecord {
            id: 3,
            username: None,
            department: None,
            created: None,
        };
        assert_eq!(record.display_name(), "<null>");
    }

    #[test]
    fn test_into_record_keeps_fields() {
        let user = NewUser::new("Maria Izotopovna", date(2010, 10, 10)).with_department("HR");
        let record = user.into_record(7);
        assert_eq!(record.id, 7);
        assert_eq!(record.username.as_deref(), Some("Maria Izotopovna"));
        assert_eq!(record.department.as_deref(), Some("HR"));
        assert_eq!(record.created, Some(date(2010, 10, 10)));
    }

    #[test]
    fn test_record_json_uses_iso_date_and_omits_nulls() {
        let record = NewUser::anonymous(date(2010, 10, 10)).into_record(1);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["created"], "2010-10-10");
        assert!(json.get("username").is_none());
        assert!(json.get("department").is_none());
    }
}
