//! Record validation and date parsing.
//!
//! SQLite stores whatever it is given in a `VARCHAR(64)` or `DATE` column,
//! so width limits and date formats are checked here before any statement
//! runs.
//!
//! # Examples
//!
//! ```
//! use userinfo_core::*;
//!
//! let created = parse_created_date("10.10.2010").unwrap();
//! let user = NewUser::new("Maria Izotopovna", created).with_department("HR");
//! assert!(validate_new_user(&user).is_ok());
//!
//! let long = NewUser::new("x".repeat(65), created);
//! assert!(validate_new_user(&long).is_err());
//! ```

use chrono::NaiveDate;
use thiserror::Error;

use crate::{MAX_FIELD_LEN, NewUser};

/// Accepted input formats for creation dates, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y"];

/// Record validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Username exceeds the column width (length in characters).
    #[error("username is {0} characters, limit is {}", MAX_FIELD_LEN)]
    UsernameTooLong(usize),
    /// Department exceeds the column width (length in characters).
    #[error("department is {0} characters, limit is {}", MAX_FIELD_LEN)]
    DepartmentTooLong(usize),
    /// Date text matched none of the accepted formats.
    #[error("invalid date '{0}': expected YYYY-MM-DD or DD.MM.YYYY")]
    InvalidDate(String),
}

/// Checks a username against the column width.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    if len > MAX_FIELD_LEN {
        return Err(ValidationError::UsernameTooLong(len));
    }
    Ok(())
}

/// Checks a department against the column width.
pub fn validate_department(department: &str) -> Result<(), ValidationError> {
    let len = department.chars().count();
    if len > MAX_FIELD_LEN {
        return Err(ValidationError::DepartmentTooLong(len));
    }
    Ok(())
}

/// Validates an insertion payload, returning the first problem found.
pub fn validate_new_user(user: &NewUser) -> Result<(), ValidationError> {
    if let Some(username) = &user.username {
        validate_username(username)?;
    }
    if let Some(department) = &user.department {
        validate_department(department)?;
    }
    Ok(())
}

/// Parses a creation date in ISO (`2010-10-10`) or day-first dotted
/// (`10.10.2010`) form. Surrounding whitespace is ignored.
pub fn parse_created_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ValidationError::InvalidDate(input.to_string()))
}
