//! SQL generation for the user table.
//!
//! Table names are interpolated into DDL and DML, so they are validated as
//! plain identifiers before any SQL is built. Record values are never
//! interpolated; they always go through parameter binding.

use crate::error::{Result, SessionError};

/// Table name used unless the configuration overrides it.
pub const DEFAULT_TABLE: &str = "userinfo";

/// Validates that a table name is a plain SQL identifier.
pub(crate) fn validate_table_name(table: &str) -> Result<()> {
    let mut chars = table.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if !valid {
        return Err(SessionError::InvalidTableName(table.to_string()));
    }
    Ok(())
}

/// Generates the `CREATE TABLE` statement for the given table name.
///
/// Uses `IF NOT EXISTS`, so executing it repeatedly is harmless.
///
/// # Errors
///
/// Returns [`SessionError::InvalidTableName`] if the name is not a plain
/// identifier.
pub fn generate_schema_sql(table: &str) -> Result<String> {
    validate_table_name(table)?;

    let sql = format!(
        r#"
CREATE TABLE IF NOT EXISTS {table} (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username VARCHAR(64) NULL,
    department VARCHAR(64) NULL,
    created DATE NULL
);
"#,
        table = table
    );

    Ok(sql)
}

/// Generates the `DROP TABLE` statement for the given table name.
///
/// # Errors
///
/// Returns [`SessionError::InvalidTableName`] if the name is invalid.
pub fn generate_drop_sql(table: &str) -> Result<String> {
    validate_table_name(table)?;
    Ok(format!("DROP TABLE IF EXISTS {table};"))
}

/// Prepared statement texts for one table.
#[derive(Debug, Clone)]
pub(crate) struct Statements {
    pub insert: String,
    pub update_username: String,
    pub select_all: String,
    pub select_all_ordered: String,
    pub select_one: String,
    pub delete: String,
    pub count: String,
}

impl Statements {
    /// Builds the statements for an already validated table name.
    pub(crate) fn for_table(table: &str) -> Self {
        let columns = "id, username, department, created";
        Self {
            insert: format!(
                "INSERT INTO {table} (username, department, created) VALUES (?1, ?2, ?3)"
            ),
            update_username: format!("UPDATE {table} SET username = ?1 WHERE id = ?2"),
            select_all: format!("SELECT {columns} FROM {table}"),
            select_all_ordered: format!("SELECT {columns} FROM {table} ORDER BY id"),
            select_one: format!("SELECT {columns} FROM {table} WHERE id = ?1"),
            delete: format!("DELETE FROM {table} WHERE id = ?1"),
            count: format!("SELECT COUNT(*) FROM {table}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_table_names() {
        assert!(validate_table_name("userinfo").is_ok());
        assert!(validate_table_name("_staff2").is_ok());
        assert!(validate_table_name("A_B_C").is_ok());
    }

    #[test]
    fn test_invalid_table_names() {
        assert!(validate_table_name("").is_err());
        assert!(validate_table_name("2users").is_err());
        assert!(validate_table_name("users; DROP TABLE x").is_err());
        assert!(validate_table_name("user-info").is_err());
        assert!(validate_table_name("пользователи").is_err());
    }

    #[test]
    fn test_generate_schema_sql_columns() {
        let sql = generate_schema_sql("userinfo").unwrap();
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS userinfo"));
        assert!(sql.contains("id INTEGER PRIMARY KEY AUTOINCREMENT"));
        assert!(sql.contains("username VARCHAR(64) NULL"));
        assert!(sql.contains("department VARCHAR(64) NULL"));
        assert!(sql.contains("created DATE NULL"));
    }

    #[test]
    fn test_generate_sql_rejects_bad_names() {
        assert!(matches!(
            generate_schema_sql("x y"),
            Err(SessionError::InvalidTableName(_))
        ));
        assert!(generate_drop_sql("").is_err());
    }

    #[test]
    fn test_generate_drop_sql() {
        assert_eq!(
            generate_drop_sql("staff").unwrap(),
            "DROP TABLE IF EXISTS staff;"
        );
    }

    #[test]
    fn test_statements_use_placeholders() {
        let stmts = Statements::for_table("userinfo");
        assert!(stmts.insert.contains("VALUES (?1, ?2, ?3)"));
        assert!(stmts.update_username.ends_with("WHERE id = ?2"));
        assert!(stmts.select_all_ordered.ends_with("ORDER BY id"));
        assert!(stmts.delete.ends_with("WHERE id = ?1"));
    }

    #[test]
    fn test_schema_executes_and_autoincrements() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(&generate_schema_sql("t").unwrap()).unwrap();
        conn.execute("INSERT INTO t (username) VALUES ('a')", []).unwrap();
        conn.execute("DELETE FROM t", []).unwrap();
        conn.execute("INSERT INTO t (username) VALUES ('b')", []).unwrap();
        // AUTOINCREMENT never hands out an id that was used before.
        assert_eq!(conn.last_insert_rowid(), 2);
    }
}
