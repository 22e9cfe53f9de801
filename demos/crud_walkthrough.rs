//! Create/read/update/delete walkthrough against a file-backed store.
//!
//! Opens a store in a temporary directory, creates the table, then runs
//! insert → update → query → delete and closes the session.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p userinfo-demos --example crud_walkthrough
//! ```

use userinfo_core::{NewUser, parse_created_date};
use userinfo_demos::{init_logging, sample_users};
use userinfo_sqlite::{Session, SessionConfig, SessionError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // === Step 1: Open the store and create the table ===
    let dir = tempfile::tempdir()?;
    let config = SessionConfig::new(dir.path().join("foo.db"));
    let mut session = Session::open(config)?;
    session.ensure_schema()?;

    let status = session.status()?;
    println!("=== Schema ===");
    println!("Table exists: {}, rows: {}", status.table_exists, status.row_count);

    // === Step 2: Insert ===
    println!("\n=== Insert ===");
    let created = parse_created_date("10.10.2010")?;
    let id = session.insert(&NewUser::new("Maria Izotopovna", created).with_department("HR"))?;
    println!("Inserted id {id}");

    for user in sample_users().iter().skip(1) {
        let other = session.insert(user)?;
        println!("Inserted id {other}");
    }

    // === Step 3: Update ===
    println!("\n=== Update ===");
    println!("Rows affected: {}", session.update(id, "Yurii Potapovich")?);
    println!("Rows affected for missing id: {}", session.update(9_999, "Nobody")?);

    // === Step 4: Query ===
    println!("\n=== Query ===");
    session.query_all(|cursor| {
        for user in cursor {
            let user = user?;
            println!(
                "ID: {}, Username: {}, Department: {}, Created: {:?}",
                user.id,
                user.display_name(),
                user.department.as_deref().unwrap_or("<null>"),
                user.created
            );
        }
        Ok(())
    })?;

    // === Step 5: Delete ===
    println!("\n=== Delete ===");
    println!("Rows affected: {}", session.delete(id)?);
    println!("Remaining rows: {}", session.count()?);

    // === Step 6: Close ===
    session.close()?;
    match session.count() {
        Err(SessionError::Closed) => println!("\nSession closed; further calls are rejected."),
        other => println!("\nUnexpected result after close: {other:?}"),
    }

    Ok(())
}
