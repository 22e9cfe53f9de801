//! Shows how the query cursor is scoped to a closure.
//!
//! The cursor's statement is finalized when the closure returns, so the
//! table can be dropped right after an early exit.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p userinfo-demos --example cursor_scoping
//! ```

use userinfo_demos::{init_logging, sample_users};
use userinfo_sqlite::Session;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let session = Session::open_in_memory()?;
    session.ensure_schema()?;
    for user in &sample_users() {
        session.insert(user)?;
    }

    // Stop after the first HR row without reading the rest.
    let hr = session.query_all_ordered(|cursor| {
        for user in cursor {
            let user = user?;
            if user.department.as_deref() == Some("HR") {
                return Ok(Some(user));
            }
        }
        Ok(None)
    })?;
    println!("First HR user: {hr:?}");

    // Explicit early release.
    let peeked = session.query_all(|mut cursor| {
        let first = cursor.next().transpose()?;
        println!("Read {} row(s) before closing", cursor.rows_read());
        cursor.close();
        Ok(first)
    })?;
    println!("Peeked: {peeked:?}");

    // No statement is pending any more, so DROP TABLE is not blocked.
    session.drop_schema()?;
    println!("Table dropped; exists = {}", session.status()?.table_exists);

    Ok(())
}
