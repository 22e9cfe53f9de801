//! Shared helpers for the runnable examples.

use chrono::NaiveDate;
use userinfo_core::NewUser;

/// Installs a stderr logger honoring `RUST_LOG`, defaulting to `userinfo=debug`.
pub fn init_logging() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "userinfo=debug".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(&filter)
        .with_writer(std::io::stderr)
        .init();
}

/// A handful of rows to seed a store with.
pub fn sample_users() -> Vec<NewUser> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    vec![
        NewUser::new("Maria Izotopovna", date(2010, 10, 10)).with_department("HR"),
        NewUser::new("Yurii Potapovich", date(2011, 3, 14)).with_department("Finance"),
        NewUser::new("Oksana Petrenko", date(2012, 7, 1)).with_department("R&D"),
        NewUser::anonymous(date(2013, 1, 31)),
    ]
}
