use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use userinfo_core::{NewUser, UserRecord, parse_created_date};
use userinfo_sqlite::{Session, SessionConfig};

/// Output format for `list` and `get`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Table,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "userinfo")]
#[command(about = "Create, read, update and delete rows in an embedded userinfo table")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// Database file path (default: ./foo.db, or the path from --config).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// YAML session configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging on stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the insert → update → list → delete walkthrough.
    Demo(DemoArgs),
    /// Create the table if it does not exist.
    Init,
    /// Insert a user and print the assigned id.
    Add(AddArgs),
    /// Change the username of an existing row.
    Rename(RenameArgs),
    /// Print one row by id.
    Get(GetArgs),
    /// Print every row, ordered by id.
    List(ListArgs),
    /// Delete a row by id.
    Remove(RemoveArgs),
    /// Show whether the table exists and how many rows it holds.
    Status,
    /// Drop the table.
    Drop,
}

#[derive(Debug, Args)]
struct DemoArgs {
    /// Username to insert.
    #[arg(long, default_value = "Maria Izotopovna")]
    username: String,
    /// Department to insert.
    #[arg(long, default_value = "HR")]
    department: String,
    /// Creation date (YYYY-MM-DD or DD.MM.YYYY).
    #[arg(long, default_value = "2010-10-10")]
    created: String,
    /// Username the inserted row is renamed to.
    #[arg(long, default_value = "Yurii Potapovich")]
    rename_to: String,
    /// Skip the final delete so the row stays in the file.
    #[arg(long)]
    keep: bool,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Username (omit to store NULL).
    #[arg(long)]
    username: Option<String>,
    /// Department (omit to store NULL).
    #[arg(long)]
    department: Option<String>,
    /// Creation date (YYYY-MM-DD or DD.MM.YYYY, default: today).
    #[arg(long)]
    created: Option<String>,
}

#[derive(Debug, Args)]
struct RenameArgs {
    /// Row id.
    #[arg(long)]
    id: i64,
    /// New username.
    #[arg(long)]
    username: String,
}

#[derive(Debug, Args)]
struct GetArgs {
    /// Row id.
    #[arg(long)]
    id: i64,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Output format.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Row id.
    #[arg(long)]
    id: i64,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);
    debug!(command = ?cli.command, "dispatching");

    let result = match cli.command {
        Command::Demo(args) => run_demo(&cli.global, args),
        Command::Init => run_init(&cli.global),
        Command::Add(args) => run_add(&cli.global, args),
        Command::Rename(args) => run_rename(&cli.global, args),
        Command::Get(args) => run_get(&cli.global, args),
        Command::List(args) => run_list(&cli.global, args),
        Command::Remove(args) => run_remove(&cli.global, args),
        Command::Status => run_status(&cli.global),
        Command::Drop => run_drop(&cli.global),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Routes logs to stderr so stdout stays scriptable.
fn init_tracing(verbose: bool) {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if verbose {
            "userinfo=debug".to_string()
        } else {
            "userinfo=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();
}

// ---------------------------------------------------------------------------
// demo command
// ---------------------------------------------------------------------------

fn run_demo(global: &GlobalArgs, args: DemoArgs) -> Result<(), String> {
    let created = parse_created_date(&args.created).map_err(|e| e.to_string())?;
    let mut session = open_session(global, true)?;

    let user = NewUser::new(args.username, created).with_department(args.department);
    let id = session
        .insert(&user)
        .map_err(|e| format!("Insert failed: {e}"))?;
    println!("Inserted user with id {id}");

    let affected = session
        .update(id, &args.rename_to)
        .map_err(|e| format!("Update failed: {e}"))?;
    println!("Updated {affected} row(s)");

    session
        .query_all(|cursor| {
            for user in cursor {
                println!("{}", describe(&user?));
            }
            Ok(())
        })
        .map_err(|e| format!("Query failed: {e}"))?;

    if !args.keep {
        let affected = session
            .delete(id)
            .map_err(|e| format!("Delete failed: {e}"))?;
        println!("Deleted {affected} row(s)");
    }

    close_session(session)
}

// ---------------------------------------------------------------------------
// single-operation commands
// ---------------------------------------------------------------------------

fn run_init(global: &GlobalArgs) -> Result<(), String> {
    let session = open_session(global, true)?;
    println!(
        "Table '{}' ready in '{}'.",
        session.config().table,
        session.path().display()
    );
    close_session(session)
}

fn run_add(global: &GlobalArgs, args: AddArgs) -> Result<(), String> {
    let created = match args.created.as_deref() {
        Some(raw) => parse_created_date(raw).map_err(|e| e.to_string())?,
        None => chrono::Local::now().date_naive(),
    };
    let session = open_session(global, true)?;

    let user = NewUser {
        username: args.username,
        department: args.department,
        created,
    };
    let id = session
        .insert(&user)
        .map_err(|e| format!("Insert failed: {e}"))?;
    println!("{id}");
    close_session(session)
}

fn run_rename(global: &GlobalArgs, args: RenameArgs) -> Result<(), String> {
    let session = open_session(global, true)?;
    let affected = session
        .update(args.id, &args.username)
        .map_err(|e| format!("Update failed: {e}"))?;
    println!("{affected}");
    close_session(session)
}

fn run_get(global: &GlobalArgs, args: GetArgs) -> Result<(), String> {
    let session = open_session(global, true)?;
    let user = session
        .get(args.id)
        .map_err(|e| format!("Query failed: {e}"))?
        .ok_or_else(|| format!("No user with id {}", args.id))?;
    print_users(std::slice::from_ref(&user), args.format)?;
    close_session(session)
}

fn run_list(global: &GlobalArgs, args: ListArgs) -> Result<(), String> {
    let session = open_session(global, true)?;
    let users = session
        .list()
        .map_err(|e| format!("Query failed: {e}"))?;
    print_users(&users, args.format)?;
    close_session(session)
}

fn run_remove(global: &GlobalArgs, args: RemoveArgs) -> Result<(), String> {
    let session = open_session(global, true)?;
    let affected = session
        .delete(args.id)
        .map_err(|e| format!("Delete failed: {e}"))?;
    println!("{affected}");
    close_session(session)
}

fn run_status(global: &GlobalArgs) -> Result<(), String> {
    let session = open_session(global, false)?;
    let status = session
        .status()
        .map_err(|e| format!("Failed to get status: {e}"))?;
    println!("Store: {}", session.path().display());
    println!("Table: {}", session.config().table);
    println!(
        "  Table exists: {}",
        if status.table_exists { "yes" } else { "no" }
    );
    println!("  Row count: {}", status.row_count);
    close_session(session)
}

fn run_drop(global: &GlobalArgs) -> Result<(), String> {
    let session = open_session(global, false)?;
    session
        .drop_schema()
        .map_err(|e| format!("Drop failed: {e}"))?;
    println!(
        "Table '{}' dropped from '{}'.",
        session.config().table,
        session.path().display()
    );
    close_session(session)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Builds the session config from `--config` and `--db`; `--db` wins.
fn session_config(global: &GlobalArgs) -> Result<SessionConfig, String> {
    let mut config = match &global.config {
        Some(path) => SessionConfig::load(path).map_err(|e| e.to_string())?,
        None => SessionConfig::default(),
    };
    if let Some(db) = &global.db {
        config.path = db.clone();
    }
    Ok(config)
}

fn open_session(global: &GlobalArgs, ensure_schema: bool) -> Result<Session, String> {
    let config = session_config(global)?;
    let display = config.path.display().to_string();
    let session =
        Session::open(config).map_err(|e| format!("Failed to open database '{display}': {e}"))?;
    if ensure_schema {
        session
            .ensure_schema()
            .map_err(|e| format!("Failed to create table: {e}"))?;
    }
    Ok(session)
}

fn close_session(mut session: Session) -> Result<(), String> {
    session
        .close()
        .map_err(|e| format!("Failed to close database: {e}"))
}

/// One-line description used by `demo`.
fn describe(user: &UserRecord) -> String {
    format!(
        "ID: {}, Username: {}, Department: {}, Created: {}",
        user.id,
        user.display_name(),
        user.department.as_deref().unwrap_or("<null>"),
        format_created(user)
    )
}

fn format_created(user: &UserRecord) -> String {
    user.created
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "<null>".to_string())
}

fn print_users(users: &[UserRecord], format: CliOutputFormat) -> Result<(), String> {
    match format {
        CliOutputFormat::Json => {
            let raw = serde_json::to_string_pretty(users)
                .map_err(|err| format!("Failed to serialize users: {err}"))?;
            println!("{raw}");
        }
        CliOutputFormat::Table => {
            println!("{:<6} {:<24} {:<16} CREATED", "ID", "USERNAME", "DEPARTMENT");
            for user in users {
                println!(
                    "{:<6} {:<24} {:<16} {}",
                    user.id,
                    user.display_name(),
                    user.department.as_deref().unwrap_or("<null>"),
                    format_created(user)
                );
            }
        }
    }
    Ok(())
}
