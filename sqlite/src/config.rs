//! Session configuration.
//!
//! [`SessionConfig`] names the store file and the engine options applied
//! when a [`Session`](crate::Session) is opened. It can be built in code or
//! loaded from YAML.
//!
//! # Example YAML
//!
//! ```yaml
//! path: ./foo.db
//! table: userinfo
//! create_if_missing: true
//! read_only: false
//! foreign_keys: true
//! journal_mode: wal
//! ```
//!
//! Every key except `path` is optional.

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use rusqlite::OpenFlags;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};
use crate::schema::DEFAULT_TABLE;

/// Path SQLite interprets as a private in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Store file used when nothing else is configured.
pub const DEFAULT_DB_PATH: &str = "./foo.db";

/// SQLite rollback journal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalMode {
    /// Rollback journal deleted after each transaction (SQLite default).
    Delete,
    /// Write-ahead log.
    Wal,
    /// Journal kept in memory.
    Memory,
}

impl JournalMode {
    /// Value passed to `PRAGMA journal_mode`.
    pub fn as_pragma(self) -> &'static str {
        match self {
            Self::Delete => "DELETE",
            Self::Wal => "WAL",
            Self::Memory => "MEMORY",
        }
    }
}

/// Options for opening a [`Session`](crate::Session).
///
/// # Examples
///
/// ```
/// use userinfo_sqlite::SessionConfig;
///
/// let config = SessionConfig::new("people.db").with_table("staff");
/// assert_eq!(config.table, "staff");
/// assert!(config.create_if_missing);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Store file; [`IN_MEMORY_PATH`] selects an in-memory database.
    pub path: PathBuf,
    /// Table holding the user records.
    #[serde(default = "default_table")]
    pub table: String,
    /// Create the file when it does not exist.
    #[serde(default = "default_true")]
    pub create_if_missing: bool,
    /// Open without write access. Writes then fail with `WriteError`.
    #[serde(default)]
    pub read_only: bool,
    /// Run `PRAGMA foreign_keys = ON` after opening.
    #[serde(default = "default_true")]
    pub foreign_keys: bool,
    /// Journal mode to set after opening; `None` keeps the engine default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_mode: Option<JournalMode>,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}

impl SessionConfig {
    /// Creates a config for the given file with default options.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: default_table(),
            create_if_missing: true,
            read_only: false,
            foreign_keys: true,
            journal_mode: None,
        }
    }

    /// Creates a config for a private in-memory database.
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY_PATH)
    }

    /// Overrides the table name.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Sets whether a missing file is created.
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Sets read-only mode.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Sets the journal mode applied after opening.
    pub fn with_journal_mode(mut self, mode: JournalMode) -> Self {
        self.journal_mode = Some(mode);
        self
    }

    /// Returns `true` when the path selects an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY_PATH
    }

    /// Translates the options into SQLite open flags.
    pub(crate) fn open_flags(&self) -> OpenFlags {
        let access = if self.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY
        } else if self.create_if_missing {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE
        };
        access | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ConfigError`] if the file cannot be read or
    /// parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            SessionError::ConfigError(format!("cannot read '{}': {e}", path.display()))
        })?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|e| {
            SessionError::ConfigError(format!("cannot parse '{}': {e}", path.display()))
        })
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ConfigError`] if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| {
            SessionError::ConfigError(format!("cannot write '{}': {e}", path.display()))
        })?;
        serde_yaml::to_writer(BufWriter::new(file), self).map_err(|e| {
            SessionError::ConfigError(format!("cannot serialize to '{}': {e}", path.display()))
        })
    }
}
