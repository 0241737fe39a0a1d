//! Schema versioning for the on-disk store.
//!
//! The stored values themselves are never migrated: a value that no longer
//! parses is treated as absent by the analytics layer. Only the table layout
//! carries a version.

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::schema::SCHEMA_STATEMENTS;

/// The current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Metadata key holding the schema version.
const VERSION_KEY: &str = "schema_version";

type Migration = fn(&Connection) -> Result<()>;

/// Migrations indexed by the version they produce.
const MIGRATIONS: &[(i32, Migration)] = &[(1, migrate_v1)];

/// Create the tables if missing and bring the schema up to [`CURRENT_VERSION`].
///
/// # Errors
///
/// Returns an error if schema creation or a migration fails, or if the stored
/// version is newer than this build understands.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }

    let version = schema_version(conn)?;
    if version > CURRENT_VERSION {
        return Err(Error::StoreMigration {
            message: format!(
                "store schema version {version} is newer than supported version {CURRENT_VERSION}"
            ),
        });
    }

    for (target, migrate) in MIGRATIONS {
        if *target > version {
            debug!("Applying store migration v{}", target);
            migrate(conn)?;
            set_schema_version(conn, *target)?;
            info!("Store schema migrated to v{}", target);
        }
    }

    Ok(())
}

/// Read the schema version, 0 for a fresh database.
fn schema_version(conn: &Connection) -> Result<i32> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match value {
        None => Ok(0),
        Some(value) => value.parse().map_err(|_| Error::StoreMigration {
            message: format!("invalid schema version: {value}"),
        }),
    }
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}

/// Version 1 is the base layout from `SCHEMA_STATEMENTS`.
#[allow(clippy::unnecessary_wraps)]
fn migrate_v1(_conn: &Connection) -> Result<()> {
    Ok(())
}
