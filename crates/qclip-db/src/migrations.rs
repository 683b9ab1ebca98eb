//! Schema migrations, versioned through SQLite's `user_version` pragma.

use rusqlite::Connection;
use tracing::info;

use crate::error::{DbError, DbResult};

const CURRENT_SCHEMA_VERSION: i32 = 1;

pub fn run_migrations(conn: &mut Connection) -> DbResult<()> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if version > CURRENT_SCHEMA_VERSION {
        return Err(DbError::Migration(format!(
            "database schema version {version} is newer than supported version \
             {CURRENT_SCHEMA_VERSION}"
        )));
    }

    if version == CURRENT_SCHEMA_VERSION {
        return Ok(());
    }

    info!("Migrating database schema from v{version} to v{CURRENT_SCHEMA_VERSION}");

    let tx = conn.transaction()?;

    if version < 1 {
        tx.execute_batch(include_str!("schemas/schema_v1.sql"))?;
    }

    tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)?;
    tx.commit()?;

    Ok(())
}
