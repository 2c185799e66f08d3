use rusqlite::Connection;

use crate::{Error, Result};

// Schema version (increment when changing table definitions)
pub const SCHEMA_VERSION: i32 = 1;

// NOTE: Storage Design Rationale
//
// Why a content hash as primary key?
// - The export carries no row ids; the hash of the field values is the only
//   stable identity across re-exports
// - Duplicate imports fall out of the UNIQUE constraint, no read-then-write
//
// Why a generated is_warmup column on the raw table?
// - Some sources mark warm-ups at capture time with a reserved set_order
//   value; deriving the flag in the schema keeps that signal queryable
//   independently of the post-hoc detector
//
// Why refuse on version mismatch (not drop-and-recreate)?
// - The raw table is the system of record for imported history; silently
//   rebuilding it would destroy user data that may no longer be exportable

pub fn init_schema(conn: &Connection) -> Result<()> {
    // WAL returns the new mode as a row, so it cannot go through execute()
    conn.query_row("PRAGMA journal_mode = WAL", [], |_row| Ok(()))?;
    conn.execute_batch("PRAGMA synchronous = NORMAL;")?;

    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if current_version != 0 && current_version != SCHEMA_VERSION {
        return Err(Error::SchemaMismatch {
            found: current_version,
            expected: SCHEMA_VERSION,
        });
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS workout_sets (
            id TEXT PRIMARY KEY,
            date TEXT,
            workout_name TEXT,
            duration TEXT,
            exercise_name TEXT,
            set_order INTEGER,
            is_warmup GENERATED ALWAYS AS (
                CASE WHEN set_order = -1 THEN 1 ELSE 0 END
            ) VIRTUAL,
            weight REAL,
            reps INTEGER,
            distance REAL,
            seconds INTEGER,
            notes TEXT,
            workout_notes TEXT,
            rpe REAL
        );

        CREATE TABLE IF NOT EXISTS workout_sets_enriched (
            id TEXT PRIMARY KEY,
            date TEXT,
            exercise_name TEXT,
            set_order INTEGER,
            set_index INTEGER,
            is_warmup INTEGER,
            muscle_group_primary TEXT,
            muscle_group_secondary TEXT
        );

        CREATE TABLE IF NOT EXISTS pushed_set_ids (
            id TEXT PRIMARY KEY
        );

        CREATE INDEX IF NOT EXISTS idx_sets_date ON workout_sets(date);
        CREATE INDEX IF NOT EXISTS idx_enriched_date ON workout_sets_enriched(date);
        "#,
    )?;

    conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;

    Ok(())
}
