use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use setsync_types::{EnrichedSet, MuscleGroup, RawSet};

use crate::schema;
use crate::{Error, Result};

const RAW_COLUMNS: &str = "id, date, workout_name, duration, exercise_name, set_order, \
     weight, reps, distance, seconds, notes, workout_notes, rpe";

const ENRICHED_COLUMNS: &str = "id, date, exercise_name, set_order, set_index, is_warmup, \
     muscle_group_primary, muscle_group_secondary";

/// Handle to the local workout database.
///
/// One connection, one process; the schema is verified on open and a version
/// mismatch is fatal.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let db = Self { conn };
        schema::init_schema(&db.conn)?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        schema::init_schema(&db.conn)?;
        Ok(db)
    }

    /// Insert one raw set. Returns `false` when a row with the same content
    /// hash already exists (duplicate import) and `true` when inserted;
    /// duplicates are expected and never an error.
    pub fn insert_raw_set(&self, set: &RawSet) -> Result<bool> {
        let result = self.conn.execute(
            r#"
            INSERT INTO workout_sets (id, date, workout_name, duration,
                exercise_name, set_order, weight, reps, distance, seconds,
                notes, workout_notes, rpe)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
            params![
                &set.id,
                &set.date,
                &set.workout_name,
                &set.duration,
                &set.exercise_name,
                &set.set_order,
                &set.weight,
                &set.reps,
                &set.distance,
                &set.seconds,
                &set.notes,
                &set.workout_notes,
                &set.rpe,
            ],
        );

        match result {
            Ok(_) => Ok(true),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Ok(false)
            }
            Err(e) => Err(Error::Database(e)),
        }
    }

    /// All raw sets, date ascending. Rowid breaks timestamp ties so the
    /// ordering (and therefore set_index downstream) is stable across runs.
    pub fn list_raw_sets(&self) -> Result<Vec<RawSet>> {
        self.query_raw_sets(&format!(
            "SELECT {RAW_COLUMNS} FROM workout_sets ORDER BY date ASC, rowid ASC"
        ))
    }

    /// Raw sets whose id is absent from the push ledger, date ascending.
    pub fn list_unpushed_raw_sets(&self) -> Result<Vec<RawSet>> {
        self.query_raw_sets(&format!(
            "SELECT {RAW_COLUMNS} FROM workout_sets \
             WHERE id NOT IN (SELECT id FROM pushed_set_ids) \
             ORDER BY date ASC, rowid ASC"
        ))
    }

    fn query_raw_sets(&self, sql: &str) -> Result<Vec<RawSet>> {
        let mut stmt = self.conn.prepare(sql)?;
        let sets = stmt
            .query_map([], |row| {
                Ok(RawSet {
                    id: row.get(0)?,
                    date: row.get(1)?,
                    workout_name: row.get(2)?,
                    duration: row.get(3)?,
                    exercise_name: row.get(4)?,
                    set_order: row.get(5)?,
                    weight: row.get(6)?,
                    reps: row.get(7)?,
                    distance: row.get(8)?,
                    seconds: row.get(9)?,
                    notes: row.get(10)?,
                    workout_notes: row.get(11)?,
                    rpe: row.get(12)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(sets)
    }

    /// Upsert one enriched row, replacing any previous row with the same id.
    pub fn upsert_enriched(&self, set: &EnrichedSet) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT OR REPLACE INTO workout_sets_enriched (id, date,
                exercise_name, set_order, set_index, is_warmup,
                muscle_group_primary, muscle_group_secondary)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                &set.id,
                &set.date,
                &set.exercise_name,
                &set.set_order,
                &set.set_index,
                &set.is_warmup,
                &set.muscle_group_primary.map(MuscleGroup::as_str),
                &set.muscle_group_secondary.map(MuscleGroup::as_str),
            ],
        )?;

        Ok(())
    }

    pub fn get_enriched(&self, id: &str) -> Result<Option<EnrichedSet>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ENRICHED_COLUMNS} FROM workout_sets_enriched WHERE id = ?1"
        ))?;

        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(read_enriched(row)?)),
            None => Ok(None),
        }
    }

    /// All enriched rows, date then set_index ascending.
    pub fn list_enriched(&self) -> Result<Vec<EnrichedSet>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ENRICHED_COLUMNS} FROM workout_sets_enriched \
             ORDER BY date ASC, set_index ASC"
        ))?;

        let mut rows = stmt.query([])?;
        let mut sets = Vec::new();
        while let Some(row) = rows.next()? {
            sets.push(read_enriched(row)?);
        }

        Ok(sets)
    }

    /// Record an id as delivered. Insert-or-ignore; returns `false` when the
    /// id was already in the ledger. Ids are never removed.
    pub fn record_pushed(&self, id: &str) -> Result<bool> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO pushed_set_ids (id) VALUES (?1)",
            [id],
        )?;

        Ok(changed > 0)
    }

    pub fn is_pushed(&self, id: &str) -> Result<bool> {
        let found: Option<String> = self
            .conn
            .query_row("SELECT id FROM pushed_set_ids WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(found.is_some())
    }

    pub fn count_raw(&self) -> Result<usize> {
        self.count("SELECT COUNT(*) FROM workout_sets")
    }

    pub fn count_enriched(&self) -> Result<usize> {
        self.count("SELECT COUNT(*) FROM workout_sets_enriched")
    }

    pub fn count_pushed(&self) -> Result<usize> {
        self.count("SELECT COUNT(*) FROM pushed_set_ids")
    }

    pub fn count_unpushed(&self) -> Result<usize> {
        self.count(
            "SELECT COUNT(*) FROM workout_sets \
             WHERE id NOT IN (SELECT id FROM pushed_set_ids)",
        )
    }

    /// Sets the source itself marked warm-up, via the generated column.
    pub fn count_sentinel_warmups(&self) -> Result<usize> {
        self.count("SELECT COUNT(*) FROM workout_sets WHERE is_warmup = 1")
    }

    fn count(&self, sql: &str) -> Result<usize> {
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Distinct exercise names, alphabetical. Feeds the classification audit.
    pub fn distinct_exercise_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT exercise_name FROM workout_sets ORDER BY exercise_name ASC",
        )?;

        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(names)
    }
}

fn read_enriched(row: &rusqlite::Row) -> Result<EnrichedSet> {
    let primary: Option<String> = row.get(6)?;
    let secondary: Option<String> = row.get(7)?;

    Ok(EnrichedSet {
        id: row.get(0)?,
        date: row.get(1)?,
        exercise_name: row.get(2)?,
        set_order: row.get(3)?,
        set_index: row.get(4)?,
        is_warmup: row.get(5)?,
        muscle_group_primary: parse_group(primary)?,
        muscle_group_secondary: parse_group(secondary)?,
    })
}

fn parse_group(label: Option<String>) -> Result<Option<MuscleGroup>> {
    match label {
        None => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|e: setsync_types::UnknownMuscleGroup| Error::Data(e.to_string())),
    }
}
