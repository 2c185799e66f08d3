use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use setsync_index::Database;
use setsync_types::{RawSet, set_id};

use crate::{Error, Result};

/// One row of the delimited export, addressed by column name.
#[derive(Debug, Deserialize)]
struct ExportRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Workout Name")]
    workout_name: String,
    #[serde(rename = "Duration")]
    duration: String,
    #[serde(rename = "Exercise Name")]
    exercise_name: String,
    #[serde(rename = "Set Order")]
    set_order: i64,
    #[serde(rename = "Weight")]
    weight: Option<f64>,
    #[serde(rename = "Reps")]
    reps: Option<i64>,
    #[serde(rename = "Distance")]
    distance: Option<f64>,
    #[serde(rename = "Seconds")]
    seconds: Option<i64>,
    #[serde(rename = "Notes")]
    notes: Option<String>,
    #[serde(rename = "Workout Notes")]
    workout_notes: Option<String>,
    #[serde(rename = "RPE")]
    rpe: Option<f64>,
}

/// Result of one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub duplicates: usize,
}

/// Import a delimited export into the raw table.
///
/// Each row's id is the content hash of its raw field strings, so
/// re-importing an unchanged export inserts nothing. Duplicates are counted
/// and skipped; a malformed row aborts the import with a diagnostic naming
/// its line. An empty export is a clean no-op.
pub fn import_csv(db: &Database, path: &Path) -> Result<ImportSummary> {
    let file = File::open(path)
        .map_err(|e| Error::Import(format!("cannot open {}: {}", path.display(), e)))?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers()?.clone();

    let mut summary = ImportSummary::default();
    for record in reader.records() {
        let record = record?;

        // hash the raw field strings, before any parsing
        let id = set_id(record.iter());

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: ExportRow = record
            .deserialize(Some(&headers))
            .map_err(|e| Error::Import(format!("line {}: {}", line, e)))?;

        let set = RawSet {
            id,
            date: row.date,
            workout_name: row.workout_name,
            duration: row.duration,
            exercise_name: row.exercise_name,
            set_order: row.set_order,
            weight: row.weight,
            reps: row.reps,
            distance: row.distance,
            seconds: row.seconds,
            notes: row.notes,
            workout_notes: row.workout_notes,
            rpe: row.rpe,
        };

        if db.insert_raw_set(&set)? {
            summary.inserted += 1;
        } else {
            summary.duplicates += 1;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str = "Date,Workout Name,Duration,Exercise Name,Set Order,\
         Weight,Reps,Distance,Seconds,Notes,Workout Notes,RPE\n";

    fn write_csv(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("export.csv");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn imports_rows_and_counts_inserts() {
        let dir = TempDir::new().unwrap();
        let csv = format!(
            "{HEADER}\
             2024-03-04 17:30:00,Push Day,1h,Bench Press (Barbell),1,60.0,8,,,,,7.5\n\
             2024-03-04 17:35:00,Push Day,1h,Bench Press (Barbell),2,60.0,8,,,,,\n"
        );
        let path = write_csv(&dir, &csv);

        let db = Database::open_in_memory().unwrap();
        let summary = import_csv(&db, &path).unwrap();

        assert_eq!(summary.inserted, 2);
        assert_eq!(summary.duplicates, 0);

        let sets = db.list_raw_sets().unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].exercise_name, "Bench Press (Barbell)");
        assert_eq!(sets[0].weight, Some(60.0));
        assert_eq!(sets[0].reps, Some(8));
        assert_eq!(sets[0].rpe, Some(7.5));
        assert_eq!(sets[0].distance, None);
        assert_eq!(sets[1].rpe, None);
    }

    #[test]
    fn reimport_inserts_zero_new_rows() {
        let dir = TempDir::new().unwrap();
        let csv = format!(
            "{HEADER}2024-03-04 17:30:00,Push Day,1h,Bench Press,1,60.0,8,,,,,\n"
        );
        let path = write_csv(&dir, &csv);

        let db = Database::open_in_memory().unwrap();
        let first = import_csv(&db, &path).unwrap();
        assert_eq!(first.inserted, 1);

        let second = import_csv(&db, &path).unwrap();
        assert_eq!(second.inserted, 0);
        assert_eq!(second.duplicates, 1);
        assert_eq!(db.count_raw().unwrap(), 1);
    }

    #[test]
    fn header_only_export_is_a_clean_no_op() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, HEADER);

        let db = Database::open_in_memory().unwrap();
        let summary = import_csv(&db, &path).unwrap();

        assert_eq!(summary, ImportSummary::default());
    }

    #[test]
    fn sentinel_set_order_round_trips() {
        let dir = TempDir::new().unwrap();
        let csv = format!(
            "{HEADER}2024-03-04 17:30:00,Push Day,1h,Bench Press,-1,20.0,10,,,,,\n"
        );
        let path = write_csv(&dir, &csv);

        let db = Database::open_in_memory().unwrap();
        import_csv(&db, &path).unwrap();

        let sets = db.list_raw_sets().unwrap();
        assert!(sets[0].sentinel_warmup());
        assert_eq!(db.count_sentinel_warmups().unwrap(), 1);
    }

    #[test]
    fn missing_file_is_an_import_error() {
        let db = Database::open_in_memory().unwrap();
        let err = import_csv(&db, Path::new("/nonexistent/export.csv")).unwrap_err();
        assert!(matches!(err, Error::Import(_)));
    }

    #[test]
    fn malformed_row_names_its_line() {
        let dir = TempDir::new().unwrap();
        let csv = format!(
            "{HEADER}2024-03-04 17:30:00,Push Day,1h,Bench Press,not-a-number,60.0,8,,,,,\n"
        );
        let path = write_csv(&dir, &csv);

        let db = Database::open_in_memory().unwrap();
        let err = import_csv(&db, &path).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
