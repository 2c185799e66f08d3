use std::thread;
use std::time::Duration;

use setsync_engine::classify;
use setsync_index::Database;

use crate::config::TrackerConfig;
use crate::tracker::{TrackerRecord, TrackerSink};
use crate::{Error, Result};

/// Result of one push run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PushSummary {
    pub pushed: usize,
    pub failed: usize,
}

/// Deliver every unpushed set to the tracker, oldest first.
///
/// Callers run enrichment first so every candidate has a current enriched
/// row; a missing row here is a bug, not a recoverable condition. Each id is
/// recorded in the ledger immediately after its delivery succeeds, so an
/// interrupted run resumes where it stopped and never re-delivers. A failed
/// delivery is logged and skipped; the run continues.
pub fn push_new_sets(
    db: &Database,
    config: &TrackerConfig,
    sink: &mut dyn TrackerSink,
    limit: Option<usize>,
) -> Result<PushSummary> {
    let mut candidates = db.list_unpushed_raw_sets()?;
    if let Some(limit) = limit {
        candidates.truncate(limit);
    }

    let mut summary = PushSummary::default();
    for raw in &candidates {
        let enriched = db.get_enriched(&raw.id)?.ok_or_else(|| {
            Error::Delivery(format!("set {} has no enriched row; run enrich first", raw.id))
        })?;

        // the tracker shows the full tag list, not just the stored pair
        let record = TrackerRecord {
            id: raw.id.clone(),
            date: raw.date.clone(),
            exercise_name: raw.exercise_name.clone(),
            set_index: enriched.set_index,
            weight: raw.weight,
            reps: raw.reps,
            is_warmup: enriched.is_warmup,
            muscle_groups: classify(&raw.exercise_name),
            notes: raw.notes.clone(),
        };

        match sink.deliver(&record) {
            Ok(()) => {
                db.record_pushed(&raw.id)?;
                summary.pushed += 1;
            }
            Err(e) => {
                eprintln!("failed to push set {}: {}", raw.id, e);
                summary.failed += 1;
            }
        }

        if config.rate_limit_ms > 0 {
            thread::sleep(Duration::from_millis(config.rate_limit_ms));
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use setsync_engine::WarmupSource;
    use setsync_types::{MuscleGroup, RawSet};

    use super::*;
    use crate::NoopNotifier;
    use crate::enrich::run_enrichment;

    /// Fake sink; fails deliveries whose exercise name it was told to
    /// reject.
    #[derive(Default)]
    struct RecordingSink {
        delivered: Vec<TrackerRecord>,
        reject: Option<String>,
    }

    impl TrackerSink for RecordingSink {
        fn deliver(&mut self, record: &TrackerRecord) -> Result<()> {
            if self.reject.as_deref() == Some(record.exercise_name.as_str()) {
                return Err(Error::Delivery("rejected".to_string()));
            }
            self.delivered.push(record.clone());
            Ok(())
        }
    }

    fn config() -> TrackerConfig {
        TrackerConfig {
            rate_limit_ms: 0,
            ..Default::default()
        }
    }

    fn raw(id: &str, date: &str, exercise: &str, weight: f64, reps: i64) -> RawSet {
        RawSet {
            id: id.to_string(),
            date: date.to_string(),
            workout_name: "Workout".to_string(),
            duration: "1h".to_string(),
            exercise_name: exercise.to_string(),
            set_order: 1,
            weight: Some(weight),
            reps: Some(reps),
            distance: None,
            seconds: None,
            notes: None,
            workout_notes: None,
            rpe: None,
        }
    }

    fn seeded_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.insert_raw_set(&raw("a", "2024-03-04 17:30:00", "Bench Press", 20.0, 10))
            .unwrap();
        db.insert_raw_set(&raw("b", "2024-03-04 17:35:00", "Bench Press", 60.0, 8))
            .unwrap();
        db.insert_raw_set(&raw("c", "2024-03-05 18:00:00", "Squat (Barbell)", 100.0, 5))
            .unwrap();
        run_enrichment(&db, WarmupSource::default(), &NoopNotifier).unwrap();
        db
    }

    #[test]
    fn pushes_unpushed_sets_oldest_first() {
        let db = seeded_db();
        let mut sink = RecordingSink::default();

        let summary = push_new_sets(&db, &config(), &mut sink, None).unwrap();

        assert_eq!(summary, PushSummary { pushed: 3, failed: 0 });
        let ids: Vec<&str> = sink.delivered.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(db.count_unpushed().unwrap(), 0);
    }

    #[test]
    fn records_carry_enrichment_and_full_tag_list() {
        let db = seeded_db();
        let mut sink = RecordingSink::default();

        push_new_sets(&db, &config(), &mut sink, None).unwrap();

        let first = &sink.delivered[0];
        assert!(first.is_warmup);
        assert_eq!(first.set_index, 0);
        assert_eq!(
            first.muscle_groups,
            [MuscleGroup::Chest, MuscleGroup::Triceps]
        );

        let squat = &sink.delivered[2];
        assert_eq!(squat.muscle_groups, [MuscleGroup::Legs]);
        assert_eq!(squat.weight, Some(100.0));
    }

    #[test]
    fn second_run_is_idempotent() {
        let db = seeded_db();
        let mut sink = RecordingSink::default();
        push_new_sets(&db, &config(), &mut sink, None).unwrap();

        let summary = push_new_sets(&db, &config(), &mut sink, None).unwrap();
        assert_eq!(summary, PushSummary::default());
        assert_eq!(sink.delivered.len(), 3);
    }

    #[test]
    fn failed_rows_stay_unpushed_and_do_not_block_the_rest() {
        let db = seeded_db();
        let mut sink = RecordingSink {
            reject: Some("Bench Press".to_string()),
            ..Default::default()
        };

        let summary = push_new_sets(&db, &config(), &mut sink, None).unwrap();
        assert_eq!(summary, PushSummary { pushed: 1, failed: 2 });
        assert_eq!(db.count_unpushed().unwrap(), 2);
        assert!(db.is_pushed("c").unwrap());

        // the failed rows are retried on the next run
        sink.reject = None;
        let retry = push_new_sets(&db, &config(), &mut sink, None).unwrap();
        assert_eq!(retry, PushSummary { pushed: 2, failed: 0 });
        assert_eq!(db.count_unpushed().unwrap(), 0);
    }

    #[test]
    fn limit_truncates_the_batch() {
        let db = seeded_db();
        let mut sink = RecordingSink::default();

        let summary = push_new_sets(&db, &config(), &mut sink, Some(2)).unwrap();
        assert_eq!(summary.pushed, 2);
        assert_eq!(db.count_unpushed().unwrap(), 1);
        assert!(!db.is_pushed("c").unwrap());
    }

    #[test]
    fn missing_enriched_row_is_an_error() {
        let db = Database::open_in_memory().unwrap();
        db.insert_raw_set(&raw("a", "2024-03-04 17:30:00", "Bench Press", 60.0, 8))
            .unwrap();

        let mut sink = RecordingSink::default();
        let err = push_new_sets(&db, &config(), &mut sink, None).unwrap_err();
        assert!(err.to_string().contains("run enrich first"));
    }
}
