use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::MuscleGroup;

/// `set_order` value a source uses to mark a set as warm-up at capture time.
pub const WARMUP_SENTINEL: i64 = -1;

/// One recorded exercise set, exactly as imported.
///
/// Identified by a content hash of its row (`set_id`). Created once on
/// import, never mutated, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSet {
    /// Content hash of the imported row (stable identity).
    pub id: String,
    /// Workout timestamp as exported (`YYYY-MM-DD HH:MM:SS` or bare date).
    pub date: String,
    pub workout_name: String,
    pub duration: String,
    /// Free-text exercise name; input to the classification engine.
    pub exercise_name: String,
    /// Position within the workout; `WARMUP_SENTINEL` marks a capture-time
    /// warm-up.
    pub set_order: i64,
    pub weight: Option<f64>,
    pub reps: Option<i64>,
    pub distance: Option<f64>,
    pub seconds: Option<i64>,
    pub notes: Option<String>,
    pub workout_notes: Option<String>,
    pub rpe: Option<f64>,
}

impl RawSet {
    /// Calendar day of the set, if the date is parseable.
    pub fn day(&self) -> Option<NaiveDate> {
        parse_day(&self.date)
    }

    /// Working volume: weight × reps, missing operands contributing zero.
    pub fn work(&self) -> f64 {
        self.weight.unwrap_or(0.0) * self.reps.unwrap_or(0) as f64
    }

    /// Whether the source marked this set warm-up at capture time.
    pub fn sentinel_warmup(&self) -> bool {
        self.set_order == WARMUP_SENTINEL
    }
}

/// Derived view of a `RawSet`, one per raw id.
///
/// Recomputed in full on every enrichment run and upserted
/// replace-on-conflict; `set_index` is therefore stable only until the raw
/// ordering of its day changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedSet {
    pub id: String,
    pub date: String,
    pub exercise_name: String,
    pub set_order: i64,
    /// Zero-based position within the calendar day, in date order.
    pub set_index: i64,
    pub is_warmup: bool,
    pub muscle_group_primary: Option<MuscleGroup>,
    pub muscle_group_secondary: Option<MuscleGroup>,
}

/// Parse the calendar day out of an exported timestamp.
pub fn parse_day(date: &str) -> Option<NaiveDate> {
    parse_datetime(date).map(|dt| dt.date())
}

/// Parse an exported timestamp, taking midnight for bare dates.
pub fn parse_datetime(date: &str) -> Option<NaiveDateTime> {
    let date = date.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> RawSet {
        RawSet {
            id: "abc".to_string(),
            date: "2024-03-04 17:30:00".to_string(),
            workout_name: "Push Day".to_string(),
            duration: "1h".to_string(),
            exercise_name: "Bench Press (Barbell)".to_string(),
            set_order: 1,
            weight: Some(60.0),
            reps: Some(8),
            distance: None,
            seconds: None,
            notes: None,
            workout_notes: None,
            rpe: Some(7.5),
        }
    }

    #[test]
    fn day_from_datetime() {
        assert_eq!(
            parse_day("2024-03-04 17:30:00"),
            NaiveDate::from_ymd_opt(2024, 3, 4)
        );
    }

    #[test]
    fn day_from_bare_date() {
        assert_eq!(parse_day("2024-03-04"), NaiveDate::from_ymd_opt(2024, 3, 4));
    }

    #[test]
    fn unparseable_date_is_none() {
        assert_eq!(parse_day("yesterday"), None);
        assert_eq!(parse_day(""), None);
    }

    #[test]
    fn work_is_weight_times_reps() {
        let set = sample_set();
        assert_eq!(set.work(), 480.0);
    }

    #[test]
    fn missing_operands_contribute_zero_work() {
        let mut set = sample_set();
        set.weight = None;
        assert_eq!(set.work(), 0.0);

        let mut set = sample_set();
        set.reps = None;
        assert_eq!(set.work(), 0.0);
    }

    #[test]
    fn sentinel_marks_capture_time_warmup() {
        let mut set = sample_set();
        assert!(!set.sentinel_warmup());
        set.set_order = WARMUP_SENTINEL;
        assert!(set.sentinel_warmup());
    }
}
