use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use setsync_types::{EnrichedSet, MuscleGroup, parse_day};

/// Weights applied when counting a set toward its groups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeWeights {
    pub primary: f64,
    pub secondary: f64,
}

impl Default for VolumeWeights {
    fn default() -> Self {
        Self {
            primary: 1.0,
            secondary: 0.5,
        }
    }
}

/// Weekly set volume for one muscle group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyVolume {
    pub week_start: NaiveDate,
    pub group: MuscleGroup,
    pub volume: f64,
}

/// Most recent Monday on or before `day`.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}

/// Aggregate enriched sets into set volume per muscle group per week.
///
/// Warm-ups and rehab work are excluded. Each remaining set contributes
/// `weights.primary` to its primary group and `weights.secondary` to its
/// secondary one. Output is ordered by week, then by group priority.
pub fn weekly_volume(sets: &[EnrichedSet], weights: VolumeWeights) -> Vec<WeeklyVolume> {
    let mut buckets: BTreeMap<(NaiveDate, MuscleGroup), f64> = BTreeMap::new();

    for set in sets {
        if set.is_warmup {
            continue;
        }
        let Some(primary) = set.muscle_group_primary else {
            continue;
        };
        if primary == MuscleGroup::Rehab {
            continue;
        }
        let Some(day) = parse_day(&set.date) else {
            continue;
        };

        let week = week_start(day);
        *buckets.entry((week, primary)).or_insert(0.0) += weights.primary;
        if let Some(secondary) = set.muscle_group_secondary
            && secondary != MuscleGroup::Rehab
        {
            *buckets.entry((week, secondary)).or_insert(0.0) += weights.secondary;
        }
    }

    buckets
        .into_iter()
        .map(|((week_start, group), volume)| WeeklyVolume {
            week_start,
            group,
            volume,
        })
        .collect()
}
