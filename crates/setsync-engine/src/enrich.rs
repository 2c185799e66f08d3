use std::collections::HashMap;

use chrono::NaiveDate;
use setsync_types::{EnrichedSet, MuscleGroup, RawSet};

use crate::classify::{classify, normalize_name};
use crate::warmup::{DEFAULT_WORK_THRESHOLD, detect_warmups};

/// Which signal decides `EnrichedSet::is_warmup`.
///
/// Two independent signals exist: the capture-time `set_order` sentinel and
/// the post-hoc volume detector. They may legitimately disagree; one source
/// is configured per run and every downstream consumer reads the result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WarmupSource {
    /// Infer warm-ups from relative working volume per (day, exercise).
    Detector { threshold: f64 },
    /// Trust the source's capture-time mark.
    Sentinel,
}

impl Default for WarmupSource {
    fn default() -> Self {
        WarmupSource::Detector {
            threshold: DEFAULT_WORK_THRESHOLD,
        }
    }
}

/// An exercise name no rule matched. Advisory, not an error; the set keeps
/// null groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationMiss {
    pub original: String,
    pub normalized: String,
}

/// Output of one enrichment pass over the full raw table.
#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    pub sets: Vec<EnrichedSet>,
    pub misses: Vec<ClassificationMiss>,
}

/// Build the full enriched view of `raw`, which must already be ordered
/// date ascending. Everything is recomputed from scratch: `set_index` is a
/// fresh per-day counter, classification runs against the current rule
/// table, warm-up flags come from the configured source. Never incremental.
pub fn build_enrichment(raw: &[RawSet], source: WarmupSource) -> Enrichment {
    // classify each distinct name once; record each miss once
    let mut labels: HashMap<&str, Vec<MuscleGroup>> = HashMap::new();
    let mut misses: Vec<ClassificationMiss> = Vec::new();
    for set in raw {
        if !labels.contains_key(set.exercise_name.as_str()) {
            let groups = classify(&set.exercise_name);
            if groups.is_empty() {
                misses.push(ClassificationMiss {
                    original: set.exercise_name.clone(),
                    normalized: normalize_name(&set.exercise_name),
                });
            }
            labels.insert(set.exercise_name.as_str(), groups);
        }
    }

    // set_index: zero-based running counter per calendar day, input order
    let mut day_counters: HashMap<Option<NaiveDate>, i64> = HashMap::new();
    let mut set_indices = Vec::with_capacity(raw.len());
    for set in raw {
        let counter = day_counters.entry(set.day()).or_insert(0);
        set_indices.push(*counter);
        *counter += 1;
    }

    let warmups = match source {
        WarmupSource::Sentinel => raw.iter().map(RawSet::sentinel_warmup).collect(),
        WarmupSource::Detector { threshold } => detect_warmups_by_group(raw, threshold),
    };

    let sets = raw
        .iter()
        .enumerate()
        .map(|(i, set)| {
            let groups = &labels[set.exercise_name.as_str()];
            EnrichedSet {
                id: set.id.clone(),
                date: set.date.clone(),
                exercise_name: set.exercise_name.clone(),
                set_order: set.set_order,
                set_index: set_indices[i],
                is_warmup: warmups[i],
                muscle_group_primary: groups.first().copied(),
                muscle_group_secondary: groups.get(1).copied(),
            }
        })
        .collect();

    Enrichment { sets, misses }
}

/// Run the detector over each (day, exercise) group, mapping flags back to
/// original positions.
fn detect_warmups_by_group(raw: &[RawSet], threshold: f64) -> Vec<bool> {
    let mut groups: HashMap<(Option<NaiveDate>, &str), Vec<usize>> = HashMap::new();
    for (i, set) in raw.iter().enumerate() {
        groups
            .entry((set.day(), set.exercise_name.as_str()))
            .or_default()
            .push(i);
    }

    let mut flags = vec![false; raw.len()];
    for indices in groups.values() {
        let work: Vec<f64> = indices.iter().map(|&i| raw[i].work()).collect();
        for (pos, flag) in detect_warmups(&work, threshold).into_iter().enumerate() {
            flags[indices[pos]] = flag;
        }
    }

    flags
}
