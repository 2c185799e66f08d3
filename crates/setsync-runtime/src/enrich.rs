use setsync_engine::{WarmupSource, build_enrichment};
use setsync_index::Database;

use crate::Result;
use crate::notify::Notifier;

/// Result of one enrichment run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichSummary {
    pub upserted: usize,
    pub misses: Vec<String>,
}

/// Rebuild the enriched view from the full raw table and upsert every row.
///
/// Always a full recompute; a late import with an earlier date shifts
/// set_index for its whole day, and the upsert overwrites the stale rows.
/// Each distinct unclassified exercise name raises one notification.
pub fn run_enrichment(
    db: &Database,
    source: WarmupSource,
    notifier: &dyn Notifier,
) -> Result<EnrichSummary> {
    let raw = db.list_raw_sets()?;
    if raw.is_empty() {
        return Ok(EnrichSummary::default());
    }

    let enrichment = build_enrichment(&raw, source);

    for set in &enrichment.sets {
        db.upsert_enriched(set)?;
    }

    let mut misses = Vec::with_capacity(enrichment.misses.len());
    for miss in &enrichment.misses {
        notifier.notify(&format!(
            "Exercise not classified: {} (normalized: {})",
            miss.original, miss.normalized
        ));
        misses.push(miss.original.clone());
    }

    Ok(EnrichSummary {
        upserted: enrichment.sets.len(),
        misses,
    })
}
