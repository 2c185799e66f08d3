// Pure computation over workout sets. This crate performs no I/O: the
// classification rule table, the warm-up detector, the enrichment builder,
// and the weekly-volume read model are all plain data in, plain data out.

mod classify;
mod enrich;
mod volume;
mod warmup;

pub use classify::{classify, normalize_name};
pub use enrich::{ClassificationMiss, Enrichment, WarmupSource, build_enrichment};
pub use volume::{VolumeWeights, WeeklyVolume, week_start, weekly_volume};
pub use warmup::{DEFAULT_WORK_THRESHOLD, detect_warmups};
