// Domain types shared across the setsync crates.
// Pure data and identity; no storage or network concerns here.

mod hash;
mod muscle;
mod set;

pub use hash::set_id;
pub use muscle::{MuscleGroup, UnknownMuscleGroup};
pub use set::{EnrichedSet, RawSet, WARMUP_SENTINEL, parse_datetime, parse_day};
