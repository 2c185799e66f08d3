// Orchestration and side effects: configuration, CSV import, the enrichment
// and push jobs, and the HTTP clients for the external tracker and the
// advisory notification channel. The jobs run strictly sequentially; every
// external call is blocking and isolated per row.

pub mod config;
mod enrich;
mod error;
mod import;
mod notify;
mod push;
pub mod tracker;

pub use config::{Config, resolve_data_dir};
pub use enrich::{EnrichSummary, run_enrichment};
pub use error::{Error, Result};
pub use import::{ImportSummary, import_csv};
pub use notify::{NoopNotifier, Notifier, PushNotifier, notifier_from_config};
pub use push::{PushSummary, push_new_sets};
pub use tracker::{NotionTracker, TrackerRecord, TrackerSink};
