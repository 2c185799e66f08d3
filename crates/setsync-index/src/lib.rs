// Durable storage for setsync.
//
// Three tables: raw sets keyed by content hash (insert-only, duplicates
// rejected by the primary key), enriched sets keyed by the same hash
// (replace-on-conflict, rebuilt every enrichment run), and the push ledger
// (insert-or-ignore, append-only).

mod db;
mod error;
mod schema;

pub use db::Database;
pub use error::{Error, Result};
pub use schema::SCHEMA_VERSION;
