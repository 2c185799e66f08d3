use std::path::Path;

use anyhow::Result;
use setsync_index::Database;

use crate::args::OutputFormat;

pub fn handle(db: &Database, db_path: &Path, format: OutputFormat) -> Result<()> {
    let raw = db.count_raw()?;
    let enriched = db.count_enriched()?;
    let pushed = db.count_pushed()?;
    let unpushed = db.count_unpushed()?;
    let sentinel_warmups = db.count_sentinel_warmups()?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "db_path": db_path.display().to_string(),
                    "raw": raw,
                    "enriched": enriched,
                    "pushed": pushed,
                    "unpushed": unpushed,
                    "sentinel_warmups": sentinel_warmups,
                })
            );
        }
        OutputFormat::Plain => {
            println!("Database:          {}", db_path.display());
            println!("Raw sets:          {}", raw);
            println!("Enriched sets:     {}", enriched);
            println!("Pushed:            {}", pushed);
            println!("Awaiting push:     {}", unpushed);
            println!("Sentinel warm-ups: {}", sentinel_warmups);

            if enriched < raw {
                println!("\nEnriched view is behind; run `setsync enrich`");
            }
        }
    }

    Ok(())
}
