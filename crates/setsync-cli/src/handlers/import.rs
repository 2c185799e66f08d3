use std::path::PathBuf;

use anyhow::Result;
use owo_colors::OwoColorize;
use setsync_index::Database;
use setsync_runtime::{Config, import_csv};

use crate::args::OutputFormat;

pub fn handle(
    db: &Database,
    config: &Config,
    csv_path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let path = match csv_path.or_else(|| config.import.csv_path.clone()) {
        Some(path) => path,
        None => anyhow::bail!(
            "no export file given; pass a path or set import.csv_path in config.toml"
        ),
    };

    let summary = import_csv(db, &path)?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "inserted": summary.inserted,
                    "duplicates": summary.duplicates,
                })
            );
        }
        OutputFormat::Plain => {
            println!(
                "{} Imported {} new sets ({} duplicates skipped)",
                "✓".green(),
                summary.inserted,
                summary.duplicates
            );
            if summary.inserted > 0 {
                println!("  Run `setsync enrich` to refresh the enriched view");
            }
        }
    }

    Ok(())
}
