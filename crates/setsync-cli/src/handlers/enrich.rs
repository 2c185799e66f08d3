use anyhow::Result;
use owo_colors::OwoColorize;
use setsync_index::Database;
use setsync_runtime::{Config, notifier_from_config, run_enrichment};

use crate::args::OutputFormat;

pub fn handle(db: &Database, config: &Config, format: OutputFormat) -> Result<()> {
    let source = config.enrich.warmup_source()?;
    let notifier = notifier_from_config(&config.notify);

    let summary = run_enrichment(db, source, notifier.as_ref())?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "upserted": summary.upserted,
                    "misses": summary.misses,
                })
            );
        }
        OutputFormat::Plain => {
            println!("{} Enriched {} sets", "✓".green(), summary.upserted);
            for name in &summary.misses {
                println!("  {} no rule matched: {}", "!".yellow(), name);
            }
        }
    }

    Ok(())
}
