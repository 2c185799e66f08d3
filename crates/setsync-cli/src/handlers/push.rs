use anyhow::Result;
use owo_colors::OwoColorize;
use setsync_index::Database;
use setsync_runtime::{Config, NotionTracker, notifier_from_config, push_new_sets, run_enrichment};

use crate::args::OutputFormat;

pub fn handle(
    db: &Database,
    config: &Config,
    dry_run: bool,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    // push always works from a current enriched view
    let source = config.enrich.warmup_source()?;
    let notifier = notifier_from_config(&config.notify);
    run_enrichment(db, source, notifier.as_ref())?;

    if dry_run {
        return list_candidates(db, limit, format);
    }

    let (Some(token), Some(database_id)) = (&config.tracker.token, &config.tracker.database_id)
    else {
        anyhow::bail!(
            "tracker is not configured; set tracker.token and tracker.database_id in config.toml"
        );
    };

    let mut tracker = NotionTracker::new(
        &config.tracker.api_base,
        token,
        database_id,
        &config.tracker.utc_offset,
    )?;

    let summary = push_new_sets(db, &config.tracker, &mut tracker, limit)?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "pushed": summary.pushed,
                    "failed": summary.failed,
                })
            );
        }
        OutputFormat::Plain => {
            println!("{} Pushed {} new sets", "✓".green(), summary.pushed);
            if summary.failed > 0 {
                println!(
                    "  {} {} deliveries failed; they stay queued for the next run",
                    "!".yellow(),
                    summary.failed
                );
            }
        }
    }

    Ok(())
}

fn list_candidates(db: &Database, limit: Option<usize>, format: OutputFormat) -> Result<()> {
    let mut candidates = db.list_unpushed_raw_sets()?;
    if let Some(limit) = limit {
        candidates.truncate(limit);
    }

    match format {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = candidates
                .iter()
                .map(|set| {
                    serde_json::json!({
                        "id": set.id,
                        "date": set.date,
                        "exercise_name": set.exercise_name,
                    })
                })
                .collect();
            println!("{}", serde_json::json!({ "candidates": rows }));
        }
        OutputFormat::Plain => {
            if candidates.is_empty() {
                println!("{} Nothing to push", "✓".green());
                return Ok(());
            }
            println!("Would push {} sets:", candidates.len());
            for set in &candidates {
                println!("  {}  {}", set.date, set.exercise_name);
            }
        }
    }

    Ok(())
}
