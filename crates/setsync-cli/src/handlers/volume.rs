use anyhow::Result;
use setsync_engine::{VolumeWeights, WeeklyVolume, weekly_volume};
use setsync_index::Database;
use setsync_runtime::Config;

use crate::args::OutputFormat;

pub fn handle(
    db: &Database,
    config: &Config,
    weeks: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let sets = db.list_enriched()?;
    let weights = VolumeWeights {
        primary: config.volume.primary_weight,
        secondary: config.volume.secondary_weight,
    };

    let mut rows = weekly_volume(&sets, weights);
    if let Some(weeks) = weeks {
        let mut starts: Vec<_> = rows.iter().map(|r| r.week_start).collect();
        starts.dedup();
        if starts.len() > weeks {
            let cutoff = starts[starts.len() - weeks];
            rows.retain(|r| r.week_start >= cutoff);
        }
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Plain => print_volume_table(&rows),
    }

    Ok(())
}

fn print_volume_table(rows: &[WeeklyVolume]) {
    if rows.is_empty() {
        println!("No working sets recorded; run `setsync enrich` after importing");
        return;
    }

    let mut current_week = None;
    for row in rows {
        if current_week != Some(row.week_start) {
            current_week = Some(row.week_start);
            println!("Week of {}", row.week_start.format("%Y-%m-%d"));
        }
        println!("  {:<10} {:>6.1}", row.group.as_str(), row.volume);
    }
}
