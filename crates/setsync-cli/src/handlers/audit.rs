use anyhow::Result;
use owo_colors::OwoColorize;
use setsync_engine::classify;
use setsync_index::Database;
use setsync_types::MuscleGroup;

use crate::args::OutputFormat;

/// Run every known exercise name through the rule table so gaps surface
/// before the next push.
pub fn handle(db: &Database, misses_only: bool, format: OutputFormat) -> Result<()> {
    let names = db.distinct_exercise_names()?;

    let audited: Vec<(String, Vec<MuscleGroup>)> = names
        .into_iter()
        .map(|name| {
            let groups = classify(&name);
            (name, groups)
        })
        .filter(|(_, groups)| !misses_only || groups.is_empty())
        .collect();

    match format {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = audited
                .iter()
                .map(|(name, groups)| {
                    let labels: Vec<&str> = groups.iter().copied().map(MuscleGroup::as_str).collect();
                    serde_json::json!({ "exercise_name": name, "muscle_groups": labels })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Plain => {
            if audited.is_empty() {
                println!("{} Every exercise name is classified", "✓".green());
                return Ok(());
            }
            for (name, groups) in &audited {
                if groups.is_empty() {
                    println!("{:<40} {}", name, "(unclassified)".yellow());
                } else {
                    let labels: Vec<&str> = groups.iter().copied().map(MuscleGroup::as_str).collect();
                    println!("{:<40} {}", name, labels.join(", "));
                }
            }
        }
    }

    Ok(())
}
