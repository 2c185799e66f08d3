use anyhow::Result;
use setsync_index::Database;
use setsync_runtime::Config;
use setsync_runtime::config::{config_path, db_path, resolve_data_dir};

use super::args::{Cli, Commands};
use super::handlers;

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;

    let Some(command) = cli.command else {
        show_guidance(&data_dir);
        return Ok(());
    };

    std::fs::create_dir_all(&data_dir)?;
    let config = Config::load_from(&config_path(&data_dir))?;
    let db_file = db_path(&data_dir);
    let db = Database::open(&db_file)?;

    match command {
        Commands::Import { csv_path } => {
            handlers::import::handle(&db, &config, csv_path, cli.format)
        }

        Commands::Enrich => handlers::enrich::handle(&db, &config, cli.format),

        Commands::Push { dry_run, limit } => {
            handlers::push::handle(&db, &config, dry_run, limit, cli.format)
        }

        Commands::Volume { weeks } => handlers::volume::handle(&db, &config, weeks, cli.format),

        Commands::Status => handlers::status::handle(&db, &db_file, cli.format),

        Commands::Audit { misses_only } => handlers::audit::handle(&db, misses_only, cli.format),
    }
}

fn show_guidance(data_dir: &std::path::Path) {
    println!("setsync - Workout log sync\n");

    if !db_path(data_dir).exists() {
        println!("Get started:");
        println!("  setsync import <export.csv>       # Load your workout export\n");
    }

    println!("Quick commands:");
    println!("  setsync import <export.csv>       # Load new sets");
    println!("  setsync enrich                    # Classify and flag warm-ups");
    println!("  setsync push                      # Deliver new sets to the tracker");
    println!("  setsync volume --weeks 4          # Weekly sets per muscle group");
    println!("  setsync status                    # Row counts and sync state\n");

    println!("For more commands:");
    println!("  setsync --help");
}
