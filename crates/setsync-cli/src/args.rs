use std::fmt;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Parser)]
#[command(name = "setsync")]
#[command(about = "Import, classify, and republish workout sets", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a workout export into the local database
    Import {
        /// Export file; falls back to import.csv_path from config.toml
        csv_path: Option<PathBuf>,
    },

    /// Rebuild the enriched view: set_index, warm-up flags, muscle groups
    Enrich,

    /// Deliver unpushed sets to the configured tracker
    Push {
        /// List the candidates without delivering anything
        #[arg(long)]
        dry_run: bool,

        /// Cap the number of sets delivered this run
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Weekly set volume per muscle group
    Volume {
        /// Only show the most recent N weeks
        #[arg(long)]
        weeks: Option<usize>,
    },

    /// Row counts across the raw table, the enriched view, and the ledger
    Status,

    /// Classify every known exercise name against the rule table
    Audit {
        /// Only show names no rule matched
        #[arg(long)]
        misses_only: bool,
    },
}
