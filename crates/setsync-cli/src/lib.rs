mod args;
mod commands;
mod handlers;

pub use args::{Cli, Commands, OutputFormat};
pub use commands::run;
