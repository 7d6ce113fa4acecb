// vidsplit-cli/src/main.rs
//
// Command-line entry point for vidsplit. Parses arguments, initializes
// logging, and dispatches to the subcommand implementations in `commands`.

use clap::Parser;
use log::LevelFilter;

mod cli;
mod commands;
mod progress;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    let result = match cli.command {
        Commands::Split(args) => commands::split::run_split(args),
        Commands::Info(args) => commands::info::run_info(args),
    };

    if let Err(e) = result {
        eprintln!("{} {e:#}", console::style("Error:").red().bold());
        std::process::exit(1);
    }
}
