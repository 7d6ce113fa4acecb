//! CLI argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Vidsplit: timeline-based video splitting tool",
    long_about = "Normalizes a source video into a vertical working copy, cuts it at the \
                  given split points, and exports the active segments as separate clips or \
                  one merged clip via ffmpeg."
)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize a video, cut it at the given split points, and export
    Split(SplitArgs),
    /// Probe a media file and print its properties
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
pub struct SplitArgs {
    /// Input video file
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,

    /// Split point in seconds; repeat for multiple cut points
    #[arg(short = 's', long = "split", value_name = "SECONDS")]
    pub splits: Vec<f64>,

    /// Deactivate the segment containing this timestamp; repeatable
    #[arg(short = 'd', long = "deactivate", value_name = "SECONDS")]
    pub deactivate: Vec<f64>,

    /// Concatenate all active segments into one output file
    #[arg(short, long)]
    pub merge: bool,

    /// Seconds trimmed from the end of every exported segment
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = vidsplit_core::config::DEFAULT_BOUNDARY_TRIM_SECS
    )]
    pub boundary_trim: f64,

    /// Directory for the temporary working file (defaults to the system temp dir)
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Emit machine-readable JSON events on stdout instead of a progress bar
    #[arg(long)]
    pub json_events: bool,
}

#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Media file to probe
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,
}
