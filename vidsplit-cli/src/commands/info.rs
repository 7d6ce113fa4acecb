//! The `info` command: probe a media file and print its properties.

use anyhow::{Context, Result, bail};

use vidsplit_core::external::check_dependency;
use vidsplit_core::format_timestamp;
use vidsplit_core::media::{FfprobeProber, MediaProber};

use crate::cli::InfoArgs;

pub fn run_info(args: InfoArgs) -> Result<()> {
    check_dependency("ffprobe").context("ffprobe is required")?;

    if !args.input.is_file() {
        bail!("input file '{}' does not exist", args.input.display());
    }

    let prober = FfprobeProber::new();
    let properties = prober
        .probe(&args.input)
        .with_context(|| format!("failed to probe {}", args.input.display()))?;

    println!("File:     {}", args.input.display());
    match properties.effective_duration() {
        Some(duration) => println!("Duration: {}", format_timestamp(duration)),
        None => println!("Duration: unknown"),
    }
    println!("FPS:      {:.3}", properties.fps);
    if let Some(frames) = properties.frame_count {
        println!("Frames:   {frames}");
    }

    Ok(())
}
