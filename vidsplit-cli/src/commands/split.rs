//! The `split` command: normalize, cut, export.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use console::style;

use vidsplit_core::config::CoreConfigBuilder;
use vidsplit_core::controller::SessionController;
use vidsplit_core::events::EventDispatcher;
use vidsplit_core::events::json_handler::JsonEventHandler;
use vidsplit_core::external::{FfmpegEncoder, check_dependency};
use vidsplit_core::media::FfprobeProber;
use vidsplit_core::{format_duration_secs, format_timestamp_compact};

use crate::cli::SplitArgs;
use crate::progress::ProgressBarHandler;

pub fn run_split(args: SplitArgs) -> Result<()> {
    let start_time = Instant::now();

    check_dependency("ffmpeg").context("ffmpeg is required")?;
    check_dependency("ffprobe").context("ffprobe is required")?;

    if !args.input.is_file() {
        bail!("input file '{}' does not exist", args.input.display());
    }

    let mut builder = CoreConfigBuilder::new().boundary_trim_secs(args.boundary_trim);
    if let Some(dir) = &args.temp_dir {
        builder = builder.temp_dir(dir.clone());
    }
    let config = builder.build();

    let mut dispatcher = EventDispatcher::new();
    if args.json_events {
        dispatcher.add_handler(Arc::new(JsonEventHandler::new()));
    } else {
        dispatcher.add_handler(Arc::new(ProgressBarHandler::new()));
    }

    let encoder = Arc::new(FfmpegEncoder::new(&config));
    let prober = Arc::new(FfprobeProber::new());
    let mut controller = SessionController::new(encoder, prober, config, Arc::new(dispatcher));

    if !args.json_events {
        println!(
            "Vidsplit run started: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        println!("Normalizing {} ...", args.input.display());
    }

    let session = controller
        .begin_preprocess(&args.input)
        .context("failed to start preprocessing")?
        .join()
        .context("preprocessing failed")?;
    let total = session.total_duration();
    controller.complete_preprocess(session);

    if !args.json_events {
        println!("Working copy ready ({})", format_duration_secs(total));
    }

    for &t in &args.splits {
        controller
            .timeline_mut()
            .add_split(t)
            .with_context(|| format!("invalid split point {t}"))?;
    }
    for &at in &args.deactivate {
        controller.timeline_mut().toggle_deactivation(at);
    }

    let plan = controller.timeline().segments();
    if !args.json_events {
        let active = plan.iter().filter(|s| s.active).count();
        println!("Timeline: {} segment(s), {} active", plan.len(), active);
        for segment in &plan {
            let marker = if segment.active { "+" } else { "-" };
            println!(
                "  {marker} {} - {}",
                format_timestamp_compact(segment.start),
                format_timestamp_compact(segment.end)
            );
        }
    }

    let report = controller
        .begin_export(args.merge)
        .context("failed to start export")?
        .join()
        .context("export failed")?;

    if args.json_events {
        return Ok(());
    }

    if report.segments_processed == 0 {
        println!(
            "{}",
            style("No active segments; nothing was exported.").yellow()
        );
        return Ok(());
    }

    println!(
        "{} Processed {} segment(s).",
        style("Success:").green().bold(),
        report.segments_processed
    );
    if let Some(merged) = &report.merged_output {
        println!("Merged output: {}", merged.display());
    } else {
        for output in &report.outputs {
            println!("  {}", output.display());
        }
    }
    println!(
        "Total run time: {}",
        format_duration_secs(start_time.elapsed().as_secs_f64())
    );

    Ok(())
}
