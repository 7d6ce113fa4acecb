//! FFmpeg implementation of the encoder contract.
//!
//! Builds the argument lists for the three invocation modes (normalize,
//! extract, concat) and runs them through `util::command`. The argument
//! builders are free functions so their output can be asserted in tests
//! without spawning anything.

use std::path::Path;
use std::process::Command;

use log::info;

use crate::config::CoreConfig;
use crate::error::Result;
use crate::external::{Encoder, ExtractRange};
use crate::util::command;

/// Encoder implementation backed by the `ffmpeg` binary on PATH.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    config: CoreConfig,
}

impl FfmpegEncoder {
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl Encoder for FfmpegEncoder {
    fn normalize(&self, input: &Path, output: &Path) -> Result<()> {
        info!(
            "Normalizing {} -> {}",
            input.display(),
            output.display()
        );
        let mut cmd = build_normalize_command(input, output, &self.config);
        command::run_command(&mut cmd)?;
        Ok(())
    }

    fn extract(&self, input: &Path, range: ExtractRange, output: &Path) -> Result<()> {
        info!(
            "Extracting [{:.1}s +{:.1}s] of {} -> {}",
            range.start,
            range.duration,
            input.display(),
            output.display()
        );
        let mut cmd = build_extract_command(input, range, output, &self.config);
        command::run_command(&mut cmd)?;
        Ok(())
    }

    fn concat(&self, manifest: &Path, output: &Path) -> Result<()> {
        info!(
            "Concatenating {} -> {}",
            manifest.display(),
            output.display()
        );
        let mut cmd = build_concat_command(manifest, output);
        command::run_command(&mut cmd)?;
        Ok(())
    }
}

/// Build the ffmpeg command for the one-shot normalization pass.
pub fn build_normalize_command(input: &Path, output: &Path, config: &CoreConfig) -> Command {
    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-hide_banner", "-loglevel", "warning"])
        .arg("-i")
        .arg(input)
        .args(["-vf", &config.normalize_filter()])
        .args(["-vcodec", &config.video_codec])
        .args(["-acodec", &config.audio_codec])
        .args(["-pix_fmt", &config.pixel_format])
        .args(["-preset", &config.encoder_preset])
        .args(["-f", &config.container])
        .arg("-y")
        .arg(output);
    cmd
}

/// Build the ffmpeg command extracting one segment of the working file.
pub fn build_extract_command(
    input: &Path,
    range: ExtractRange,
    output: &Path,
    config: &CoreConfig,
) -> Command {
    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-hide_banner", "-loglevel", "warning"])
        .arg("-i")
        .arg(input)
        .args(["-ss", &format!("{}", range.start)])
        .args(["-t", &format!("{}", range.duration)])
        .args(["-vcodec", &config.video_codec])
        .args(["-acodec", &config.audio_codec])
        .args(["-f", &config.container])
        .arg("-y")
        .arg(output);
    cmd
}

/// Build the ffmpeg command for stream-copy concatenation of a manifest.
pub fn build_concat_command(manifest: &Path, output: &Path) -> Command {
    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-hide_banner", "-loglevel", "warning"])
        .args(["-f", "concat", "-safe", "0"])
        .arg("-i")
        .arg(manifest)
        .args(["-c", "copy"])
        .arg("-y")
        .arg(output);
    cmd
}
