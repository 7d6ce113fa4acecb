//! Interactions with the external encoder.
//!
//! The encoder is a black box: given an input path, a mode, time arguments
//! and an output path it produces a file or fails. The [`Encoder`] trait is
//! the seam that keeps the rest of the core independent of ffmpeg, following
//! the dependency-injection pattern so tests can substitute the mocks in
//! [`mocks`].

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Result, VidsplitError};

pub mod ffmpeg;
pub mod mocks;

pub use ffmpeg::FfmpegEncoder;

/// Time range handed to the encoder for segment extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractRange {
    /// Start offset into the input, in seconds
    pub start: f64,
    /// Length of the extracted piece, in seconds
    pub duration: f64,
}

/// Contract with the external transcoding engine.
///
/// All three operations overwrite their output unconditionally. Failures
/// carry the engine's diagnostic text verbatim; the core never parses
/// encoder output beyond pass/fail.
pub trait Encoder: Send + Sync {
    /// Re-encode `input` into the canonical working format.
    fn normalize(&self, input: &Path, output: &Path) -> Result<()>;

    /// Extract one time range of `input` into a standalone clip.
    fn extract(&self, input: &Path, range: ExtractRange, output: &Path) -> Result<()>;

    /// Stream-copy concatenate the files listed in `manifest` into `output`.
    fn concat(&self, manifest: &Path, output: &Path) -> Result<()>;
}

/// Checks that a required external command is available and executable.
///
/// Runs the command with `-version` and discards its output; only the
/// ability to start it matters.
pub fn check_dependency(cmd_name: &str) -> Result<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{cmd_name}' not found.");
            Err(VidsplitError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{cmd_name}': {e}");
            Err(VidsplitError::CommandExecution(format!(
                "Failed to start '{cmd_name}': {e}"
            )))
        }
    }
}
