//! Configuration structures and constants for the vidsplit-core library.
//!
//! This module provides the configuration for timeline export behavior and
//! for the normalization pass applied to freshly opened source files.

mod builder;

use std::path::PathBuf;

pub use builder::CoreConfigBuilder;

// Default constants

/// Default amount trimmed from the end of every exported segment, in seconds.
///
/// Keeps the first frame of the following segment out of the current one.
/// Applied uniformly regardless of frame rate; see DESIGN.md for the open
/// question on frame-duration scaling.
pub const DEFAULT_BOUNDARY_TRIM_SECS: f64 = 0.1;

/// Default target frame for normalization (vertical 9:16).
pub const DEFAULT_TARGET_WIDTH: u32 = 1080;
pub const DEFAULT_TARGET_HEIGHT: u32 = 1920;

/// Default codecs and container settings used by both the normalization pass
/// and per-segment extraction.
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";
pub const DEFAULT_AUDIO_CODEC: &str = "aac";
pub const DEFAULT_PIXEL_FORMAT: &str = "yuv420p";
pub const DEFAULT_ENCODER_PRESET: &str = "veryfast";
pub const DEFAULT_CONTAINER: &str = "mp4";

/// Main configuration structure for the vidsplit-core library.
///
/// Holds the encoding recipe handed to the external encoder and the export
/// policy values. Typically created by the consumer (e.g. vidsplit-cli) via
/// [`CoreConfigBuilder`] and passed to the session controller.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Seconds trimmed from the end of every exported segment
    pub boundary_trim_secs: f64,

    /// Normalization target width in pixels
    pub target_width: u32,

    /// Normalization target height in pixels
    pub target_height: u32,

    /// Video codec passed to the encoder ("libx264", ...)
    pub video_codec: String,

    /// Audio codec passed to the encoder ("aac", ...)
    pub audio_codec: String,

    /// Pixel format for the normalization pass
    pub pixel_format: String,

    /// Encoder speed preset for the normalization pass
    pub encoder_preset: String,

    /// Container format and output file extension
    pub container: String,

    /// Optional directory for working files (defaults to the system temp dir)
    pub temp_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            boundary_trim_secs: DEFAULT_BOUNDARY_TRIM_SECS,
            target_width: DEFAULT_TARGET_WIDTH,
            target_height: DEFAULT_TARGET_HEIGHT,
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            pixel_format: DEFAULT_PIXEL_FORMAT.to_string(),
            encoder_preset: DEFAULT_ENCODER_PRESET.to_string(),
            container: DEFAULT_CONTAINER.to_string(),
            temp_dir: None,
        }
    }
}

impl CoreConfig {
    /// Directory where working files are created.
    pub fn working_dir(&self) -> PathBuf {
        self.temp_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    /// The ffmpeg scale/crop filter string for the normalization pass.
    ///
    /// Scales to the target height preserving aspect ratio (width rounded to
    /// an even value), then center-crops to the target frame.
    pub fn normalize_filter(&self) -> String {
        format!(
            "scale=-2:{},crop={}:{}",
            self.target_height, self.target_width, self.target_height
        )
    }
}
