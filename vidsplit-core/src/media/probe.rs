//! FFprobe integration for media analysis.
//!
//! Supplies the duration, frame rate and frame count of a working file. The
//! [`MediaProber`] trait is the seam that lets tests run without ffprobe
//! installed.

use std::path::Path;

use ffprobe::FfProbeError;

use crate::error::{Result, VidsplitError};

/// Cached media properties for a working file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaProperties {
    /// Container-reported duration in seconds, if known
    pub duration_secs: Option<f64>,
    /// Frames per second of the primary video stream
    pub fps: f64,
    /// Total frame count, if the container reports one
    pub frame_count: Option<u64>,
}

impl MediaProperties {
    /// Best-effort total duration: the container value when present,
    /// otherwise `frame_count / fps`.
    ///
    /// `None` means the duration is not yet known; the timeline is
    /// re-bounded via `set_total_duration` once a late value arrives.
    pub fn effective_duration(&self) -> Option<f64> {
        if let Some(duration) = self.duration_secs {
            if duration > 0.0 {
                return Some(duration);
            }
        }
        match self.frame_count {
            Some(frames) if frames > 0 && self.fps > 0.0 => Some(frames as f64 / self.fps),
            _ => None,
        }
    }
}

/// Duration-source collaborator contract.
pub trait MediaProber: Send + Sync {
    fn probe(&self, path: &Path) -> Result<MediaProperties>;
}

/// Real prober backed by the ffprobe crate.
#[derive(Debug, Clone, Default)]
pub struct FfprobeProber;

impl FfprobeProber {
    pub fn new() -> Self {
        Self
    }
}

impl MediaProber for FfprobeProber {
    fn probe(&self, path: &Path) -> Result<MediaProperties> {
        log::debug!("Running ffprobe on: {}", path.display());

        let metadata = ffprobe::ffprobe(path).map_err(|err| map_ffprobe_error(err, path))?;

        let duration_secs = metadata
            .format
            .duration
            .as_deref()
            .and_then(|d| d.parse::<f64>().ok());

        let video_stream = metadata
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
            .ok_or_else(|| {
                VidsplitError::MediaFile(format!("No video stream found in {}", path.display()))
            })?;

        let fps = parse_frame_rate(&video_stream.avg_frame_rate)
            .or_else(|| parse_frame_rate(&video_stream.r_frame_rate))
            .unwrap_or(0.0);

        let frame_count = video_stream
            .nb_frames
            .as_deref()
            .and_then(|f| f.parse::<u64>().ok());

        let properties = MediaProperties {
            duration_secs,
            fps,
            frame_count,
        };

        if properties.effective_duration().is_none() {
            log::warn!(
                "Could not determine duration for {} from probe; it must be supplied later",
                path.display()
            );
        }

        Ok(properties)
    }
}

/// Parse an ffprobe frame rate string ("30000/1001", "25/1", "29.97").
fn parse_frame_rate(frame_rate_str: &str) -> Option<f64> {
    if let Some((num, den)) = frame_rate_str.split_once('/') {
        let numerator: f64 = num.parse().ok()?;
        let denominator: f64 = den.parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        return Some(numerator / denominator);
    }
    frame_rate_str.parse().ok()
}

fn map_ffprobe_error(err: FfProbeError, path: &Path) -> VidsplitError {
    match err {
        FfProbeError::Io(io_err) => VidsplitError::CommandExecution(format!(
            "Failed to execute ffprobe on {}: {}",
            path.display(),
            io_err
        )),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            VidsplitError::CommandExecution(format!(
                "ffprobe failed on {} with exit code {}: {}",
                path.display(),
                output.status.code().unwrap_or(-1),
                stderr
            ))
        }
        FfProbeError::Deserialize(err) => VidsplitError::MediaFile(format!(
            "ffprobe output deserialization for {}: {}",
            path.display(),
            err
        )),
        _ => VidsplitError::MediaFile(format!(
            "Unknown ffprobe error on {}: {:?}",
            path.display(),
            err
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate() {
        assert_eq!(parse_frame_rate("30"), Some(30.0));
        assert_eq!(parse_frame_rate("29.97"), Some(29.97));
        assert_eq!(parse_frame_rate("30000/1001"), Some(30000.0 / 1001.0));
        assert_eq!(parse_frame_rate("25/1"), Some(25.0));
        assert_eq!(parse_frame_rate("0/0"), None);
        assert_eq!(parse_frame_rate("invalid"), None);
    }

    #[test]
    fn test_effective_duration_prefers_container_value() {
        let props = MediaProperties {
            duration_secs: Some(30.0),
            fps: 25.0,
            frame_count: Some(900),
        };
        assert_eq!(props.effective_duration(), Some(30.0));
    }

    #[test]
    fn test_effective_duration_falls_back_to_frames() {
        let props = MediaProperties {
            duration_secs: None,
            fps: 30.0,
            frame_count: Some(900),
        };
        assert_eq!(props.effective_duration(), Some(30.0));
    }

    #[test]
    fn test_effective_duration_unknown() {
        let props = MediaProperties {
            duration_secs: None,
            fps: 0.0,
            frame_count: None,
        };
        assert_eq!(props.effective_duration(), None);
    }
}
