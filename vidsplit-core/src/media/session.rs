//! Media session: pairing of a working file with its original source.
//!
//! The working file is the normalized copy produced by preprocessing. The
//! session owns it exclusively: it is deleted when the session is replaced
//! by a new open and on application exit (via Drop). The original file is a
//! read-only reference, used only to derive the export output directory.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::media::probe::MediaProperties;

#[derive(Debug)]
pub struct MediaSession {
    working_file: PathBuf,
    original_file: PathBuf,
    properties: MediaProperties,
}

impl MediaSession {
    pub fn new(working_file: PathBuf, original_file: PathBuf, properties: MediaProperties) -> Self {
        Self {
            working_file,
            original_file,
            properties,
        }
    }

    pub fn working_file(&self) -> &Path {
        &self.working_file
    }

    pub fn original_file(&self) -> &Path {
        &self.original_file
    }

    pub fn properties(&self) -> &MediaProperties {
        &self.properties
    }

    /// Total duration in seconds, or 0.0 while it is still unknown.
    pub fn total_duration(&self) -> f64 {
        self.properties.effective_duration().unwrap_or(0.0)
    }

    /// Deletes the working file from disk. Idempotent.
    pub fn cleanup(&self) {
        if self.working_file.exists() {
            match std::fs::remove_file(&self.working_file) {
                Ok(()) => debug!("Removed working file {}", self.working_file.display()),
                Err(e) => warn!(
                    "Failed to remove working file {}: {}",
                    self.working_file.display(),
                    e
                ),
            }
        }
    }
}

impl Drop for MediaSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(duration: f64) -> MediaProperties {
        MediaProperties {
            duration_secs: Some(duration),
            fps: 30.0,
            frame_count: None,
        }
    }

    #[test]
    fn test_working_file_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let working = dir.path().join("work.mp4");
        std::fs::write(&working, b"data").unwrap();

        {
            let _session = MediaSession::new(
                working.clone(),
                PathBuf::from("/videos/source.mp4"),
                props(30.0),
            );
            assert!(working.exists());
        }
        assert!(!working.exists());
    }

    #[test]
    fn test_total_duration_unknown_is_zero() {
        let session = MediaSession::new(
            PathBuf::from("/nonexistent/work.mp4"),
            PathBuf::from("/videos/source.mp4"),
            MediaProperties::default(),
        );
        assert_eq!(session.total_duration(), 0.0);
    }
}
