//! Mock implementations of the external collaborators for tests.
//!
//! The mock encoder records every invocation and writes small placeholder
//! files so the pipeline's filesystem expectations hold without ffmpeg
//! installed. Failure injection mirrors the two interesting production
//! failures: a segment encode dying mid-export and a concatenation dying
//! after all segments succeeded.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{Result, VidsplitError};
use crate::events::{Event, EventHandler};
use crate::external::{Encoder, ExtractRange};
use crate::media::probe::{MediaProber, MediaProperties};

/// One recorded encoder invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum EncoderCall {
    Normalize {
        input: PathBuf,
        output: PathBuf,
    },
    Extract {
        input: PathBuf,
        start: f64,
        duration: f64,
        output: PathBuf,
    },
    Concat {
        manifest: PathBuf,
        output: PathBuf,
    },
}

#[derive(Default)]
pub struct MockEncoder {
    calls: Mutex<Vec<EncoderCall>>,
    manifests: Mutex<Vec<String>>,
    extract_count: Mutex<usize>,
    fail_extract_at: Option<usize>,
    fail_normalize: bool,
    fail_concat: bool,
    delay: Option<Duration>,
}

impl MockEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the nth extract invocation (1-based).
    pub fn with_extract_failure_at(mut self, n: usize) -> Self {
        self.fail_extract_at = Some(n);
        self
    }

    pub fn with_normalize_failure(mut self) -> Self {
        self.fail_normalize = true;
        self
    }

    pub fn with_concat_failure(mut self) -> Self {
        self.fail_concat = true;
        self
    }

    /// Sleep in every invocation, for exercising the busy flag.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<EncoderCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn extract_calls(&self) -> Vec<EncoderCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, EncoderCall::Extract { .. }))
            .collect()
    }

    /// Manifest contents captured at concat time (the file itself is gone
    /// by the time a test can look at it).
    pub fn manifests(&self) -> Vec<String> {
        self.manifests.lock().unwrap().clone()
    }

    fn pause(&self) {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
    }
}

impl Encoder for MockEncoder {
    fn normalize(&self, input: &Path, output: &Path) -> Result<()> {
        self.pause();
        self.calls.lock().unwrap().push(EncoderCall::Normalize {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        });
        if self.fail_normalize {
            return Err(VidsplitError::CommandExecution(
                "simulated normalize failure".to_string(),
            ));
        }
        std::fs::write(output, b"mock working file")?;
        Ok(())
    }

    fn extract(&self, input: &Path, range: ExtractRange, output: &Path) -> Result<()> {
        self.pause();
        let ordinal = {
            let mut count = self.extract_count.lock().unwrap();
            *count += 1;
            *count
        };
        self.calls.lock().unwrap().push(EncoderCall::Extract {
            input: input.to_path_buf(),
            start: range.start,
            duration: range.duration,
            output: output.to_path_buf(),
        });
        if self.fail_extract_at == Some(ordinal) {
            return Err(VidsplitError::CommandExecution(format!(
                "simulated encoder failure at invocation {ordinal}"
            )));
        }
        std::fs::write(output, b"mock segment")?;
        Ok(())
    }

    fn concat(&self, manifest: &Path, output: &Path) -> Result<()> {
        self.pause();
        self.calls.lock().unwrap().push(EncoderCall::Concat {
            manifest: manifest.to_path_buf(),
            output: output.to_path_buf(),
        });
        let contents = std::fs::read_to_string(manifest)?;
        self.manifests.lock().unwrap().push(contents);
        if self.fail_concat {
            return Err(VidsplitError::CommandExecution(
                "simulated concat failure".to_string(),
            ));
        }
        std::fs::write(output, b"mock merged file")?;
        Ok(())
    }
}

/// Prober returning fixed properties.
pub struct MockProber {
    properties: MediaProperties,
}

impl MockProber {
    pub fn new(properties: MediaProperties) -> Self {
        Self { properties }
    }

    /// A prober reporting the given duration at 30 fps.
    pub fn with_duration(duration_secs: f64) -> Self {
        Self::new(MediaProperties {
            duration_secs: Some(duration_secs),
            fps: 30.0,
            frame_count: None,
        })
    }
}

impl MediaProber for MockProber {
    fn probe(&self, _path: &Path) -> Result<MediaProperties> {
        Ok(self.properties.clone())
    }
}

/// Event handler that records everything it sees, in order.
#[derive(Default)]
pub struct RecordingEventHandler {
    events: Mutex<Vec<Event>>,
}

impl RecordingEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl EventHandler for RecordingEventHandler {
    fn handle(&self, event: &Event) {
        self.events.lock().unwrap().push(event.clone());
    }
}
