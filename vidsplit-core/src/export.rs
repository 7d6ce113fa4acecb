//! Export pipeline: segment plan -> encoder invocations -> output files.
//!
//! Turns the current timeline plan into one encoder invocation per active
//! segment, plus an optional stream-copy concatenation when merge mode is
//! requested. Progress and outcome are reported through the event
//! dispatcher; the completion or error event is always the last one emitted
//! for a given export.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{info, warn};
use thiserror::Error;

use crate::config::CoreConfig;
use crate::error::{Result, VidsplitError};
use crate::events::{Event, EventDispatcher};
use crate::external::{Encoder, ExtractRange};
use crate::temp_files;
use crate::timeline::SegmentPlan;

/// Export pipeline errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Encoding segment {index} failed: {message}")]
    SegmentEncode { index: usize, message: String },

    #[error("Merging segments failed: {0}")]
    Merge(String),

    #[error("Invalid output location: {0}")]
    InvalidOutput(String),
}

/// Everything an export task needs, captured at spawn time so later timeline
/// edits cannot race with the in-flight export.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Normalized working file segments are cut from
    pub working_file: PathBuf,
    /// Original source file; used only to derive the output directory
    pub original_file: PathBuf,
    /// Full partition of the timeline, active segments included in order
    pub plan: Vec<SegmentPlan>,
    /// Concatenate active segments into a single output file
    pub merge: bool,
}

/// Outcome of a finished export.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Number of segments encoded; 0 means the whole timeline was inactive
    pub segments_processed: usize,
    /// Per-segment output files still on disk (empty after a merge)
    pub outputs: Vec<PathBuf>,
    /// The merged output file, in merge mode
    pub merged_output: Option<PathBuf>,
}

/// Drives the external encoder over one segment plan.
pub struct ExportOrchestrator<E: Encoder> {
    encoder: Arc<E>,
    config: CoreConfig,
    dispatcher: Arc<EventDispatcher>,
}

impl<E: Encoder> ExportOrchestrator<E> {
    pub fn new(encoder: Arc<E>, config: CoreConfig, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            encoder,
            config,
            dispatcher,
        }
    }

    /// Run the export to completion. Blocking; intended to be called from a
    /// dedicated worker thread.
    ///
    /// Failure of one segment aborts the remaining ones and leaves already
    /// written outputs on disk. A failed concatenation keeps the per-segment
    /// intermediates for inspection; the manifest is removed on every
    /// non-panicking path.
    pub fn run(&self, request: &ExportRequest) -> Result<ExportReport> {
        let output_dir = output_dir_for(&request.original_file)?;

        let active: Vec<&SegmentPlan> = request.plan.iter().filter(|s| s.active).collect();
        if active.is_empty() {
            info!("No active segments; nothing to export");
            self.dispatcher.emit(Event::ExportComplete {
                segments_processed: 0,
            });
            return Ok(ExportReport {
                segments_processed: 0,
                outputs: Vec::new(),
                merged_output: None,
            });
        }

        std::fs::create_dir_all(&output_dir)?;
        crate::logging::log_section("SEGMENT EXPORT");
        info!(
            "Exporting {} segment(s) to {}",
            active.len(),
            output_dir.display()
        );
        self.dispatcher.emit(Event::ExportStarted {
            total_segments: active.len(),
        });

        let mut outputs = Vec::with_capacity(active.len());
        for (pos, segment) in active.iter().enumerate() {
            let index = pos + 1;
            let end = segment.end - self.config.boundary_trim_secs;
            let duration = end - segment.start;
            let output = output_dir.join(format!("{index}.{}", self.config.container));

            info!(
                "Cutting segment {index}: {:.1}s - {end:.1}s, duration {duration:.1}s",
                segment.start
            );
            let range = ExtractRange {
                start: segment.start,
                duration,
            };
            if let Err(e) = self.encoder.extract(&request.working_file, range, &output) {
                let error = ExportError::SegmentEncode {
                    index,
                    message: e.to_string(),
                };
                self.dispatcher.emit(Event::ExportError {
                    message: error.to_string(),
                });
                return Err(error.into());
            }

            outputs.push(output);
            self.dispatcher.emit(Event::ExportProgress { completed: index });
        }

        let merged_output = if request.merge {
            crate::logging::log_subsection("CONCATENATION");
            match self.concat_segments(&output_dir, &outputs, &request.original_file) {
                Ok(merged) => {
                    // Intermediates are only removed once the merge succeeded.
                    for output in outputs.drain(..) {
                        if let Err(e) = std::fs::remove_file(&output) {
                            warn!(
                                "Failed to remove intermediate segment {}: {}",
                                output.display(),
                                e
                            );
                        }
                    }
                    Some(merged)
                }
                Err(e) => {
                    let error = ExportError::Merge(e.to_string());
                    self.dispatcher.emit(Event::ExportError {
                        message: error.to_string(),
                    });
                    return Err(error.into());
                }
            }
        } else {
            None
        };

        let segments_processed = active.len();
        info!("Export complete: {segments_processed} segment(s) processed");
        self.dispatcher.emit(Event::ExportComplete { segments_processed });

        Ok(ExportReport {
            segments_processed,
            outputs,
            merged_output,
        })
    }

    /// Write the concat manifest and run the stream-copy concatenation.
    ///
    /// The manifest is a NamedTempFile: dropping it at the end of this
    /// function removes it on success and failure alike.
    fn concat_segments(
        &self,
        output_dir: &Path,
        segments: &[PathBuf],
        original_file: &Path,
    ) -> Result<PathBuf> {
        let base = original_base_name(original_file)?;
        let merged = output_dir.join(format!("{base}_merged.{}", self.config.container));

        let mut manifest = temp_files::create_manifest_file(output_dir)?;
        for segment in segments {
            writeln!(manifest, "file '{}'", segment.display())?;
        }
        manifest.flush()?;

        info!(
            "Merging {} segment(s) into {}",
            segments.len(),
            merged.display()
        );
        self.encoder.concat(manifest.path(), &merged)?;

        Ok(merged)
    }
}

/// Output directory for an export: `<originalDir>/<originalBaseName>/`.
pub fn output_dir_for(original_file: &Path) -> Result<PathBuf> {
    let base = original_base_name(original_file)?;
    let parent = original_file.parent().unwrap_or_else(|| Path::new(""));
    Ok(parent.join(base))
}

fn original_base_name(original_file: &Path) -> Result<String> {
    original_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| {
            VidsplitError::Export(ExportError::InvalidOutput(format!(
                "Cannot derive a base name from {}",
                original_file.display()
            )))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dir_is_named_after_original() {
        let dir = output_dir_for(Path::new("/videos/holiday.mp4")).unwrap();
        assert_eq!(dir, PathBuf::from("/videos/holiday"));
    }

    #[test]
    fn test_output_dir_for_bare_filename() {
        let dir = output_dir_for(Path::new("holiday.mp4")).unwrap();
        assert_eq!(dir, PathBuf::from("holiday"));
    }

    #[test]
    fn test_base_name_without_stem_is_rejected() {
        assert!(output_dir_for(Path::new("/videos/..")).is_err());
    }
}
