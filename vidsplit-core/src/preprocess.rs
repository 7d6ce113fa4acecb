//! Preprocessing: one-shot normalization of a freshly opened source file.
//!
//! Every opened file is re-encoded once into the canonical working format
//! (vertical 9:16 frame, fixed codec recipe) before any timeline work
//! happens. On success the resulting working file and its probed properties
//! become the new media session; on failure nothing changes and the partial
//! output is removed.

use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
use thiserror::Error;

use crate::config::CoreConfig;
use crate::error::Result;
use crate::events::{Event, EventDispatcher};
use crate::external::Encoder;
use crate::media::{MediaProber, MediaSession};
use crate::temp_files;

/// Preprocessing errors
#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("Normalization failed: {0}")]
    NormalizeFailed(String),

    #[error("Probing the working file failed: {0}")]
    ProbeFailed(String),
}

/// Runs the normalization pass for one input file.
pub struct Preprocessor<E: Encoder, P: MediaProber> {
    encoder: Arc<E>,
    prober: Arc<P>,
    config: CoreConfig,
    dispatcher: Arc<EventDispatcher>,
}

impl<E: Encoder, P: MediaProber> Preprocessor<E, P> {
    pub fn new(
        encoder: Arc<E>,
        prober: Arc<P>,
        config: CoreConfig,
        dispatcher: Arc<EventDispatcher>,
    ) -> Self {
        Self {
            encoder,
            prober,
            config,
            dispatcher,
        }
    }

    /// Normalize `input` into a fresh working file and probe it. Blocking;
    /// intended to be called from a dedicated worker thread.
    pub fn run(&self, input: &Path) -> Result<MediaSession> {
        let working = temp_files::create_working_file_path(&self.config);
        crate::logging::log_section("NORMALIZATION");
        info!(
            "Preprocessing {} into working file {}",
            input.display(),
            working.display()
        );

        if let Err(e) = self.encoder.normalize(input, &working) {
            remove_partial(&working);
            let error = PreprocessError::NormalizeFailed(e.to_string());
            self.dispatcher.emit(Event::PreprocessError {
                message: error.to_string(),
            });
            return Err(error.into());
        }

        let properties = match self.prober.probe(&working) {
            Ok(properties) => properties,
            Err(e) => {
                remove_partial(&working);
                let error = PreprocessError::ProbeFailed(e.to_string());
                self.dispatcher.emit(Event::PreprocessError {
                    message: error.to_string(),
                });
                return Err(error.into());
            }
        };

        info!(
            "Working file ready: duration {:?}s, {:.2} fps",
            properties.effective_duration(),
            properties.fps
        );
        self.dispatcher.emit(Event::PreprocessComplete {
            working_path: working.clone(),
        });

        Ok(MediaSession::new(
            working,
            input.to_path_buf(),
            properties,
        ))
    }
}

fn remove_partial(working: &Path) {
    if working.exists() {
        if let Err(e) = std::fs::remove_file(working) {
            warn!(
                "Failed to remove partial working file {}: {}",
                working.display(),
                e
            );
        }
    }
}
