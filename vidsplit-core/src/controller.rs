//! Session controller: explicit owner of the media session and timeline.
//!
//! Replaces ambient application-global state with one value the caller holds
//! and threads through the pipeline. The controller also enforces the
//! single-in-flight-task rule: starting a preprocess or export while another
//! worker is running fails with `TaskInProgress` instead of relying on the
//! caller to sequence requests.
//!
//! Workers are single-purpose, run-to-completion threads. The coordinating
//! thread never blocks on them implicitly; callers that want the result
//! (like the CLI) call [`TaskHandle::join`] explicitly, while event-driven
//! consumers just listen on the dispatcher.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use log::debug;

use crate::config::CoreConfig;
use crate::error::{Result, VidsplitError};
use crate::events::EventDispatcher;
use crate::export::{ExportOrchestrator, ExportReport, ExportRequest};
use crate::external::Encoder;
use crate::media::{MediaProber, MediaSession};
use crate::preprocess::Preprocessor;
use crate::timeline::TimelineState;

/// Handle to a running worker task.
pub struct TaskHandle<T> {
    handle: JoinHandle<Result<T>>,
}

impl<T> TaskHandle<T> {
    /// Block until the worker finishes and return its result.
    pub fn join(self) -> Result<T> {
        self.handle
            .join()
            .unwrap_or_else(|_| Err(VidsplitError::CommandExecution(
                "worker thread panicked".to_string(),
            )))
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Clears the busy flag when the worker exits, panics included.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct SessionController<E: Encoder + 'static, P: MediaProber + 'static> {
    encoder: Arc<E>,
    prober: Arc<P>,
    config: CoreConfig,
    dispatcher: Arc<EventDispatcher>,
    busy: Arc<AtomicBool>,
    session: Option<MediaSession>,
    timeline: TimelineState,
}

impl<E: Encoder + 'static, P: MediaProber + 'static> SessionController<E, P> {
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
            busy: Arc::new(AtomicBool::new(false)),
            session: None,
            timeline: TimelineState::default(),
        }
    }

    pub fn timeline(&self) -> &TimelineState {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut TimelineState {
        &mut self.timeline
    }

    pub fn session(&self) -> Option<&MediaSession> {
        self.session.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    fn acquire_busy(&self, task: &str) -> Result<BusyGuard> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(VidsplitError::TaskInProgress(task.to_string()));
        }
        Ok(BusyGuard(self.busy.clone()))
    }

    /// Start normalizing `input` on a worker thread.
    ///
    /// The previous session, if any, is discarded first (deleting its
    /// working file). On success the caller installs the produced session
    /// with [`Self::complete_preprocess`].
    pub fn begin_preprocess(&mut self, input: &Path) -> Result<TaskHandle<MediaSession>> {
        let guard = self.acquire_busy("preprocess")?;

        if let Some(old) = self.session.take() {
            debug!("Replacing session for {}", old.original_file().display());
            drop(old);
        }

        let preprocessor = Preprocessor::new(
            self.encoder.clone(),
            self.prober.clone(),
            self.config.clone(),
            self.dispatcher.clone(),
        );
        let input = input.to_path_buf();
        let handle = thread::spawn(move || {
            let _guard = guard;
            preprocessor.run(&input)
        });

        Ok(TaskHandle { handle })
    }

    /// Install a freshly preprocessed session. Resets the timeline (splits,
    /// deactivations, history) to empty over the new duration.
    pub fn complete_preprocess(&mut self, session: MediaSession) {
        self.timeline.reset(session.total_duration());
        self.session = Some(session);
    }

    /// Supply a duration that was not available at probe time, re-bounding
    /// the timeline.
    pub fn set_total_duration(&mut self, total: f64) {
        self.timeline.set_total_duration(total);
    }

    /// Start exporting the current timeline on a worker thread.
    ///
    /// The plan is captured now; later timeline edits do not affect the
    /// in-flight export.
    pub fn begin_export(&self, merge: bool) -> Result<TaskHandle<ExportReport>> {
        let session = self.session.as_ref().ok_or(VidsplitError::NoSession)?;
        let guard = self.acquire_busy("export")?;

        let request = ExportRequest {
            working_file: session.working_file().to_path_buf(),
            original_file: session.original_file().to_path_buf(),
            plan: self.timeline.segments(),
            merge,
        };
        let orchestrator = ExportOrchestrator::new(
            self.encoder.clone(),
            self.config.clone(),
            self.dispatcher.clone(),
        );
        let handle = thread::spawn(move || {
            let _guard = guard;
            orchestrator.run(&request)
        });

        Ok(TaskHandle { handle })
    }
}
