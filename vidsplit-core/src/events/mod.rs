//! Event surface exposed to the UI layer.
//!
//! Worker tasks (preprocessing, export) report progress and outcomes through
//! these events. Handlers must be `Send + Sync`: events are delivered from
//! the worker thread, not the coordinating thread. For a given export the
//! progress events arrive in strictly increasing order and the completion or
//! error event is always the last one.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

pub mod json_handler;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Normalization finished; the session owns the new working file.
    PreprocessComplete {
        working_path: PathBuf,
    },

    /// Normalization failed; no session change happened.
    PreprocessError {
        message: String,
    },

    /// An export task started with this many active segments to encode.
    ExportStarted {
        total_segments: usize,
    },

    /// One more segment finished encoding (1..=total, strictly increasing).
    ExportProgress {
        completed: usize,
    },

    /// Export finished. Zero segments means the whole timeline was
    /// deactivated; that is a valid no-work completion, not an error.
    ExportComplete {
        segments_processed: usize,
    },

    /// Export aborted; message carries the encoder diagnostic verbatim.
    ExportError {
        message: String,
    },
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &Event);
}

pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn emit(&self, event: Event) {
        for handler in &self.handlers {
            handler.handle(&event);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Collector {
        seen: Mutex<Vec<String>>,
    }

    impl EventHandler for Collector {
        fn handle(&self, event: &Event) {
            self.seen.lock().unwrap().push(format!("{event:?}"));
        }
    }

    #[test]
    fn test_dispatcher_fans_out_to_all_handlers() {
        let a = Arc::new(Collector {
            seen: Mutex::new(Vec::new()),
        });
        let b = Arc::new(Collector {
            seen: Mutex::new(Vec::new()),
        });

        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_handler(a.clone());
        dispatcher.add_handler(b.clone());

        dispatcher.emit(Event::ExportProgress { completed: 1 });

        assert_eq!(a.seen.lock().unwrap().len(), 1);
        assert_eq!(b.seen.lock().unwrap().len(), 1);
    }
}
