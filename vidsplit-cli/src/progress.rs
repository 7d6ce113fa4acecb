//! Terminal progress reporting wired to the core event surface.

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use vidsplit_core::events::{Event, EventHandler};

static BAR_STYLE: Lazy<ProgressStyle> = Lazy::new(|| {
    ProgressStyle::default_bar()
        .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap()
        .progress_chars("█▓▒░ ")
});

/// Event handler rendering export progress as an indicatif bar.
///
/// Events arrive from the export worker thread; the bar lives behind a
/// mutex so the handler stays `Sync`.
pub struct ProgressBarHandler {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressBarHandler {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }
}

impl Default for ProgressBarHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for ProgressBarHandler {
    fn handle(&self, event: &Event) {
        let mut bar = self.bar.lock().unwrap();
        match event {
            Event::ExportStarted { total_segments } => {
                let pb = ProgressBar::new(*total_segments as u64);
                pb.set_style(BAR_STYLE.clone());
                pb.set_message("Exporting");
                *bar = Some(pb);
            }
            Event::ExportProgress { completed } => {
                if let Some(pb) = bar.as_ref() {
                    pb.set_position(*completed as u64);
                }
            }
            Event::ExportComplete { .. } => {
                if let Some(pb) = bar.take() {
                    pb.finish_and_clear();
                }
            }
            Event::ExportError { .. } => {
                if let Some(pb) = bar.take() {
                    pb.abandon();
                }
            }
            _ => {}
        }
    }
}
