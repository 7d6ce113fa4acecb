//! Core library for timeline-based video splitting using an external encoder.
//!
//! This crate owns the timeline segmentation model (split points,
//! deactivated segments, undo/redo history), the segment planner, and the
//! export pipeline that turns a plan into external encoder invocations with
//! progress reporting and failure isolation. The encoder itself (ffmpeg) is
//! a black-box collaborator behind the [`external::Encoder`] trait.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use vidsplit_core::config::CoreConfig;
//! use vidsplit_core::controller::SessionController;
//! use vidsplit_core::events::EventDispatcher;
//! use vidsplit_core::external::FfmpegEncoder;
//! use vidsplit_core::media::FfprobeProber;
//!
//! let config = CoreConfig::default();
//! let encoder = Arc::new(FfmpegEncoder::new(&config));
//! let prober = Arc::new(FfprobeProber::new());
//! let dispatcher = Arc::new(EventDispatcher::new());
//!
//! let mut controller = SessionController::new(encoder, prober, config, dispatcher);
//! let session = controller.begin_preprocess(Path::new("holiday.mp4")).unwrap().join().unwrap();
//! controller.complete_preprocess(session);
//!
//! controller.timeline_mut().add_split(10.0).unwrap();
//! controller.timeline_mut().add_split(20.0).unwrap();
//! let report = controller.begin_export(false).unwrap().join().unwrap();
//! println!("processed {} segment(s)", report.segments_processed);
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod export;
pub mod external;
pub mod logging;
pub mod media;
pub mod preprocess;
pub mod temp_files;
pub mod timeline;
pub mod util;
pub mod utils;

// Re-exports for public API
pub use config::CoreConfig;
pub use controller::{SessionController, TaskHandle};
pub use error::{Result, VidsplitError};
pub use export::{ExportReport, ExportRequest};
pub use timeline::{SegmentPlan, TimelineState};
pub use utils::{format_duration_secs, format_timestamp, format_timestamp_compact};
