// Scenario tests for merge-mode export against the mock encoder.

use std::path::Path;
use std::sync::Arc;

use tempfile::tempdir;
use vidsplit_core::config::CoreConfig;
use vidsplit_core::error::VidsplitError;
use vidsplit_core::events::{Event, EventDispatcher};
use vidsplit_core::export::{ExportError, ExportOrchestrator, ExportRequest};
use vidsplit_core::external::mocks::{MockEncoder, RecordingEventHandler};
use vidsplit_core::timeline::TimelineState;

fn write_dummy(path: &Path) {
    std::fs::write(path, b"dummy content").expect("failed to create dummy file");
}

fn request_for(
    dir: &Path,
    total: f64,
    splits: &[f64],
    deactivate_at: &[f64],
) -> ExportRequest {
    let working_file = dir.join("work.mp4");
    let original_file = dir.join("holiday.mp4");
    write_dummy(&working_file);
    write_dummy(&original_file);

    let mut timeline = TimelineState::new(total);
    for &t in splits {
        timeline.add_split(t).unwrap();
    }
    for &at in deactivate_at {
        timeline.toggle_deactivation(at);
    }

    ExportRequest {
        working_file,
        original_file,
        plan: timeline.segments(),
        merge: true,
    }
}

fn manifest_leftovers(output_dir: &Path) -> Vec<std::path::PathBuf> {
    if !output_dir.exists() {
        return Vec::new();
    }
    std::fs::read_dir(output_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect()
}

#[test]
fn test_merge_with_deactivated_middle_segment() {
    let dir = tempdir().unwrap();
    let request = request_for(dir.path(), 30.0, &[10.0, 20.0], &[15.0]);

    let encoder = Arc::new(MockEncoder::new());
    let recorder = Arc::new(RecordingEventHandler::new());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.add_handler(recorder.clone());

    let orchestrator =
        ExportOrchestrator::new(encoder.clone(), CoreConfig::default(), Arc::new(dispatcher));
    let report = orchestrator.run(&request).unwrap();

    let output_dir = dir.path().join("holiday");
    let merged = output_dir.join("holiday_merged.mp4");
    assert_eq!(report.segments_processed, 2);
    assert_eq!(report.merged_output.as_deref(), Some(merged.as_path()));
    assert!(merged.exists());

    // Intermediates are renumbered over active segments only and deleted
    // after a successful merge.
    assert!(!output_dir.join("1.mp4").exists());
    assert!(!output_dir.join("2.mp4").exists());
    assert!(report.outputs.is_empty());

    // The manifest listed the two intermediates in timeline order and was
    // removed afterwards.
    let manifests = encoder.manifests();
    assert_eq!(manifests.len(), 1);
    let lines: Vec<&str> = manifests[0].lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("1.mp4"));
    assert!(lines[1].contains("2.mp4"));
    assert!(manifest_leftovers(&output_dir).is_empty());

    assert!(matches!(
        recorder.events().last(),
        Some(Event::ExportComplete {
            segments_processed: 2
        })
    ));
}

#[test]
fn test_merge_failure_keeps_intermediates() {
    let dir = tempdir().unwrap();
    let request = request_for(dir.path(), 30.0, &[10.0, 20.0], &[]);

    let encoder = Arc::new(MockEncoder::new().with_concat_failure());
    let recorder = Arc::new(RecordingEventHandler::new());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.add_handler(recorder.clone());

    let orchestrator =
        ExportOrchestrator::new(encoder.clone(), CoreConfig::default(), Arc::new(dispatcher));
    let err = orchestrator.run(&request).unwrap_err();
    assert!(matches!(
        err,
        VidsplitError::Export(ExportError::Merge(_))
    ));

    // Per-segment files survive for inspection; the merged output does not
    // exist; the manifest is still cleaned up.
    let output_dir = dir.path().join("holiday");
    for n in 1..=3 {
        assert!(output_dir.join(format!("{n}.mp4")).exists());
    }
    assert!(!output_dir.join("holiday_merged.mp4").exists());
    assert!(manifest_leftovers(&output_dir).is_empty());

    // All three segments completed before the merge died; the error event
    // is last.
    let events = recorder.events();
    let progress: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            Event::ExportProgress { completed } => Some(*completed),
            _ => None,
        })
        .collect();
    assert_eq!(progress, vec![1, 2, 3]);
    assert!(matches!(events.last(), Some(Event::ExportError { .. })));
}
