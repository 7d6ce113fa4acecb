// Session controller: preprocess/export flow, busy flag, session lifecycle.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tempfile::tempdir;
use vidsplit_core::config::CoreConfigBuilder;
use vidsplit_core::controller::SessionController;
use vidsplit_core::error::VidsplitError;
use vidsplit_core::events::{Event, EventDispatcher};
use vidsplit_core::external::mocks::{MockEncoder, MockProber, RecordingEventHandler};
use vidsplit_core::preprocess::PreprocessError;

fn write_dummy(path: &Path) {
    std::fs::write(path, b"dummy content").expect("failed to create dummy file");
}

fn controller_with(
    temp_dir: &Path,
    encoder: MockEncoder,
    recorder: Arc<RecordingEventHandler>,
) -> SessionController<MockEncoder, MockProber> {
    let config = CoreConfigBuilder::new()
        .temp_dir(temp_dir.to_path_buf())
        .build();
    let mut dispatcher = EventDispatcher::new();
    dispatcher.add_handler(recorder);
    SessionController::new(
        Arc::new(encoder),
        Arc::new(MockProber::with_duration(30.0)),
        config,
        Arc::new(dispatcher),
    )
}

#[test]
fn test_open_split_export_flow() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("holiday.mp4");
    write_dummy(&original);

    let recorder = Arc::new(RecordingEventHandler::new());
    let mut controller = controller_with(dir.path(), MockEncoder::new(), recorder.clone());

    let session = controller.begin_preprocess(&original).unwrap().join().unwrap();
    assert!(session.working_file().exists());
    controller.complete_preprocess(session);
    assert!(!controller.is_busy());
    assert_eq!(controller.timeline().total_duration(), 30.0);

    controller.timeline_mut().add_split(10.0).unwrap();
    controller.timeline_mut().add_split(20.0).unwrap();

    let report = controller.begin_export(false).unwrap().join().unwrap();
    assert_eq!(report.segments_processed, 3);
    assert!(!controller.is_busy());

    let events = recorder.events();
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::PreprocessComplete { .. })));
    assert!(matches!(
        events.last(),
        Some(Event::ExportComplete {
            segments_processed: 3
        })
    ));
}

#[test]
fn test_second_task_is_rejected_while_busy() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("holiday.mp4");
    write_dummy(&original);

    let recorder = Arc::new(RecordingEventHandler::new());
    let encoder = MockEncoder::new().with_delay(Duration::from_millis(150));
    let mut controller = controller_with(dir.path(), encoder, recorder);

    let session = controller.begin_preprocess(&original).unwrap().join().unwrap();
    controller.complete_preprocess(session);
    controller.timeline_mut().add_split(10.0).unwrap();

    let first = controller.begin_export(false).unwrap();
    let second = controller.begin_export(false);
    assert!(matches!(second, Err(VidsplitError::TaskInProgress(_))));

    first.join().unwrap();
    assert!(!controller.is_busy());
    let third = controller.begin_export(false).unwrap();
    third.join().unwrap();
}

#[test]
fn test_new_open_replaces_working_file_and_resets_timeline() {
    let dir = tempdir().unwrap();
    let first_source = dir.path().join("first.mp4");
    let second_source = dir.path().join("second.mp4");
    write_dummy(&first_source);
    write_dummy(&second_source);

    let recorder = Arc::new(RecordingEventHandler::new());
    let mut controller = controller_with(dir.path(), MockEncoder::new(), recorder);

    let session = controller.begin_preprocess(&first_source).unwrap().join().unwrap();
    let first_working = session.working_file().to_path_buf();
    controller.complete_preprocess(session);
    controller.timeline_mut().add_split(10.0).unwrap();

    let session = controller.begin_preprocess(&second_source).unwrap().join().unwrap();
    // The replaced session released its working file before the new run.
    assert!(!first_working.exists());
    controller.complete_preprocess(session);

    // Timeline state does not survive a session change.
    assert!(controller.timeline().splits().is_empty());
    assert!(controller.timeline().deactivated().is_empty());
}

#[test]
fn test_export_without_session_is_rejected() {
    let dir = tempdir().unwrap();
    let recorder = Arc::new(RecordingEventHandler::new());
    let controller = controller_with(dir.path(), MockEncoder::new(), recorder);

    assert!(matches!(
        controller.begin_export(false),
        Err(VidsplitError::NoSession)
    ));
}

#[test]
fn test_preprocess_failure_leaves_no_session() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("holiday.mp4");
    write_dummy(&original);

    let recorder = Arc::new(RecordingEventHandler::new());
    let encoder = MockEncoder::new().with_normalize_failure();
    let mut controller = controller_with(dir.path(), encoder, recorder.clone());

    let err = controller.begin_preprocess(&original).unwrap().join().unwrap_err();
    assert!(matches!(
        err,
        VidsplitError::Preprocess(PreprocessError::NormalizeFailed(_))
    ));
    assert!(controller.session().is_none());
    assert!(!controller.is_busy());

    let events = recorder.events();
    assert!(matches!(
        events.last(),
        Some(Event::PreprocessError { .. })
    ));
}

#[test]
fn test_deferred_duration_rebounds_timeline() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("holiday.mp4");
    write_dummy(&original);

    let config = CoreConfigBuilder::new()
        .temp_dir(dir.path().to_path_buf())
        .build();
    // Prober that cannot determine a duration up front.
    let prober = MockProber::new(vidsplit_core::media::MediaProperties {
        duration_secs: None,
        fps: 0.0,
        frame_count: None,
    });
    let mut controller = SessionController::new(
        Arc::new(MockEncoder::new()),
        Arc::new(prober),
        config,
        Arc::new(EventDispatcher::new()),
    );

    let session = controller.begin_preprocess(&original).unwrap().join().unwrap();
    controller.complete_preprocess(session);
    assert_eq!(controller.timeline().total_duration(), 0.0);
    assert!(controller.timeline_mut().add_split(10.0).is_err());

    // The duration arrives late; the boundary sequence is recomputed.
    controller.set_total_duration(30.0);
    controller.timeline_mut().add_split(10.0).unwrap();
    assert_eq!(
        controller.timeline().boundaries(),
        vec![0.0, 10.0, 30.0]
    );
}
