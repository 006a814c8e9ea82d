use super::*;
use crate::{
    compile::{command::CommandOptions, plan::compile_plan},
    foundation::core::Resolution,
    tracks::model::TrackKind,
};

fn video_registry() -> TrackRegistry {
    let mut reg = TrackRegistry::new();
    reg.append(TrackKind::Video, MediaSource::from_bytes("a.mp4", vec![0u8]));
    reg
}

#[test]
fn recorded_calls_survive_a_poisoned_lock() {
    let reg = video_registry();
    let plan = compile_plan(&reg, Resolution::default(), &CommandOptions::default()).unwrap();
    let backend = RecordingBackend::succeeding(vec![1u8]);
    backend.run(&TranscodeJob::new(&plan.command, &reg)).unwrap();

    let poisoned = std::thread::scope(|s| {
        s.spawn(|| {
            let _guard = backend.calls.lock().unwrap();
            panic!("poison the call log");
        })
        .join()
    });
    assert!(poisoned.is_err());
    assert!(backend.calls.is_poisoned());

    assert_eq!(backend.calls().len(), 1);
    backend.run(&TranscodeJob::new(&plan.command, &reg)).unwrap();
    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1], plan.command.args());
}

#[test]
fn failing_backend_still_records_the_run() {
    let reg = video_registry();
    let plan = compile_plan(&reg, Resolution::default(), &CommandOptions::default()).unwrap();
    let backend = RecordingBackend::failing("Invalid filtergraph");

    let err = backend
        .run(&TranscodeJob::new(&plan.command, &reg))
        .unwrap_err();
    assert!(matches!(err, MergeError::Backend(ref m) if m == "Invalid filtergraph"));
    assert_eq!(backend.calls().len(), 1);
}
