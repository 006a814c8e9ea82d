use super::*;
use crate::{
    foundation::core::Resolution,
    tracks::model::{MediaSource, TrackKind},
};

fn registry(files: &[(TrackKind, &str)]) -> TrackRegistry {
    let mut reg = TrackRegistry::new();
    for (kind, name) in files {
        reg.append(*kind, MediaSource::from_bytes(*name, vec![0u8]));
    }
    reg
}

fn build(reg: &TrackRegistry, opts: &CommandOptions) -> MergeResult<CompositionCommand> {
    let streams = StreamIndexMap::allocate(reg);
    let graph = FilterGraphSpec::synthesize(&streams, Resolution::new(480).unwrap());
    CompositionCommand::build(reg, &streams, &graph, opts)
}

#[test]
fn tokens_follow_backend_contract() {
    let reg = registry(&[
        (TrackKind::Video, "a.mp4"),
        (TrackKind::Image, "b.png"),
        (TrackKind::Audio, "c.mp3"),
    ]);
    let cmd = build(&reg, &CommandOptions::default()).unwrap();

    assert_eq!(
        cmd.args(),
        &[
            "-y",
            "-loglevel",
            "error",
            "-i",
            "a.mp4",
            "-i",
            "b.png",
            "-i",
            "c.mp3",
            "-filter_complex",
            "[0:v]scale=-1:480,setsar=1:1[v0];[1:v]scale=-1:480,setsar=1:1[v1];[v1]nullsink",
            "-map",
            "[v0]",
            "-map",
            "2:a",
            "output.mp4",
        ]
    );
    assert_eq!(cmd.output_extension(), "mp4");
}

#[test]
fn allocation_order_realigns_interleaved_inputs() {
    let reg = registry(&[
        (TrackKind::Audio, "c.mp3"),
        (TrackKind::Image, "b.png"),
        (TrackKind::Video, "a.mp4"),
    ]);

    let aligned = build(&reg, &CommandOptions::default()).unwrap();
    assert_eq!(aligned.inputs(), &["a.mp4", "b.png", "c.mp3"]);

    let legacy = build(
        &reg,
        &CommandOptions {
            input_order: InputOrder::Ingestion,
            ..CommandOptions::default()
        },
    )
    .unwrap();
    assert_eq!(legacy.inputs(), &["c.mp3", "b.png", "a.mp4"]);
    // The graph is identical either way; only the input positions differ.
    assert_eq!(
        aligned.args()[aligned.args().len() - 6],
        legacy.args()[legacy.args().len() - 6]
    );
}

#[test]
fn missing_visual_track_is_a_precondition_error() {
    let reg = registry(&[(TrackKind::Audio, "x.mp3")]);
    let err = build(&reg, &CommandOptions::default()).unwrap_err();
    assert!(matches!(err, MergeError::Precondition(_)));
}

#[test]
fn audio_map_is_omitted_without_audio_tracks() {
    let reg = registry(&[(TrackKind::Video, "a.mp4")]);
    let cmd = build(&reg, &CommandOptions::default()).unwrap();
    let maps = cmd.args().iter().filter(|a| *a == "-map").count();
    assert_eq!(maps, 1);
}

#[test]
fn whitespace_in_names_stays_inside_one_token() {
    let reg = registry(&[(TrackKind::Video, "my holiday.mp4")]);
    let cmd = build(
        &reg,
        &CommandOptions {
            output_name: "merged video.webm".to_string(),
            overwrite: false,
            ..CommandOptions::default()
        },
    )
    .unwrap();

    assert_eq!(cmd.args()[0], "-n");
    assert!(cmd.args().iter().any(|a| a == "my holiday.mp4"));
    assert_eq!(cmd.output_extension(), "webm");
    let line = cmd.to_command_line("ffmpeg");
    assert!(line.starts_with("ffmpeg -n -loglevel error -i 'my holiday.mp4'"));
    assert!(line.ends_with("'merged video.webm'"));
}

#[test]
fn empty_output_name_is_rejected() {
    let reg = registry(&[(TrackKind::Video, "a.mp4")]);
    let err = build(
        &reg,
        &CommandOptions {
            output_name: " ".to_string(),
            ..CommandOptions::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, MergeError::Validation(_)));
}

#[test]
fn output_name_may_not_shadow_an_input() {
    let reg = registry(&[(TrackKind::Video, "output.mp4"), (TrackKind::Audio, "c.mp3")]);
    let err = build(&reg, &CommandOptions::default()).unwrap_err();
    assert!(matches!(err, MergeError::Validation(_)));
    assert!(err.to_string().contains("collides"));

    let renamed = CommandOptions {
        output_name: "final.mp4".to_string(),
        ..CommandOptions::default()
    };
    let cmd = build(&reg, &renamed).unwrap();
    assert_eq!(cmd.args().last().map(String::as_str), Some("final.mp4"));
}

#[test]
fn output_name_must_be_a_bare_file_name() {
    let reg = registry(&[(TrackKind::Video, "a.mp4")]);
    for bad in ["../out.mp4", "/tmp/out.mp4", "dir/out.mp4", ".."] {
        let opts = CommandOptions {
            output_name: bad.to_string(),
            ..CommandOptions::default()
        };
        let err = build(&reg, &opts).unwrap_err();
        assert!(matches!(err, MergeError::Validation(_)), "{bad}");
    }
}
