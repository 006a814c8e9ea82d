use super::*;

fn bytes(name: &str) -> MediaSource {
    MediaSource::from_bytes(name, vec![0u8; 4])
}

#[test]
fn ingest_preserves_insertion_order_and_sequence_index() {
    let mut reg = TrackRegistry::new();
    let a = reg.ingest(IngestItem::new("video/mp4", bytes("a.mp4")));
    let b = reg.ingest(IngestItem::new("image/png", bytes("b.png")));
    let c = reg.ingest(IngestItem::new("audio/mpeg", bytes("c.mp3")));

    assert_eq!(a, Some(TrackId(0)));
    assert_eq!(b, Some(TrackId(1)));
    assert_eq!(c, Some(TrackId(2)));

    let kinds: Vec<_> = reg.tracks().iter().map(|t| t.kind()).collect();
    assert_eq!(
        kinds,
        vec![TrackKind::Video, TrackKind::Image, TrackKind::Audio]
    );
    for (i, t) in reg.tracks().iter().enumerate() {
        assert_eq!(t.sequence_index(), i);
    }
}

#[test]
fn unsupported_items_are_skipped_without_blocking_siblings() {
    let mut reg = TrackRegistry::new();
    assert_eq!(
        reg.ingest(IngestItem::new("application/pdf", bytes("doc.pdf"))),
        None
    );
    assert!(
        reg.ingest(IngestItem::new("audio/wav", bytes("t.wav")))
            .is_some()
    );
    assert_eq!(reg.len(), 1);
    assert_eq!(reg.tracks()[0].source().file_name(), "t.wav");
}

#[test]
fn duplicate_file_names_stay_distinct_tracks() {
    let mut reg = TrackRegistry::new();
    reg.append(TrackKind::Video, bytes("a.mp4"));
    reg.append(TrackKind::Video, bytes("a.mp4"));
    reg.append(TrackKind::Video, bytes("a.mp4"));
    reg.append(TrackKind::Audio, bytes("README"));
    reg.append(TrackKind::Audio, bytes("README"));

    let names: Vec<_> = reg.tracks().iter().map(|t| t.input_name()).collect();
    assert_eq!(names, vec!["a.mp4", "a-1.mp4", "a-2.mp4", "README", "README-1"]);
}

#[test]
fn get_and_of_kind_agree_with_registry_order() {
    let mut reg = TrackRegistry::new();
    reg.append(TrackKind::Audio, bytes("x.mp3"));
    let v = reg.append(TrackKind::Video, bytes("y.mp4"));
    reg.append(TrackKind::Audio, bytes("z.mp3"));

    assert_eq!(reg.get(v).unwrap().source().file_name(), "y.mp4");
    assert!(reg.get(TrackId(99)).is_none());
    let audio: Vec<_> = reg
        .of_kind(TrackKind::Audio)
        .map(|t| t.source().file_name())
        .collect();
    assert_eq!(audio, vec!["x.mp3", "z.mp3"]);
}

#[test]
fn input_names_are_plain_file_names() {
    let mut reg = TrackRegistry::new();
    reg.append(TrackKind::Video, bytes("../escaped.mp4"));
    reg.append(TrackKind::Video, bytes("/tmp/abs.mp4"));
    reg.append(TrackKind::Image, bytes("dir\\cover.png"));
    reg.append(TrackKind::Audio, bytes(".."));
    reg.append(TrackKind::Audio, bytes("clips/"));
    reg.append(TrackKind::Audio, bytes("sub/escaped.mp4"));

    let names: Vec<_> = reg.tracks().iter().map(|t| t.input_name()).collect();
    assert_eq!(
        names,
        vec!["escaped.mp4", "abs.mp4", "cover.png", "input", "input-1", "escaped-1.mp4"]
    );
    // The user-facing name is untouched.
    assert_eq!(reg.tracks()[0].source().file_name(), "../escaped.mp4");
}
