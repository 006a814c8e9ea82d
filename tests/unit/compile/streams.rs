use super::*;
use crate::tracks::model::MediaSource;

fn registry(kinds: &[TrackKind]) -> TrackRegistry {
    let mut reg = TrackRegistry::new();
    for (i, kind) in kinds.iter().enumerate() {
        reg.append(*kind, MediaSource::from_bytes(format!("t{i}"), vec![0u8]));
    }
    reg
}

#[test]
fn videos_then_images_then_audio() {
    use TrackKind::*;
    let reg = registry(&[Audio, Image, Video, Audio, Video, Image]);
    let map = StreamIndexMap::allocate(&reg);

    assert_eq!(
        map.order(),
        &[
            TrackId(2),
            TrackId(4),
            TrackId(1),
            TrackId(5),
            TrackId(0),
            TrackId(3)
        ]
    );
    assert_eq!(map.index_of(TrackId(2)), Some(0));
    assert_eq!(map.index_of(TrackId(5)), Some(3));
    assert_eq!(map.index_of(TrackId(3)), Some(5));
    assert_eq!(map.visual_count(), 4);
}

#[test]
fn visual_then_audio_index_ranges() {
    use TrackKind::*;
    let patterns: [&[TrackKind]; 5] = [
        &[],
        &[Audio, Audio],
        &[Image],
        &[Video, Audio, Image, Audio, Video],
        &[Audio, Video, Audio, Image, Image, Audio],
    ];
    for kinds in patterns {
        let reg = registry(kinds);
        let map = StreamIndexMap::allocate(&reg);
        let v = kinds.iter().filter(|k| k.is_visual()).count();
        let a = kinds.len() - v;

        assert_eq!(map.len(), v + a);
        let visual: Vec<usize> = map.visual().map(|(i, _)| i).collect();
        let audio: Vec<usize> = map.audio().map(|(i, _)| i).collect();
        assert_eq!(visual, (0..v).collect::<Vec<_>>());
        assert_eq!(audio, (v..v + a).collect::<Vec<_>>());

        // Audio tracks keep their relative registry order.
        let audio_ids: Vec<TrackId> = map.audio().map(|(_, id)| id).collect();
        let expected: Vec<TrackId> = reg.of_kind(Audio).map(|t| t.id()).collect();
        assert_eq!(audio_ids, expected);
    }
}

#[test]
fn allocation_is_deterministic() {
    use TrackKind::*;
    let reg = registry(&[Image, Audio, Video]);
    assert_eq!(StreamIndexMap::allocate(&reg), StreamIndexMap::allocate(&reg));
}
