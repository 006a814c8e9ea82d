use super::*;

#[test]
fn f32le_bytes_round_into_samples() {
    let mut bytes = Vec::new();
    for v in [0.0f32, -0.5, 1.0] {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    assert_eq!(f32le_to_samples(&bytes).unwrap(), vec![0.0, -0.5, 1.0]);
}

#[test]
fn misaligned_pcm_is_a_decode_error() {
    let err = f32le_to_samples(&[0, 0, 0]).unwrap_err();
    assert!(matches!(err, MergeError::Decode(_)));
}

#[cfg(not(feature = "media-ffmpeg"))]
#[test]
fn ffmpeg_decoder_reports_missing_feature() {
    let src = MediaSource::from_bytes("tone.wav", vec![0u8; 16]);
    let err = FfmpegAudioDecoder::default()
        .decode_first_channel(&src)
        .unwrap_err();
    assert!(err.to_string().contains("media-ffmpeg"));
}
