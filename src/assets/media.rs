use crate::{
    foundation::error::{MergeError, MergeResult},
    tracks::model::MediaSource,
};

/// Sample rate audio is decoded at for previews.
pub const PREVIEW_SAMPLE_RATE: u32 = 48_000;

/// First channel of a decoded audio payload.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedAudio {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Samples of channel 0, nominally in `[-1, 1]`.
    pub samples: Vec<f32>,
}

/// Decodes audio payloads into samples for waveform previews.
///
/// Implementations must be safe to call from several threads at once; each call reads only the
/// payload it is given. Previews run on background jobs, so decoders are also `Send`.
pub trait AudioDecoder: Send + Sync {
    /// Decode the first channel of `source`.
    fn decode_first_channel(&self, source: &MediaSource) -> MergeResult<DecodedAudio>;
}

/// [`AudioDecoder`] backed by the system `ffmpeg` binary.
#[derive(Clone, Copy, Debug)]
pub struct FfmpegAudioDecoder {
    /// Output sample rate requested from `ffmpeg`.
    pub sample_rate: u32,
}

impl Default for FfmpegAudioDecoder {
    fn default() -> Self {
        Self {
            sample_rate: PREVIEW_SAMPLE_RATE,
        }
    }
}

impl AudioDecoder for FfmpegAudioDecoder {
    fn decode_first_channel(&self, source: &MediaSource) -> MergeResult<DecodedAudio> {
        decode_first_channel_f32(source, self.sample_rate)
    }
}

#[cfg(feature = "media-ffmpeg")]
fn decode_first_channel_f32(source: &MediaSource, sample_rate: u32) -> MergeResult<DecodedAudio> {
    use crate::tracks::model::MediaPayload;
    use std::io::Write as _;
    use std::process::{Command, Stdio};

    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-v", "error", "-i"]);
    match source.payload() {
        MediaPayload::File(path) => {
            cmd.arg(path).stdin(Stdio::null());
        }
        MediaPayload::Bytes(_) => {
            cmd.arg("pipe:0").stdin(Stdio::piped());
        }
    }
    cmd.args([
        "-vn",
        "-af",
        "pan=mono|c0=c0",
        "-f",
        "f32le",
        "-acodec",
        "pcm_f32le",
        "-ar",
        &sample_rate.to_string(),
        "pipe:1",
    ])
    .stdout(Stdio::piped())
    .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| {
        MergeError::decode(format!("failed to run ffmpeg for audio decode: {e}"))
    })?;

    // Feed in-memory payloads from a separate thread so stdout can drain concurrently.
    let feeder = match (source.payload(), child.stdin.take()) {
        (MediaPayload::Bytes(bytes), Some(mut stdin)) => {
            let bytes = bytes.clone();
            Some(std::thread::spawn(move || stdin.write_all(&bytes)))
        }
        _ => None,
    };

    let out = child.wait_with_output().map_err(|e| {
        MergeError::decode(format!("failed to wait for ffmpeg audio decode: {e}"))
    })?;
    if let Some(handle) = feeder {
        match handle.join() {
            Ok(Ok(())) => {}
            // ffmpeg may stop reading once it has what it needs.
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => {
                return Err(MergeError::decode(format!(
                    "failed to stream '{}' to ffmpeg: {e}",
                    source.file_name()
                )));
            }
            Err(_) => return Err(MergeError::decode("ffmpeg stdin feeder thread panicked")),
        }
    }

    if !out.status.success() {
        return Err(MergeError::decode(format!(
            "ffmpeg audio decode failed for '{}': {}",
            source.file_name(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    Ok(DecodedAudio {
        sample_rate,
        samples: f32le_to_samples(&out.stdout)?,
    })
}

#[cfg(not(feature = "media-ffmpeg"))]
fn decode_first_channel_f32(
    _source: &MediaSource,
    _sample_rate: u32,
) -> MergeResult<DecodedAudio> {
    Err(MergeError::decode(
        "audio decoding requires the 'media-ffmpeg' feature",
    ))
}

/// Reinterpret little-endian `f32` PCM bytes as samples.
pub fn f32le_to_samples(bytes: &[u8]) -> MergeResult<Vec<f32>> {
    if !bytes.len().is_multiple_of(4) {
        return Err(MergeError::decode(
            "decoded audio byte length is not aligned to f32 samples",
        ));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;
