use crate::foundation::error::{MergeError, MergeResult};

/// Default render width in pixel columns for waveform previews.
pub const DEFAULT_WAVEFORM_WIDTH: u32 = 500;
/// Default render height in pixels for waveform previews.
pub const DEFAULT_WAVEFORM_HEIGHT: u32 = 100;

/// Extremum amplitudes of one time bucket, in normalized `[-1, 1]` space.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WaveformSample {
    /// Lowest amplitude in the bucket.
    pub min: f32,
    /// Highest amplitude in the bucket.
    pub max: f32,
}

/// Fixed-width amplitude envelope, one [`WaveformSample`] per pixel column.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Waveform {
    samples: Vec<WaveformSample>,
    bucket_len: usize,
}

impl Waveform {
    /// Per-column samples in bucket order.
    pub fn samples(&self) -> &[WaveformSample] {
        &self.samples
    }

    /// Number of columns (the requested width).
    pub fn width(&self) -> usize {
        self.samples.len()
    }

    /// Samples per bucket (`ceil(len / width)`); the last buckets may be shorter or empty.
    pub fn bucket_len(&self) -> usize {
        self.bucket_len
    }
}

/// Downsample a single-channel buffer into `width` `(min, max)` buckets.
///
/// Buckets are contiguous and `ceil(samples.len() / width)` long. Empty buckets (which occur
/// when there are fewer samples than columns) report `(0, 0)`. Non-finite samples are ignored
/// and finite ones are clamped to `[-1, 1]`.
pub fn extract_waveform(samples: &[f32], width: u32) -> MergeResult<Waveform> {
    if width == 0 {
        return Err(MergeError::validation("waveform width must be >= 1"));
    }
    let width = width as usize;
    let bucket_len = samples.len().div_ceil(width);

    let out = (0..width)
        .map(|col| {
            let start = (col * bucket_len).min(samples.len());
            let end = (start + bucket_len).min(samples.len());
            bucket_extrema(&samples[start..end])
        })
        .collect();

    Ok(Waveform {
        samples: out,
        bucket_len,
    })
}

fn bucket_extrema(bucket: &[f32]) -> WaveformSample {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &s in bucket.iter().filter(|s| s.is_finite()) {
        let s = s.clamp(-1.0, 1.0);
        min = min.min(s);
        max = max.max(s);
    }
    if min > max {
        return WaveformSample::default();
    }
    WaveformSample { min, max }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/waveform.rs"]
mod tests;
