//! Amplitude envelopes for audio track previews.

pub(crate) mod previews;
pub(crate) mod raster;
pub(crate) mod waveform;
