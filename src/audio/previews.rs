use std::sync::{
    Arc,
    mpsc::{Receiver, Sender},
};

use rayon::prelude::*;

use crate::{
    assets::media::AudioDecoder,
    audio::waveform::{Waveform, extract_waveform},
    foundation::core::TrackId,
    tracks::{
        model::{MediaSource, TrackKind},
        registry::TrackRegistry,
    },
};

/// Waveform preview of one audio track.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackWaveform {
    /// Track the preview belongs to.
    pub track: TrackId,
    /// `None` when the payload could not be decoded; the track stays usable for composition.
    pub waveform: Option<Waveform>,
}

/// One track whose audio should be previewed.
#[derive(Clone, Debug)]
pub struct PreviewRequest {
    /// Track the preview is for.
    pub track: TrackId,
    /// Payload to decode. In-memory payloads share their bytes with the track.
    pub source: MediaSource,
}

/// Decode and downsample every audio track of `registry`, in parallel.
///
/// Results come back in registry order. A decode failure only clears that track's waveform.
#[tracing::instrument(skip(registry, decoder), fields(tracks = registry.len()))]
pub fn extract_track_waveforms(
    registry: &TrackRegistry,
    decoder: &dyn AudioDecoder,
    width: u32,
) -> Vec<TrackWaveform> {
    let requests: Vec<PreviewRequest> = registry
        .of_kind(TrackKind::Audio)
        .map(|t| PreviewRequest {
            track: t.id(),
            source: t.source().clone(),
        })
        .collect();
    extract_waveforms(&requests, decoder, width)
}

/// Decode and downsample the requested tracks, in parallel, preserving their order.
pub fn extract_waveforms(
    requests: &[PreviewRequest],
    decoder: &dyn AudioDecoder,
    width: u32,
) -> Vec<TrackWaveform> {
    requests
        .par_iter()
        .map(|req| preview(req, decoder, width))
        .collect()
}

fn preview(req: &PreviewRequest, decoder: &dyn AudioDecoder, width: u32) -> TrackWaveform {
    let waveform = decoder
        .decode_first_channel(&req.source)
        .and_then(|pcm| extract_waveform(&pcm.samples, width));
    match waveform {
        Ok(w) => TrackWaveform {
            track: req.track,
            waveform: Some(w),
        },
        Err(err) => {
            tracing::warn!(
                track = %req.track,
                file = req.source.file_name(),
                error = %err,
                "waveform preview unavailable"
            );
            TrackWaveform {
                track: req.track,
                waveform: None,
            }
        }
    }
}

/// Computes previews on the rayon pool and hands them back over a channel.
///
/// [`PreviewWorker::submit`] returns immediately; finished previews are collected with
/// [`PreviewWorker::poll`] (non-blocking) or [`PreviewWorker::wait`].
pub struct PreviewWorker {
    decoder: Arc<dyn AudioDecoder>,
    width: u32,
    tx: Sender<TrackWaveform>,
    rx: Receiver<TrackWaveform>,
    pending: usize,
}

impl PreviewWorker {
    /// Worker decoding with `decoder` into previews `width` columns wide.
    pub fn new(decoder: Arc<dyn AudioDecoder>, width: u32) -> Self {
        let (tx, rx) = std::sync::mpsc::channel();
        Self {
            decoder,
            width,
            tx,
            rx,
            pending: 0,
        }
    }

    /// Queue `requests`; each is decoded as its own job.
    pub fn submit(&mut self, requests: Vec<PreviewRequest>) {
        for req in requests {
            let decoder = Arc::clone(&self.decoder);
            let tx = self.tx.clone();
            let width = self.width;
            self.pending += 1;
            rayon::spawn(move || {
                // The worker may be gone by the time the preview is ready.
                let _ = tx.send(preview(&req, decoder.as_ref(), width));
            });
        }
    }

    /// Number of submitted previews not yet collected.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Previews finished so far, in completion order. Never blocks.
    pub fn poll(&mut self) -> Vec<TrackWaveform> {
        let mut out = Vec::new();
        while let Ok(wf) = self.rx.try_recv() {
            self.pending -= 1;
            out.push(wf);
        }
        out
    }

    /// Block until every submitted preview has arrived; results are sorted by track.
    pub fn wait(&mut self) -> Vec<TrackWaveform> {
        let mut out = Vec::with_capacity(self.pending);
        while self.pending > 0 {
            let Ok(wf) = self.rx.recv() else {
                break;
            };
            self.pending -= 1;
            out.push(wf);
        }
        out.sort_by_key(|wf| wf.track);
        out
    }
}

impl std::fmt::Debug for PreviewWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewWorker")
            .field("width", &self.width)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/previews.rs"]
mod tests;
