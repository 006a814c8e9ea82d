//! mediamerge turns an ordered set of video, audio and image files into one merged video.
//!
//! The crate does no decoding or encoding itself. It classifies inputs, numbers them the way
//! the transcoding backend will see them, synthesizes an `ffmpeg` filter graph and hands the
//! resulting argument list to a [`TranscodeBackend`].
//!
//! # Pipeline overview
//!
//! 1. **Ingest**: `IngestItem -> Track` in a [`TrackRegistry`] (unsupported media is skipped)
//! 2. **Allocate**: `TrackRegistry -> StreamIndexMap` (videos, then images, then audio)
//! 3. **Synthesize**: `StreamIndexMap -> FilterGraphSpec` (scale/setsar per visual track)
//! 4. **Build**: `FilterGraphSpec -> CompositionCommand` (inputs, graph, maps, output)
//! 5. **Run**: `CompositionCommand -> bytes` via a [`TranscodeBackend`] such as [`FfmpegBackend`]
//!
//! Audio tracks additionally get a [`Waveform`] preview, computed in the background after
//! ingest; previews never affect composition.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod audio;
mod compile;
mod foundation;
mod project;
mod session;
mod tracks;

/// Transcoding backends.
pub mod encode;

pub use assets::media::{
    AudioDecoder, DecodedAudio, FfmpegAudioDecoder, PREVIEW_SAMPLE_RATE, f32le_to_samples,
};
pub use audio::previews::{
    PreviewRequest, PreviewWorker, TrackWaveform, extract_track_waveforms, extract_waveforms,
};
pub use audio::raster::{WaveformStyle, render_waveform, save_waveform_png};
pub use audio::waveform::{
    DEFAULT_WAVEFORM_HEIGHT, DEFAULT_WAVEFORM_WIDTH, Waveform, WaveformSample, extract_waveform,
};
pub use compile::command::{CommandOptions, CompositionCommand, DEFAULT_OUTPUT_NAME, InputOrder};
pub use compile::filter_graph::{CLAUSE_SEPARATOR, FilterGraphSpec};
pub use compile::plan::{CompositionPlan, compile_plan};
pub use compile::streams::StreamIndexMap;
pub use foundation::core::{Resolution, TrackId};
pub use foundation::error::{COMPOSITION_FAILED_MESSAGE, MergeError, MergeResult};
pub use project::manifest::{InputSpec, ProjectManifest};
pub use session::merge_session::{
    DELIVERY_BASE_NAME, IngestReport, MergeSession, MergeSessionOpts, MergedOutput, SessionEvent,
    SessionUpdate,
};
pub use tracks::model::{IngestItem, MediaPayload, MediaSource, Track, TrackKind, mime_for_path};
pub use tracks::registry::TrackRegistry;

pub use encode::backend::{RecordingBackend, StagedInput, TranscodeBackend, TranscodeJob};
pub use encode::ffmpeg::{FfmpegBackend, FfmpegBackendOpts, ensure_parent_dir, is_ffmpeg_on_path};
