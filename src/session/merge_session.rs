use std::{path::Path, sync::Arc};

use crate::{
    assets::media::AudioDecoder,
    audio::{
        previews::{PreviewRequest, PreviewWorker, TrackWaveform},
        waveform::DEFAULT_WAVEFORM_WIDTH,
    },
    compile::{
        command::CommandOptions,
        plan::{CompositionPlan, compile_plan},
    },
    encode::backend::{TranscodeBackend, TranscodeJob},
    foundation::{
        core::{Resolution, TrackId},
        error::{MergeError, MergeResult},
    },
    tracks::{
        model::{IngestItem, TrackKind, mime_for_path},
        registry::TrackRegistry,
    },
};

/// Base name of the delivered artifact; the extension follows the output container.
pub const DELIVERY_BASE_NAME: &str = "merged_video";

/// Options for a [`MergeSession`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeSessionOpts {
    /// How the backend command is assembled.
    pub command: CommandOptions,
    /// Width of waveform previews in pixel columns.
    pub waveform_width: u32,
    /// Compute waveform previews for ingested audio tracks.
    pub previews: bool,
}

impl Default for MergeSessionOpts {
    fn default() -> Self {
        Self {
            command: CommandOptions::default(),
            waveform_width: DEFAULT_WAVEFORM_WIDTH,
            previews: true,
        }
    }
}

/// Input events that drive a session.
#[derive(Debug)]
pub enum SessionEvent {
    /// The user picked files; each is classified and appended in order.
    FilesSelected(Vec<IngestItem>),
    /// The user asked for the merged video at a target resolution.
    RenderRequested {
        /// Target output height.
        resolution: Resolution,
    },
    /// Collect waveform previews that finished since the last poll. Never blocks.
    PreviewsPolled,
}

/// What a handled [`SessionEvent`] produced.
#[derive(Debug)]
pub enum SessionUpdate {
    /// Files were ingested.
    Ingested(IngestReport),
    /// Waveform previews that finished decoding.
    Previews(Vec<TrackWaveform>),
    /// Composition succeeded.
    Rendered(MergedOutput),
    /// Composition failed; `notification` is the single message to show the user.
    Failed {
        /// User-facing message.
        notification: String,
    },
}

/// Outcome of one batch of selected files.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IngestReport {
    /// Tracks added, in selection order.
    pub added: Vec<TrackId>,
    /// File names dropped because their media category is unsupported.
    pub skipped: Vec<String>,
    /// Added audio tracks whose waveform previews are being computed in the background.
    pub pending_previews: Vec<TrackId>,
}

/// The merged video produced by a composition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergedOutput {
    /// Container bytes.
    pub bytes: Vec<u8>,
    /// Download name, `merged_video.<ext>`.
    pub file_name: String,
    /// MIME type of the container.
    pub mime: &'static str,
}

/// Owns the track registry and turns events into registry changes and compositions.
///
/// Compositions borrow the session mutably, so only one can be in flight at a time, and the
/// registry is never modified by a composition, whether it succeeds or fails.
pub struct MergeSession<B: TranscodeBackend> {
    registry: TrackRegistry,
    backend: B,
    previews: PreviewWorker,
    opts: MergeSessionOpts,
}

impl<B: TranscodeBackend> MergeSession<B> {
    /// Start a session with an empty registry.
    ///
    /// `decoder` feeds the waveform previews of ingested audio tracks.
    pub fn new(backend: B, decoder: Arc<dyn AudioDecoder>, opts: MergeSessionOpts) -> Self {
        Self {
            registry: TrackRegistry::new(),
            backend,
            previews: PreviewWorker::new(decoder, opts.waveform_width),
            opts,
        }
    }

    /// Current registry contents.
    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    /// The transcoding backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Dispatch one event.
    pub fn handle(&mut self, event: SessionEvent) -> SessionUpdate {
        match event {
            SessionEvent::FilesSelected(items) => SessionUpdate::Ingested(self.ingest(items)),
            SessionEvent::PreviewsPolled => SessionUpdate::Previews(self.poll_previews()),
            SessionEvent::RenderRequested { resolution } => match self.compose(resolution) {
                Ok(out) => SessionUpdate::Rendered(out),
                Err(err) => {
                    tracing::error!(error = %err, "composition failed");
                    SessionUpdate::Failed {
                        notification: err.user_message(),
                    }
                }
            },
        }
    }

    /// Classify and append `items`, then queue previews for the new audio tracks.
    ///
    /// Returns as soon as the tracks are registered; decoding happens in the background.
    pub fn ingest(&mut self, items: Vec<IngestItem>) -> IngestReport {
        let mut report = IngestReport::default();
        for item in items {
            let file_name = item.source.file_name().to_string();
            match self.registry.ingest(item) {
                Some(id) => report.added.push(id),
                None => report.skipped.push(file_name),
            }
        }

        if !self.opts.previews {
            return report;
        }
        // Previews only for this batch; earlier tracks already have theirs.
        let requests: Vec<PreviewRequest> = report
            .added
            .iter()
            .filter_map(|id| self.registry.get(*id))
            .filter(|t| t.kind() == TrackKind::Audio)
            .map(|t| PreviewRequest {
                track: t.id(),
                source: t.source().clone(),
            })
            .collect();
        report.pending_previews = requests.iter().map(|r| r.track).collect();
        self.previews.submit(requests);
        report
    }

    /// Previews finished since the last call, in completion order. Never blocks.
    pub fn poll_previews(&mut self) -> Vec<TrackWaveform> {
        self.previews.poll()
    }

    /// Block until every queued preview is done; results are sorted by track.
    pub fn wait_previews(&mut self) -> Vec<TrackWaveform> {
        self.previews.wait()
    }

    /// Number of previews queued but not yet collected.
    pub fn pending_previews(&self) -> usize {
        self.previews.pending()
    }

    /// Compile the current registry into a backend command without running it.
    pub fn plan(&self, resolution: Resolution) -> MergeResult<CompositionPlan> {
        compile_plan(&self.registry, resolution, &self.opts.command)
    }

    /// Compile and run one composition.
    #[tracing::instrument(skip(self), fields(tracks = self.registry.len()))]
    pub fn compose(&mut self, resolution: Resolution) -> MergeResult<MergedOutput> {
        let plan = self.plan(resolution)?;
        tracing::info!(
            command = %plan.command.to_command_line("ffmpeg"),
            "submitting composition"
        );

        let job = TranscodeJob::new(&plan.command, &self.registry);
        let bytes = self.backend.run(&job)?;
        if bytes.is_empty() {
            return Err(MergeError::backend("backend produced an empty output"));
        }

        let ext = plan.command.output_extension();
        Ok(MergedOutput {
            bytes,
            mime: delivery_mime(&ext),
            file_name: format!("{DELIVERY_BASE_NAME}.{ext}"),
        })
    }
}

fn delivery_mime(ext: &str) -> &'static str {
    match mime_for_path(Path::new(&format!("x.{ext}"))) {
        m if m.starts_with("video/") => m,
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/merge_session.rs"]
mod tests;
