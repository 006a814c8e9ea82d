use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::foundation::core::TrackId;

/// Media category of a track. Fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Moving picture, optionally with its own audio.
    Video,
    /// Audio-only input.
    Audio,
    /// Still image, treated by the backend as a zero-duration video source.
    Image,
}

impl TrackKind {
    /// Map a declared MIME type onto a track kind by its top-level category.
    ///
    /// Returns `None` for anything that is not `video/*`, `audio/*` or `image/*`.
    pub fn classify(mime: &str) -> Option<Self> {
        let (category, _) = mime.split_once('/')?;
        match category.trim().to_ascii_lowercase().as_str() {
            "video" => Some(Self::Video),
            "audio" => Some(Self::Audio),
            "image" => Some(Self::Image),
            _ => None,
        }
    }

    /// Whether the backend consumes this track as a picture stream.
    pub fn is_visual(self) -> bool {
        matches!(self, Self::Video | Self::Image)
    }

    /// Lowercase label used in logs and listings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Image => "image",
        }
    }
}

/// Where a track's bytes live.
#[derive(Clone, Debug)]
pub enum MediaPayload {
    /// Bytes already held in memory (e.g. delivered by a file picker).
    Bytes(Arc<[u8]>),
    /// A file on disk that is read lazily by the backend.
    File(PathBuf),
}

impl MediaPayload {
    /// Read the payload fully into memory.
    pub fn read_bytes(&self) -> std::io::Result<Arc<[u8]>> {
        match self {
            Self::Bytes(b) => Ok(b.clone()),
            Self::File(path) => std::fs::read(path).map(Arc::from),
        }
    }
}

/// Opaque handle on one media payload together with its user-facing file name.
///
/// Owned by one [`Track`]. Clones share in-memory bytes, so a background preview can hold a
/// payload while the track stays registered.
#[derive(Clone, Debug)]
pub struct MediaSource {
    file_name: String,
    payload: MediaPayload,
}

impl MediaSource {
    /// Wrap in-memory bytes.
    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            file_name: file_name.into(),
            payload: MediaPayload::Bytes(bytes.into()),
        }
    }

    /// Reference a file on disk. The file name is taken from the last path component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            file_name,
            payload: MediaPayload::File(path),
        }
    }

    /// File name as delivered at ingest.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Underlying payload.
    pub fn payload(&self) -> &MediaPayload {
        &self.payload
    }

    /// Path on disk, when the payload is file-backed.
    pub fn path(&self) -> Option<&Path> {
        match &self.payload {
            MediaPayload::File(p) => Some(p),
            MediaPayload::Bytes(_) => None,
        }
    }
}

/// One ingested media unit.
#[derive(Debug)]
pub struct Track {
    pub(crate) id: TrackId,
    pub(crate) kind: TrackKind,
    pub(crate) source: MediaSource,
    pub(crate) sequence_index: usize,
    pub(crate) input_name: String,
}

impl Track {
    /// Stable identity.
    pub fn id(&self) -> TrackId {
        self.id
    }

    /// Media category.
    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    /// Owned media payload.
    pub fn source(&self) -> &MediaSource {
        &self.source
    }

    /// Position in ingestion order (display only).
    pub fn sequence_index(&self) -> usize {
        self.sequence_index
    }

    /// Name the backend sees for this input; unique within a registry.
    pub fn input_name(&self) -> &str {
        &self.input_name
    }
}

/// One item delivered by the file-acquisition collaborator.
#[derive(Debug)]
pub struct IngestItem {
    /// Declared MIME type, e.g. `video/mp4`.
    pub mime: String,
    /// Payload and file name.
    pub source: MediaSource,
}

impl IngestItem {
    /// Build an ingest item from a declared MIME type and a source.
    pub fn new(mime: impl Into<String>, source: MediaSource) -> Self {
        Self {
            mime: mime.into(),
            source,
        }
    }

    /// Build an ingest item for a file on disk, inferring the MIME type from its extension.
    ///
    /// Unknown extensions produce `application/octet-stream`, which classification drops.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mime = mime_for_path(&path).to_string();
        Self::new(mime, MediaSource::from_path(path))
    }
}

/// Infer a MIME type from a file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/flac",
        "m4a" | "aac" => "audio/aac",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracks/model.rs"]
mod tests;
