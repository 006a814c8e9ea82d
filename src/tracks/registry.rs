use std::collections::HashSet;

use crate::{
    foundation::core::TrackId,
    tracks::model::{IngestItem, MediaSource, Track, TrackKind},
};

/// Ordered, append-only collection of classified tracks.
///
/// Insertion order is preserved and duplicate file names are kept as distinct tracks. The
/// registry is the single source of truth for composition; stream indices are always derived
/// from it (see [`crate::StreamIndexMap`]) and never stored on the tracks themselves.
#[derive(Debug, Default)]
pub struct TrackRegistry {
    tracks: Vec<Track>,
    input_names: HashSet<String>,
}

impl TrackRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify and append one ingested item.
    ///
    /// Items whose MIME category is not video, audio or image are dropped and `None` is
    /// returned; this never affects other items.
    pub fn ingest(&mut self, item: IngestItem) -> Option<TrackId> {
        let Some(kind) = TrackKind::classify(&item.mime) else {
            tracing::warn!(
                file = item.source.file_name(),
                mime = %item.mime,
                "skipping input with unsupported media category"
            );
            return None;
        };
        Some(self.append(kind, item.source))
    }

    /// Append a track of a known kind. O(1) amortized.
    ///
    /// The backend input name is the file name reduced to its last path component and made
    /// unique within the registry.
    pub fn append(&mut self, kind: TrackKind, source: MediaSource) -> TrackId {
        let sequence_index = self.tracks.len();
        let id = TrackId(sequence_index as u64);
        let input_name = self.unique_input_name(source.file_name());
        self.input_names.insert(input_name.clone());

        tracing::debug!(
            %id,
            kind = kind.label(),
            file = source.file_name(),
            input = %input_name,
            "registered track"
        );
        self.tracks.push(Track {
            id,
            kind,
            source,
            sequence_index,
            input_name,
        });
        id
    }

    /// Tracks in ingestion order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Look up a track by identity.
    pub fn get(&self, id: TrackId) -> Option<&Track> {
        // Ids are dense sequence positions in an append-only registry.
        self.tracks
            .get(usize::try_from(id.0).ok()?)
            .filter(|t| t.id == id)
    }

    /// Number of registered tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// `true` when nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tracks of one kind, in registry order.
    pub fn of_kind(&self, kind: TrackKind) -> impl Iterator<Item = &Track> {
        self.tracks.iter().filter(move |t| t.kind == kind)
    }

    fn unique_input_name(&self, file_name: &str) -> String {
        let file_name = staging_name(file_name);
        if !self.input_names.contains(file_name) {
            return file_name.to_string();
        }
        let (stem, ext) = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (file_name, None),
        };
        (1usize..)
            .map(|n| match ext {
                Some(ext) => format!("{stem}-{n}.{ext}"),
                None => format!("{stem}-{n}"),
            })
            .find(|candidate| !self.input_names.contains(candidate))
            .unwrap_or_else(|| file_name.to_string())
    }
}

/// Last path component of a delivered file name; backends stage payloads under it.
fn staging_name(file_name: &str) -> &str {
    let last = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    match last {
        "" | "." | ".." => FALLBACK_INPUT_NAME,
        name => name,
    }
}

const FALLBACK_INPUT_NAME: &str = "input";

#[cfg(test)]
#[path = "../../tests/unit/tracks/registry.rs"]
mod tests;
