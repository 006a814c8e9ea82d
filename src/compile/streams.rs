use std::collections::HashMap;

use crate::{
    foundation::core::TrackId,
    tracks::{model::TrackKind, registry::TrackRegistry},
};

/// Backend input index of every track, derived once per composition.
///
/// The backend numbers inputs by their position in a flat list. Tracks are laid out as
/// `videos ++ images ++ audios`, each group keeping its relative registry order, and every
/// consumer (filter graph, input arguments, output mapping) reads indices from this map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamIndexMap {
    order: Vec<TrackId>,
    index: HashMap<TrackId, usize>,
    visual_count: usize,
}

impl StreamIndexMap {
    /// Allocate indices for the current registry contents.
    pub fn allocate(registry: &TrackRegistry) -> Self {
        let order: Vec<TrackId> = [TrackKind::Video, TrackKind::Image, TrackKind::Audio]
            .into_iter()
            .flat_map(|kind| registry.of_kind(kind).map(|t| t.id()))
            .collect();
        let index = order.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        let visual_count = registry.tracks().iter().filter(|t| t.kind().is_visual()).count();

        Self {
            order,
            index,
            visual_count,
        }
    }

    /// Input index of `track`, if it was part of the allocation.
    pub fn index_of(&self, track: TrackId) -> Option<usize> {
        self.index.get(&track).copied()
    }

    /// Tracks in flattened input order.
    pub fn order(&self) -> &[TrackId] {
        &self.order
    }

    /// Total number of allocated inputs.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// `true` when the registry was empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of video and image tracks; they occupy indices `0..visual_count`.
    pub fn visual_count(&self) -> usize {
        self.visual_count
    }

    /// Visual tracks with their indices, in allocation order.
    pub fn visual(&self) -> impl Iterator<Item = (usize, TrackId)> + '_ {
        self.order[..self.visual_count].iter().copied().enumerate()
    }

    /// Audio tracks with their indices, in allocation order.
    pub fn audio(&self) -> impl Iterator<Item = (usize, TrackId)> + '_ {
        self.order[self.visual_count..]
            .iter()
            .enumerate()
            .map(|(i, id)| (self.visual_count + i, *id))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/streams.rs"]
mod tests;
