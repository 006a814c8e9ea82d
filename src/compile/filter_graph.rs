use crate::{compile::streams::StreamIndexMap, foundation::core::Resolution};

/// Separator between filter chains in an `ffmpeg` filter graph.
pub const CLAUSE_SEPARATOR: &str = ";";

/// Synthesized filter graph plus the streams chosen as program output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterGraphSpec {
    clauses: Vec<String>,
    sinks: Vec<String>,
    expression: String,
    video_label: Option<String>,
    audio_selector: Option<String>,
}

impl FilterGraphSpec {
    /// Build the graph for an allocation: one scale/aspect clause per visual track.
    ///
    /// Audio tracks get no clause and are referenced through their input selector (`<i>:a`).
    /// Only the first visual label (`v0`) and the first audio selector are chosen as output;
    /// other visual tracks are normalized and then discarded through a `nullsink`, since every
    /// labeled filter output must be consumed.
    pub fn synthesize(streams: &StreamIndexMap, resolution: Resolution) -> Self {
        let clauses: Vec<String> = streams
            .visual()
            .map(|(i, _)| visual_clause(i, resolution))
            .collect();
        let sinks: Vec<String> = streams
            .visual()
            .skip(1)
            .map(|(i, _)| format!("[{}]nullsink", video_label(i)))
            .collect();
        let expression = clauses
            .iter()
            .chain(&sinks)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(CLAUSE_SEPARATOR);
        let video_label = streams.visual().next().map(|(i, _)| video_label(i));
        let audio_selector = streams.audio().next().map(|(i, _)| audio_selector(i));

        Self {
            clauses,
            sinks,
            expression,
            video_label,
            audio_selector,
        }
    }

    /// Per-track filter chains in allocation order.
    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    /// Sink chains for the unmapped visual labels (`[v<i>]nullsink`, `i >= 1`).
    pub fn sinks(&self) -> &[String] {
        &self.sinks
    }

    /// Complete filter-graph expression for `-filter_complex`.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Label of the mapped video stream (`v0`), absent without visual tracks.
    pub fn video_label(&self) -> Option<&str> {
        self.video_label.as_deref()
    }

    /// Selector of the mapped audio stream (e.g. `2:a`), absent without audio tracks.
    pub fn audio_selector(&self) -> Option<&str> {
        self.audio_selector.as_deref()
    }
}

fn visual_clause(index: usize, resolution: Resolution) -> String {
    format!(
        "[{index}:v]scale=-1:{h},setsar=1:1[{label}]",
        h = resolution.height(),
        label = video_label(index)
    )
}

fn video_label(index: usize) -> String {
    format!("v{index}")
}

fn audio_selector(index: usize) -> String {
    format!("{index}:a")
}

#[cfg(test)]
#[path = "../../tests/unit/compile/filter_graph.rs"]
mod tests;
