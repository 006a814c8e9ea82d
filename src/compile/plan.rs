use crate::{
    compile::{
        command::{CommandOptions, CompositionCommand},
        filter_graph::FilterGraphSpec,
        streams::StreamIndexMap,
    },
    foundation::{core::Resolution, error::MergeResult},
    tracks::registry::TrackRegistry,
};

/// Everything derived from one registry snapshot for a single backend invocation.
///
/// The stream allocation is computed exactly once here and shared by the filter graph and the
/// command builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositionPlan {
    /// Input index per track.
    pub streams: StreamIndexMap,
    /// Filter graph and selected output streams.
    pub graph: FilterGraphSpec,
    /// Backend argument tokens.
    pub command: CompositionCommand,
}

/// Allocate streams, synthesize the filter graph and build the backend command.
#[tracing::instrument(skip(registry, opts), fields(tracks = registry.len()))]
pub fn compile_plan(
    registry: &TrackRegistry,
    resolution: Resolution,
    opts: &CommandOptions,
) -> MergeResult<CompositionPlan> {
    let streams = StreamIndexMap::allocate(registry);
    let graph = FilterGraphSpec::synthesize(&streams, resolution);
    let command = CompositionCommand::build(registry, &streams, &graph, opts)?;
    tracing::debug!(
        inputs = command.inputs().len(),
        filter = graph.expression(),
        "compiled composition plan"
    );
    Ok(CompositionPlan {
        streams,
        graph,
        command,
    })
}
