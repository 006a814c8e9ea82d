use std::sync::{Mutex, PoisonError};

use crate::{
    compile::command::CompositionCommand,
    foundation::error::{MergeError, MergeResult},
    tracks::{model::MediaSource, registry::TrackRegistry},
};

/// One payload the backend must make available under `name` before running.
#[derive(Clone, Copy, Debug)]
pub struct StagedInput<'a> {
    /// Name used by the `-i` tokens.
    pub name: &'a str,
    /// Payload to stage.
    pub source: &'a MediaSource,
}

/// A single backend invocation: the command tokens plus the payloads they reference.
#[derive(Clone, Debug)]
pub struct TranscodeJob<'a> {
    /// Argument tokens (program name excluded).
    pub command: &'a CompositionCommand,
    /// Payloads, one per registered track.
    pub inputs: Vec<StagedInput<'a>>,
}

impl<'a> TranscodeJob<'a> {
    /// Pair a command with every track payload of `registry`.
    pub fn new(command: &'a CompositionCommand, registry: &'a TrackRegistry) -> Self {
        let inputs = registry
            .tracks()
            .iter()
            .map(|t| StagedInput {
                name: t.input_name(),
                source: t.source(),
            })
            .collect();
        Self { command, inputs }
    }
}

/// Stateless transcoding capability: command tokens in, output bytes or an error out.
///
/// Implementations hold no per-run state; all inputs arrive through the [`TranscodeJob`].
pub trait TranscodeBackend {
    /// Run one job to completion and return the bytes of the output target.
    fn run(&self, job: &TranscodeJob<'_>) -> MergeResult<Vec<u8>>;
}

/// Backend that records every invocation and answers with a canned result.
///
/// Intended for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<Vec<String>>>,
    failure: Option<String>,
    output: Vec<u8>,
}

impl RecordingBackend {
    /// Backend that succeeds with `output`.
    pub fn succeeding(output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: output.into(),
            ..Self::default()
        }
    }

    /// Backend that fails every run with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Argument lists of all recorded runs, oldest first. A poisoned lock still yields them.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TranscodeBackend for RecordingBackend {
    fn run(&self, job: &TranscodeJob<'_>) -> MergeResult<Vec<u8>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(job.command.args().to_vec());
        match &self.failure {
            Some(msg) => Err(MergeError::backend(msg.clone())),
            None => Ok(self.output.clone()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/backend.rs"]
mod tests;
