use crate::{
    compile::{filter_graph::FilterGraphSpec, streams::StreamIndexMap},
    foundation::error::{MergeError, MergeResult},
    tracks::registry::TrackRegistry,
};

/// Default name of the file the backend writes.
pub const DEFAULT_OUTPUT_NAME: &str = "output.mp4";

/// Order in which `-i` input declarations are emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputOrder {
    /// Same order as the stream allocation, so filter indices match real input positions.
    #[default]
    Allocation,
    /// Raw ingestion order. Indices in the filter graph only line up with the inputs when
    /// tracks were ingested as videos, then images, then audio.
    Ingestion,
}

/// Knobs for [`CompositionCommand::build`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandOptions {
    /// Input declaration order.
    pub input_order: InputOrder,
    /// Output target handed to the backend; its extension selects the container.
    pub output_name: String,
    /// Overwrite an existing output (`-y`) instead of refusing (`-n`).
    pub overwrite: bool,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            input_order: InputOrder::default(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            overwrite: true,
        }
    }
}

/// Ordered argument tokens for one backend invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositionCommand {
    args: Vec<String>,
    inputs: Vec<String>,
    output_name: String,
}

impl CompositionCommand {
    /// Assemble inputs, filter graph, output maps and output target.
    ///
    /// Fails with [`MergeError::Precondition`] when there is no visual track to map as `[v0]`,
    /// before anything is handed to the backend. The output name must be a bare file name that
    /// no input uses, otherwise [`MergeError::Validation`] is returned.
    pub fn build(
        registry: &TrackRegistry,
        streams: &StreamIndexMap,
        graph: &FilterGraphSpec,
        opts: &CommandOptions,
    ) -> MergeResult<Self> {
        let Some(video_label) = graph.video_label() else {
            return Err(MergeError::precondition(
                "no video or image track to map as [v0]",
            ));
        };
        if opts.output_name.trim().is_empty() {
            return Err(MergeError::validation("output name must not be empty"));
        }
        let mut components = std::path::Path::new(&opts.output_name).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(std::path::Component::Normal(_)), None)
        ) {
            return Err(MergeError::validation(format!(
                "output name '{}' must be a bare file name",
                opts.output_name
            )));
        }

        let inputs: Vec<String> = match opts.input_order {
            InputOrder::Allocation => streams
                .order()
                .iter()
                .map(|id| {
                    registry
                        .get(*id)
                        .map(|t| t.input_name().to_string())
                        .ok_or_else(|| {
                            MergeError::validation(format!(
                                "{id} is allocated but missing from the registry"
                            ))
                        })
                })
                .collect::<MergeResult<_>>()?,
            InputOrder::Ingestion => registry
                .tracks()
                .iter()
                .map(|t| t.input_name().to_string())
                .collect(),
        };

        // The backend stages inputs next to the output target.
        if inputs.iter().any(|name| *name == opts.output_name) {
            return Err(MergeError::validation(format!(
                "output name '{}' collides with an input of the same name",
                opts.output_name
            )));
        }

        let mut args: Vec<String> = vec![
            if opts.overwrite { "-y" } else { "-n" }.to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
        ];
        for input in &inputs {
            args.push("-i".to_string());
            args.push(input.clone());
        }
        args.push("-filter_complex".to_string());
        args.push(graph.expression().to_string());
        args.push("-map".to_string());
        args.push(format!("[{video_label}]"));
        if let Some(audio) = graph.audio_selector() {
            args.push("-map".to_string());
            args.push(audio.to_string());
        }
        args.push(opts.output_name.clone());

        Ok(Self {
            args,
            inputs,
            output_name: opts.output_name.clone(),
        })
    }

    /// Full argument list, excluding the program name.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Input names in the order they are declared.
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Output target name.
    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    /// Extension of the output target, lowercased (`mp4` when absent).
    pub fn output_extension(&self) -> String {
        std::path::Path::new(&self.output_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "mp4".to_string())
    }

    /// Render as a single shell-style line for logs and `plan` output.
    ///
    /// Tokens containing whitespace or shell metacharacters are single-quoted; the backend
    /// itself always receives the unquoted tokens.
    pub fn to_command_line(&self, program: &str) -> String {
        std::iter::once(program)
            .chain(self.args.iter().map(String::as_str))
            .map(quote_token)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn quote_token(token: &str) -> String {
    let plain = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,+@%".contains(c));
    if plain {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/command.rs"]
mod tests;
