use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::{
    compile::command::{CommandOptions, DEFAULT_OUTPUT_NAME, InputOrder},
    foundation::{
        core::Resolution,
        error::{MergeError, MergeResult},
    },
    tracks::model::{IngestItem, MediaSource, mime_for_path},
};

/// JSON project description: which files to merge and how.
///
/// ```json
/// {
///   "resolution": "720",
///   "output": "output.mp4",
///   "inputs": [{ "path": "intro.mp4" }, { "path": "theme", "mime": "audio/mpeg" }]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectManifest {
    /// Target output height.
    #[serde(default)]
    pub resolution: Resolution,
    /// Output target name handed to the backend.
    #[serde(default = "default_output_name")]
    pub output: String,
    /// Order of `-i` declarations.
    #[serde(default)]
    pub input_order: InputOrder,
    /// Inputs in ingestion order.
    pub inputs: Vec<InputSpec>,
}

/// One manifest input.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputSpec {
    /// File path; relative paths resolve against the manifest's directory.
    pub path: PathBuf,
    /// Declared MIME type; inferred from the extension when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}

fn default_output_name() -> String {
    DEFAULT_OUTPUT_NAME.to_string()
}

impl ProjectManifest {
    /// Parse a manifest from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> MergeResult<Self> {
        let manifest: Self = serde_json::from_reader(r)
            .map_err(|e| MergeError::serde(format!("parse project manifest JSON: {e}")))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parse a manifest file and resolve its relative input paths against its directory.
    pub fn from_path(path: impl AsRef<Path>) -> MergeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MergeError::validation(format!("open project manifest '{}': {e}", path.display()))
        })?;
        let mut manifest = Self::from_reader(BufReader::new(f))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        manifest.resolve_paths(base);
        Ok(manifest)
    }

    /// Check values serde cannot express.
    pub fn validate(&self) -> MergeResult<()> {
        if self.output.trim().is_empty() {
            return Err(MergeError::validation("manifest output must not be empty"));
        }
        if Path::new(&self.output).components().count() != 1 {
            return Err(MergeError::validation(format!(
                "manifest output '{}' must be a bare file name",
                self.output
            )));
        }
        Ok(())
    }

    /// Make relative input paths absolute with respect to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for input in &mut self.inputs {
            if input.path.is_relative() {
                input.path = base.join(&input.path);
            }
        }
    }

    /// Ingest items for every input, in manifest order.
    pub fn ingest_items(&self) -> Vec<IngestItem> {
        self.inputs
            .iter()
            .map(|input| {
                let mime = input
                    .mime
                    .clone()
                    .unwrap_or_else(|| mime_for_path(&input.path).to_string());
                IngestItem::new(mime, MediaSource::from_path(input.path.clone()))
            })
            .collect()
    }

    /// Command options described by this manifest.
    pub fn command_options(&self) -> CommandOptions {
        CommandOptions {
            input_order: self.input_order,
            output_name: self.output.clone(),
            ..CommandOptions::default()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/manifest.rs"]
mod tests;
