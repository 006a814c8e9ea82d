use std::{
    path::{Component, Path, PathBuf},
    process::{Command, Stdio},
    sync::atomic::{AtomicU64, Ordering},
};

use anyhow::Context as _;

use crate::{
    encode::backend::{TranscodeBackend, TranscodeJob},
    foundation::error::{MergeError, MergeResult},
    tracks::model::MediaPayload,
};

static WORK_DIR_SEQ: AtomicU64 = AtomicU64::new(0);

/// Options for [`FfmpegBackend`].
#[derive(Clone, Debug)]
pub struct FfmpegBackendOpts {
    /// Program to invoke.
    pub program: PathBuf,
    /// Directory scratch directories are created in (system temp dir when `None`).
    pub work_root: Option<PathBuf>,
    /// Keep the scratch directory after the run, for debugging.
    pub keep_work_dir: bool,
}

impl Default for FfmpegBackendOpts {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
            work_root: None,
            keep_work_dir: false,
        }
    }
}

/// [`TranscodeBackend`] that runs the system `ffmpeg` binary.
///
/// Every run stages the job's payloads into a fresh scratch directory under their input names,
/// runs `ffmpeg` there with the job's tokens as separate arguments, and reads the output target
/// back. Nothing survives between runs.
#[derive(Clone, Debug, Default)]
pub struct FfmpegBackend {
    opts: FfmpegBackendOpts,
}

impl FfmpegBackend {
    /// Create a backend with the given options.
    pub fn new(opts: FfmpegBackendOpts) -> Self {
        Self { opts }
    }
}

impl TranscodeBackend for FfmpegBackend {
    #[tracing::instrument(skip(self, job), fields(inputs = job.inputs.len()))]
    fn run(&self, job: &TranscodeJob<'_>) -> MergeResult<Vec<u8>> {
        if !is_program_on_path(&self.opts.program) {
            return Err(MergeError::backend(format!(
                "'{}' is required for composition, but was not found on PATH",
                self.opts.program.display()
            )));
        }

        let root = self.opts.work_root.clone().unwrap_or_else(std::env::temp_dir);
        let work = WorkDir::create(&root, self.opts.keep_work_dir)?;
        let output_path = staged_path(&work.path, job.command.output_name())?;
        for input in &job.inputs {
            stage_payload(input.source.payload(), &staged_path(&work.path, input.name)?)?;
        }

        let out = Command::new(&self.opts.program)
            .args(job.command.args())
            .current_dir(&work.path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                MergeError::backend(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(MergeError::backend(format!(
                "ffmpeg exited with status {}: {}",
                out.status,
                stderr.trim()
            )));
        }

        let bytes = std::fs::read(&output_path).map_err(|e| {
            MergeError::backend(format!(
                "ffmpeg reported success but output '{}' is unreadable: {e}",
                output_path.display()
            ))
        })?;
        tracing::info!(bytes = bytes.len(), "ffmpeg composition finished");
        Ok(bytes)
    }
}

/// Scratch directory removed on drop unless asked to keep it.
struct WorkDir {
    path: PathBuf,
    keep: bool,
}

impl WorkDir {
    fn create(root: &Path, keep: bool) -> MergeResult<Self> {
        let seq = WORK_DIR_SEQ.fetch_add(1, Ordering::Relaxed);
        let path = root.join(format!("mediamerge-{}-{seq}", std::process::id()));
        std::fs::create_dir_all(&path)
            .with_context(|| format!("failed to create work directory '{}'", path.display()))?;
        Ok(Self { path, keep })
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if self.keep {
            tracing::debug!(path = %self.path.display(), "keeping ffmpeg work directory");
            return;
        }
        if let Err(e) = std::fs::remove_dir_all(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove work directory");
        }
    }
}

/// Path of `name` inside the scratch directory; anything but a single plain component is refused.
fn staged_path(work: &Path, name: &str) -> MergeResult<PathBuf> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(work.join(name)),
        _ => Err(MergeError::backend(format!(
            "refusing to stage input '{name}' outside the work directory"
        ))),
    }
}

fn stage_payload(payload: &MediaPayload, dest: &Path) -> MergeResult<()> {
    match payload {
        MediaPayload::Bytes(bytes) => std::fs::write(dest, bytes)
            .with_context(|| format!("failed to stage input '{}'", dest.display()))?,
        MediaPayload::File(src) => {
            std::fs::copy(src, dest).with_context(|| {
                format!(
                    "failed to stage input '{}' from '{}'",
                    dest.display(),
                    src.display()
                )
            })?;
        }
    }
    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> MergeResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    is_program_on_path(Path::new("ffmpeg"))
}

fn is_program_on_path(program: &Path) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
