//! Transcoding backends.
//!
//! The backend is an external capability: it receives argument tokens plus the payloads they
//! reference and returns the output bytes.

/// Backend trait, job description and a recording backend.
pub mod backend;
/// `ffmpeg`-based backend (system binary).
pub mod ffmpeg;
