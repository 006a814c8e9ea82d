/// Convenience result type used across mediamerge.
pub type MergeResult<T> = Result<T, MergeError>;

/// Notification shown to the user when a composition fails for any reason.
pub const COMPOSITION_FAILED_MESSAGE: &str = "An error occurred while generating the video.";

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum MergeError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// An audio payload could not be decoded into samples.
    #[error("decode error: {0}")]
    Decode(String),

    /// The registry lacks a track the fixed output mapping needs.
    #[error("composition precondition failed: {0}")]
    Precondition(String),

    /// The transcoding backend reported a failure.
    #[error("backend error: {0}")]
    Backend(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MergeError {
    /// Build a [`MergeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MergeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`MergeError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`MergeError::Backend`] value.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Build a [`MergeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Text for the single user-visible notification raised at the composition boundary.
    ///
    /// Precondition failures name the missing input so the user can fix the selection; every
    /// other failure collapses into the generic message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Precondition(msg) => format!("{COMPOSITION_FAILED_MESSAGE} ({msg})"),
            _ => COMPOSITION_FAILED_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
