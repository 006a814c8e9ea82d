use std::{fmt, str::FromStr};

use crate::foundation::error::{MergeError, MergeResult};

/// Stable identity of a track inside a registry.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TrackId(pub u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "track#{}", self.0)
    }
}

/// Target output height in pixels.
///
/// Visual tracks are scaled to this height with their aspect ratio preserved. Accepts either a
/// JSON integer (`720`) or a string (`"720"`), matching how resolution pickers report values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "ResolutionRepr", into = "u32")]
pub struct Resolution(u32);

impl Resolution {
    /// Build a resolution from a pixel height; zero is rejected.
    pub fn new(height: u32) -> MergeResult<Self> {
        if height == 0 {
            return Err(MergeError::validation("resolution height must be > 0"));
        }
        Ok(Self(height))
    }

    /// Output height in pixels.
    pub fn height(self) -> u32 {
        self.0
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self(720)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Resolution {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // Pickers commonly label heights as "720p".
        let digits = trimmed.strip_suffix(['p', 'P']).unwrap_or(trimmed);
        let height = digits
            .parse::<u32>()
            .map_err(|e| MergeError::validation(format!("invalid resolution '{s}': {e}")))?;
        Self::new(height)
    }
}

impl From<Resolution> for u32 {
    fn from(r: Resolution) -> Self {
        r.0
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ResolutionRepr {
    Int(u32),
    Text(String),
}

impl TryFrom<ResolutionRepr> for Resolution {
    type Error = MergeError;

    fn try_from(value: ResolutionRepr) -> Result<Self, Self::Error> {
        match value {
            ResolutionRepr::Int(h) => Self::new(h),
            ResolutionRepr::Text(s) => s.parse(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
