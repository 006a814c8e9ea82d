//! Project manifest configuration.

pub(crate) mod manifest;
