//! Payload decoding through external tools.

pub(crate) mod media;
