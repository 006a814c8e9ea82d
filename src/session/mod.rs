//! Event-driven session API.

pub(crate) mod merge_session;
