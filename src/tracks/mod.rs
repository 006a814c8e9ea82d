//! Track classification and the ordered track registry.

pub(crate) mod model;
pub(crate) mod registry;
