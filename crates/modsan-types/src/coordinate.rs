use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `group:module` pair naming a published module.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct Coordinate {
    pub group: String,
    pub module: String,
}

impl Coordinate {
    pub fn new(group: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            module: module.into(),
        }
    }

    /// The internal aggregator that must never reach published metadata.
    pub fn aggregator() -> Self {
        Self::new(
            crate::ids::DEFAULT_EXCLUDE_GROUP,
            crate::ids::DEFAULT_EXCLUDE_MODULE,
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.module)
    }
}
