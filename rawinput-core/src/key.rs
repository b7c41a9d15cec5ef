//! Logical key identifiers emitted to the dispatch layer

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a logical input key or axis (e.g. `Gamepad_LeftX`).
///
/// The empty name means no key is bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogicalKey(String);

impl LogicalKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unbound(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for LogicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unbound() {
            write!(f, "<unbound>")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl From<&str> for LogicalKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for LogicalKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for LogicalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
