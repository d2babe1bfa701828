//! Sub-note model

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A unique identifier for a sub-note
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubNoteId(String);

impl SubNoteId {
    /// Create a new unique sub-note ID
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SubNoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubNoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SubNoteId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for SubNoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A plain-text child item attached to a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubNote {
    #[serde(default)]
    pub id: SubNoteId,
    #[serde(default)]
    pub text: String,
}

impl SubNote {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: SubNoteId::new(),
            text: text.into(),
        }
    }

    pub(crate) fn normalize_loaded(&mut self) -> bool {
        if self.id.0.trim().is_empty() {
            self.id = SubNoteId::new();
            return true;
        }
        false
    }
}
