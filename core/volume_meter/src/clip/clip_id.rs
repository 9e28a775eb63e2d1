use std::fmt;

use uuid::Uuid;

/// Stable identity of a clip; gain curves are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipId(Uuid);

impl ClipId {
    pub fn new() -> Self {
        Uuid::new_v4().into()
    }
}

impl Default for ClipId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ClipId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
