use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A genre label, shown as a chip and sent back as the `genres` query parameter.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genre(pub String);

impl Genre {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Genre {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
