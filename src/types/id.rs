use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::scalar::Scalar;

/// Identifier of a book in the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub Scalar);

impl BookId {
    pub fn is_defined(&self) -> bool {
        self.0.is_present()
    }
}

impl Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for BookId {
    fn from(n: i64) -> Self {
        Self(Scalar::from(n))
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        Self(Scalar::from(s))
    }
}
