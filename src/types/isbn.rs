use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{lenient::lenient, scalar::Scalar};

/// An ISBN as the API reported it. Not validated: the upstream data is
/// sometimes malformed and is still worth showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Isbn(pub String);

impl Isbn {
    pub fn parse(&self) -> Option<isbn2::Isbn> {
        self.0.trim().parse::<isbn2::Isbn>().ok()
    }

    /// Hyphenated form when the value is a valid ISBN-10/13, raw text otherwise.
    pub fn hyphenated(&self) -> String {
        self.parse()
            .and_then(|isbn| isbn.hyphenate().ok())
            .map(|x| x.to_string())
            .unwrap_or_else(|| self.0.clone())
    }
}

impl Display for Isbn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&Scalar> for Isbn {
    fn from(s: &Scalar) -> Self {
        Self(s.to_string())
    }
}

/// `identifiers` object of a book record.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifiers {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub isbn_10: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub isbn_13: Option<Scalar>,
    #[serde(flatten)]
    pub extra:   serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn hyphenates_valid_isbn() {
        let isbn = Isbn("9780553283686".into());
        assert!(isbn.parse().is_some());
        assert_eq!(isbn.hyphenated(), "978-0-553-28368-6");
    }

    #[test]
    fn keeps_invalid_isbn_raw() {
        let isbn = Isbn("not-an-isbn".into());
        assert!(isbn.parse().is_none());
        assert_eq!(isbn.hyphenated(), "not-an-isbn");
    }
}
