use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Authors come back either as bare names or as `{ "name": .. }` objects,
/// depending on the endpoint. Anything else is kept as is and has no name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorEntry {
    Named(NamedAuthor),
    Plain(String),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedAuthor {
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AuthorEntry {
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            AuthorEntry::Named(author) => &author.name,
            AuthorEntry::Plain(name) => name,
            AuthorEntry::Other(_) => return None,
        };
        Some(name.as_str()).filter(|x| !x.trim().is_empty())
    }
}

impl Display for AuthorEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name().unwrap_or_default())
    }
}

/// Joins author names with `", "`, or returns `None` when there are none.
pub fn join_names(authors: Option<&[AuthorEntry]>) -> Option<String> {
    let names = authors?
        .iter()
        .filter_map(AuthorEntry::name)
        .collect::<Vec<_>>();
    if names.is_empty() {
        return None;
    }
    Some(names.join(", "))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn mixed_author_shapes() {
        let authors: Vec<AuthorEntry> =
            serde_json::from_str(r#"[{"id": 3, "name": "Ursula K. Le Guin"}, "Frank Herbert"]"#)
                .unwrap();
        assert_eq!(authors[0].name(), Some("Ursula K. Le Guin"));
        assert_eq!(authors[1].name(), Some("Frank Herbert"));
        assert_eq!(
            join_names(Some(&authors)).as_deref(),
            Some("Ursula K. Le Guin, Frank Herbert")
        );
    }

    #[test]
    fn unnamed_entries_are_skipped() {
        let authors: Vec<AuthorEntry> =
            serde_json::from_str(r#"[{"id": 9}, {"name": 4}, "", "Frank Herbert"]"#).unwrap();
        assert_eq!(authors[0], AuthorEntry::Other(serde_json::json!({"id": 9})));
        assert_eq!(join_names(Some(&authors)).as_deref(), Some("Frank Herbert"));
        assert_eq!(join_names(Some(&authors[..2])), None);
        assert_eq!(
            serde_json::to_value(&authors).unwrap(),
            serde_json::json!([{"id": 9}, {"name": 4}, "", "Frank Herbert"])
        );
    }

    #[test]
    fn no_authors() {
        assert_eq!(join_names(None), None);
        assert_eq!(join_names(Some(&[])), None);
    }
}
