//! Turning whatever the search endpoint sent back into a flat list of books.
//!
//! The endpoint has answered with each of these over time:
//!
//! - `{"books": [[{..}], [{..}, {..}]]}`, one inner array per result group
//! - `{"books": [{..}, {..}]}`
//! - `[{..}, {..}]`
//!
//! All of them flatten to the same ordered list. Anything else is treated as
//! an empty result rather than an error. The only entries left out are those
//! without a usable `id`; fields of an unexpected shape read as absent.

use serde_json::Value;
use tracing::{trace, warn};

use crate::types::{book::Book, scalar::Scalar};

pub fn normalize_books_from_response(raw: &Value) -> Vec<Book> {
    let entries = match raw {
        Value::Object(map) => match map.get("books") {
            Some(Value::Array(entries)) => entries,
            _ => {
                trace!("Response object has no books array");
                return vec![];
            }
        },
        Value::Array(entries) => entries,
        _ => {
            trace!("Response is neither an object nor an array");
            return vec![];
        }
    };

    let mut books = Vec::new();
    for entry in entries {
        match entry {
            Value::Array(group) => books.extend(group.iter().filter_map(decode_entry)),
            _ => books.extend(decode_entry(entry)),
        }
    }
    books
}

fn decode_entry(entry: &Value) -> Option<Book> {
    if !has_defined_id(entry) {
        return None;
    }
    match serde_path_to_error::deserialize::<_, Book>(entry) {
        Ok(book) => Some(book),
        Err(e) => {
            warn!("Dropping book with unexpected '{}': {}", e.path(), e.inner());
            None
        }
    }
}

fn has_defined_id(entry: &Value) -> bool {
    match entry.get("id") {
        Some(Value::String(s)) => Scalar::Text(s.clone()).is_present(),
        Some(Value::Number(n)) => Scalar::Number(n.clone()).is_present(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        Some(Value::Null) | None => false,
    }
}
