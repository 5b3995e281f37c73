use serde::{Deserialize, Serialize};

use super::{
    author::AuthorEntry,
    genre::Genre,
    id::BookId,
    isbn::{Identifiers, Isbn},
    lenient::lenient,
    rating::Rating,
    scalar::{first_present, Scalar},
};

/// A book record as returned by the search and lookup endpoints.
///
/// Every field is optional and several exist under more than one name
/// depending on the endpoint. A field of an unexpected shape reads as absent.
/// Fields this type doesn't know about are kept in `extra` so a record
/// survives a round trip through the session store.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id:              Option<BookId>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title:           Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub subtitle:        Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub image:           Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub authors:         Option<Vec<AuthorEntry>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub genres:          Option<Vec<Genre>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description:     Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub rating:          Option<Rating>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub identifiers:     Option<Identifiers>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub isbn:            Option<Scalar>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub isbn10:          Option<Scalar>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub isbn13:          Option<Scalar>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub number_of_pages: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub pages:           Option<Scalar>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub publish_date:    Option<Scalar>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub published_date:  Option<Scalar>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub published:       Option<Scalar>,
    #[serde(flatten)]
    pub extra:           serde_json::Map<String, serde_json::Value>,
}

impl Book {
    pub fn defined_id(&self) -> Option<&BookId> {
        self.id.as_ref().filter(|id| id.is_defined())
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|x| !x.is_empty())
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|x| !x.trim().is_empty())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|x| !x.is_empty())
    }

    pub fn genres(&self) -> Option<&[Genre]> {
        self.genres.as_deref().filter(|x| !x.is_empty())
    }

    /// Prefers the `identifiers` object (13 before 10), then the flat
    /// `isbn`, `isbn10` and `isbn13` fields.
    pub fn isbn(&self) -> Option<Isbn> {
        let identifiers = self.identifiers.as_ref();
        first_present(&[
            identifiers.and_then(|x| x.isbn_13.as_ref()),
            identifiers.and_then(|x| x.isbn_10.as_ref()),
            self.isbn.as_ref(),
            self.isbn10.as_ref(),
            self.isbn13.as_ref(),
        ])
        .map(Isbn::from)
    }

    pub fn page_count(&self) -> Option<&Scalar> {
        first_present(&[self.number_of_pages.as_ref(), self.pages.as_ref()])
    }

    pub fn publish_date(&self) -> Option<&Scalar> {
        first_present(&[
            self.publish_date.as_ref(),
            self.published_date.as_ref(),
            self.published.as_ref(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn book(json: &str) -> Book {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn isbn_prefers_identifiers_object() {
        let b = book(
            r#"{"id": 1, "identifiers": {"isbn_10": "0553283685", "isbn_13": "9780553283686"}, "isbn": "111"}"#,
        );
        assert_eq!(b.isbn(), Some(Isbn("9780553283686".into())));
        let b = book(r#"{"id": 1, "identifiers": {"isbn_10": "0553283685"}}"#);
        assert_eq!(b.isbn(), Some(Isbn("0553283685".into())));
    }

    #[test]
    fn isbn_falls_back_to_flat_fields() {
        let b = book(r#"{"id": 1, "identifiers": {}, "isbn13": 9780553283686}"#);
        assert_eq!(b.isbn(), Some(Isbn("9780553283686".into())));
        assert_eq!(book(r#"{"id": 1}"#).isbn(), None);
    }

    #[test]
    fn alternate_page_and_date_fields() {
        let b = book(r#"{"id": 1, "pages": 412, "published_date": "1965"}"#);
        assert_eq!(b.page_count().map(ToString::to_string).as_deref(), Some("412"));
        assert_eq!(b.publish_date().map(ToString::to_string).as_deref(), Some("1965"));
        let b = book(r#"{"id": 1, "number_of_pages": "300", "pages": 412, "publish_date": 1965.0}"#);
        assert_eq!(b.page_count().map(ToString::to_string).as_deref(), Some("300"));
        assert_eq!(b.publish_date().map(ToString::to_string).as_deref(), Some("1965"));
    }

    #[test]
    fn unknown_fields_survive_round_trip() {
        let json = serde_json::json!({"id": 7, "title": "Dune", "subtitles": ["x"], "rating": {"average": 0.9, "count": 3}});
        let b: Book = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(serde_json::to_value(&b).unwrap(), json);
    }

    #[test]
    fn mismatched_fields_read_as_missing() {
        let b = book(
            r#"{"id": 2, "title": 42, "image": false, "description": {"text": "x"}, "genres": "fantasy", "pages": [1], "rating": 5}"#,
        );
        assert_eq!(b.defined_id(), Some(&BookId::from(2)));
        assert_eq!(b.title(), None);
        assert_eq!(b.image(), None);
        assert_eq!(b.description(), None);
        assert_eq!(b.genres(), None);
        assert_eq!(b.page_count(), None);
        assert_eq!(b.rating, None);
    }

    #[test]
    fn blank_fields_read_as_missing() {
        let b = book(r#"{"id": "", "title": "", "image": " ", "genres": []}"#);
        assert_eq!(b.defined_id(), None);
        assert_eq!(b.title(), None);
        assert_eq!(b.image(), None);
        assert_eq!(b.genres(), None);
    }
}
