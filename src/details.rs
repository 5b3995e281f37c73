//! The details view: picks up the book handed over by the list view, tries to
//! refresh it from the API, and lays it out with fallbacks for every field
//! the API might leave out.

use tracing::{debug, error, warn};

use crate::{
    session::SessionStore,
    traits::BookSource,
    types::{author, book::Book, genre::Genre},
};

pub const MISSING_SELECTION: &str =
    "Book information not found. Please select a book from the home page.";
pub const UNREADABLE_SELECTION: &str = "Error loading book information.";
pub const NO_TITLE: &str = "No Title";
pub const UNKNOWN_AUTHORS: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description available.";

/// Everything the details layout shows, already resolved to display strings.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsView {
    pub title:       String,
    /// `None` renders the "No Image" placeholder.
    pub image:       Option<String>,
    pub authors:     String,
    /// Empty means the genre block is left out.
    pub genres:      Vec<Genre>,
    pub rating:      Option<String>,
    pub isbn:        Option<String>,
    pub pages:       Option<String>,
    pub published:   Option<String>,
    pub description: String,
}

impl DetailsView {
    pub fn from_book(book: &Book) -> Self {
        Self {
            title:       book.title().unwrap_or(NO_TITLE).to_string(),
            image:       book.image().map(str::to_string),
            authors:     author::join_names(book.authors.as_deref())
                .unwrap_or_else(|| UNKNOWN_AUTHORS.to_string()),
            genres:      book
                .genres()
                .unwrap_or_default()
                .iter()
                .filter(|g| !g.as_str().trim().is_empty())
                .cloned()
                .collect(),
            rating:      book.rating.as_ref().and_then(|r| r.label()),
            isbn:        book.isbn().map(|x| x.to_string()),
            pages:       book.page_count().map(ToString::to_string),
            published:   book.publish_date().map(ToString::to_string),
            description: book.description().unwrap_or(NO_DESCRIPTION).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsPage {
    Book(Box<Book>),
    /// Nothing to show; the message is final and the user has to go back.
    Error(String),
}

impl DetailsPage {
    pub fn view(&self) -> Option<DetailsView> {
        match self {
            DetailsPage::Book(book) => Some(DetailsView::from_book(book)),
            DetailsPage::Error(_) => None,
        }
    }
}

pub struct DetailsController<S> {
    source: S,
    store:  SessionStore,
}

impl<S: BookSource> DetailsController<S> {
    pub fn new(source: S, store: SessionStore) -> Self {
        Self { source, store }
    }

    /// Loads the handed-over book. A failed refresh is not an error: the
    /// handed-over record is shown as is.
    pub async fn load(&self) -> DetailsPage {
        let raw = match self.store.selected_book() {
            Ok(Some(raw)) => raw,
            Ok(None) => return DetailsPage::Error(MISSING_SELECTION.into()),
            Err(e) => {
                error!("Error loading information: {:#}", e);
                return DetailsPage::Error(UNREADABLE_SELECTION.into());
            }
        };
        let book: Book = match serde_json::from_str(&raw) {
            Ok(book) => book,
            Err(e) => {
                error!("Error loading information: {}", e);
                return DetailsPage::Error(UNREADABLE_SELECTION.into());
            }
        };
        let api_key = match self.store.api_key() {
            Ok(key) => key,
            Err(e) => {
                warn!("Couldn't read API key from session: {:#}", e);
                None
            }
        };

        match (book.defined_id(), api_key) {
            (Some(id), Some(api_key)) => match self.source.fetch_book(id, &api_key).await {
                Ok(full) => {
                    debug!("Refreshed book {}", id);
                    DetailsPage::Book(Box::new(full))
                }
                Err(e) => {
                    warn!("Error fetching complete information: {:#}", e);
                    DetailsPage::Book(Box::new(book))
                }
            },
            _ => DetailsPage::Book(Box::new(book)),
        }
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
    fn empty_record_uses_every_fallback() {
        let view = DetailsView::from_book(&book(r#"{"id": 1}"#));
        assert_eq!(
            view,
            DetailsView {
                title:       NO_TITLE.into(),
                image:       None,
                authors:     UNKNOWN_AUTHORS.into(),
                genres:      vec![],
                rating:      None,
                isbn:        None,
                pages:       None,
                published:   None,
                description: NO_DESCRIPTION.into(),
            }
        );
    }

    #[test]
    fn full_record() {
        let view = DetailsView::from_book(&book(
            r#"{
                "id": 42,
                "title": "The Dispossessed",
                "image": "https://covers.example/42.jpg",
                "authors": [{"id": 9, "name": "Ursula K. Le Guin"}, "Someone Else"],
                "genres": ["fiction", "science fiction"],
                "rating": {"average": 0.8},
                "identifiers": {"isbn_10": "0060512750"},
                "number_of_pages": 387,
                "publish_date": 1974,
                "description": "An ambiguous utopia."
            }"#,
        ));
        assert_eq!(view.title, "The Dispossessed");
        assert_eq!(view.image.as_deref(), Some("https://covers.example/42.jpg"));
        assert_eq!(view.authors, "Ursula K. Le Guin, Someone Else");
        assert_eq!(view.genres, vec![Genre::from("fiction"), Genre::from("science fiction")]);
        assert_eq!(view.rating.as_deref(), Some("4.0 / 5.0"));
        assert_eq!(view.isbn.as_deref(), Some("0060512750"));
        assert_eq!(view.pages.as_deref(), Some("387"));
        assert_eq!(view.published.as_deref(), Some("1974"));
        assert_eq!(view.description, "An ambiguous utopia.");
    }

    #[test]
    fn whole_float_numbers_show_as_integers() {
        let view = DetailsView::from_book(&book(
            r#"{"id": 1, "publish_date": 1965.0, "number_of_pages": 412.0}"#,
        ));
        assert_eq!(view.published.as_deref(), Some("1965"));
        assert_eq!(view.pages.as_deref(), Some("412"));
    }

    #[test]
    fn mismatched_fields_fall_back() {
        let view = DetailsView::from_book(&book(
            r#"{"id": 1, "title": 42, "authors": [{"id": 9}], "rating": {"average": "0.8"}, "description": {"text": "x"}}"#,
        ));
        assert_eq!(view.title, NO_TITLE);
        assert_eq!(view.authors, UNKNOWN_AUTHORS);
        assert_eq!(view.rating.as_deref(), Some("4.0 / 5.0"));
        assert_eq!(view.description, NO_DESCRIPTION);
    }
}
