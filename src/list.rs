//! The search/list view: runs a search, keeps the normalized results, and
//! reveals them a page at a time.

use std::{fmt::Display, ops::Range};

use anyhow::{anyhow, Result};
use tracing::{debug, error, info};

use crate::{
    api::SearchParams,
    config::Config,
    normalize::normalize_books_from_response,
    pagination::{Paginator, DEFAULT_PAGE_SIZE},
    session::SessionStore,
    traits::BookSource,
    types::{book::Book, genre::Genre},
};

/// The one-line message shown above the grid.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Welcome,
    /// The query was blank; nothing was sent.
    EmptyQuery,
    Loading,
    NoResults,
    NoGenreResults(Genre),
    Showing {
        displayed: usize,
        total:     usize,
        genre:     Option<Genre>,
    },
    /// Any network, HTTP or decoding failure.
    Failed,
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(self, Status::Failed)
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Welcome => write!(f, "To get started, search for a book title or topic."),
            Status::EmptyQuery => write!(f, "Please enter a search query."),
            Status::Loading => write!(f, "Loading..."),
            Status::NoResults => write!(f, "No results found."),
            Status::NoGenreResults(_) => write!(f, "No books found in this genre."),
            Status::Showing {
                displayed,
                total,
                genre: None,
            } => write!(f, "Showing {displayed} of {total} books"),
            Status::Showing {
                displayed,
                total,
                genre: Some(genre),
            } => write!(f, "Showing {displayed} of {total} books in genre \"{genre}\""),
            Status::Failed => write!(f, "Error connecting to API. Please try again."),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListSettings {
    pub search_limit: u32,
    pub genre_limit:  u32,
    pub page_size:    usize,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            search_limit: 24,
            genre_limit:  36,
            page_size:    DEFAULT_PAGE_SIZE,
        }
    }
}

impl From<&Config> for ListSettings {
    fn from(config: &Config) -> Self {
        Self {
            search_limit: config.search_limit,
            genre_limit:  config.genre_limit,
            page_size:    config.page_size,
        }
    }
}

/// Snapshot of what the list view currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListView<'a> {
    pub status:           &'a Status,
    pub current_category: Option<&'a Genre>,
    pub genre_chips:      &'a [Genre],
    pub visible:          &'a [Book],
    pub displayed:        usize,
    pub total:            usize,
    pub has_more:         bool,
}

type StatusHook = Box<dyn Fn(&Status)>;

pub struct ListController<S> {
    source:           S,
    store:            SessionStore,
    settings:         ListSettings,
    status:           Status,
    results:          Option<Paginator>,
    genre_chips:      Vec<Genre>,
    current_category: Option<Genre>,
    on_status:        Option<StatusHook>,
}

impl<S: BookSource> ListController<S> {
    pub fn new(source: S, store: SessionStore, settings: ListSettings) -> Self {
        Self {
            source,
            store,
            settings,
            status: Status::Welcome,
            results: None,
            genre_chips: vec![],
            current_category: None,
            on_status: None,
        }
    }

    /// Called on every status change, including the loading status that is
    /// only visible while a request is in flight.
    pub fn with_status_hook(mut self, hook: impl Fn(&Status) + 'static) -> Self {
        self.on_status = Some(Box::new(hook));
        self
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn current_category(&self) -> Option<&Genre> {
        self.current_category.as_ref()
    }

    pub fn genre_chips(&self) -> &[Genre] {
        &self.genre_chips
    }

    pub fn visible(&self) -> &[Book] {
        match &self.results {
            Some(results) => results.visible(),
            None => &[],
        }
    }

    pub fn has_more(&self) -> bool {
        self.results.as_ref().map_or(false, Paginator::has_more)
    }

    pub fn view(&self) -> ListView<'_> {
        ListView {
            status:           &self.status,
            current_category: self.current_category.as_ref(),
            genre_chips:      &self.genre_chips,
            visible:          self.visible(),
            displayed:        self.results.as_ref().map_or(0, Paginator::displayed),
            total:            self.results.as_ref().map_or(0, Paginator::total),
            has_more:         self.has_more(),
        }
    }

    fn set_status(&mut self, status: Status) {
        debug!("Status: {}", status);
        if let Some(hook) = &self.on_status {
            hook(&status);
        }
        self.status = status;
    }

    fn set_current_category(&mut self, genre: Option<Genre>) {
        self.current_category = genre;
    }

    pub fn clear_results(&mut self) {
        self.genre_chips.clear();
        self.results = None;
    }

    fn handle_fetch_error(&mut self, e: anyhow::Error) {
        error!("API Error: {:#}", e);
        self.set_status(Status::Failed);
    }

    pub async fn search_by_query(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            self.set_status(Status::EmptyQuery);
            return;
        }

        self.clear_results();
        self.set_status(Status::Loading);
        self.set_current_category(None);

        let params = SearchParams::Query {
            text:   text.to_string(),
            number: self.settings.search_limit,
        };
        match self.source.search_books(&params).await {
            Ok(raw) => {
                let books = normalize_books_from_response(&raw);
                info!("Query '{}' returned {} books", text, books.len());
                self.render_books(books);
            }
            Err(e) => self.handle_fetch_error(e),
        }
    }

    pub async fn fetch_by_genre(&mut self, tag: &str) {
        let tag = tag.trim();
        if tag.is_empty() {
            self.set_status(Status::EmptyQuery);
            return;
        }
        let genre = Genre::from(tag);

        self.clear_results();
        self.set_status(Status::Loading);

        let params = SearchParams::Genre {
            genre:  genre.clone(),
            number: self.settings.genre_limit,
        };
        match self.source.search_books(&params).await {
            Ok(raw) => {
                let books = normalize_books_from_response(&raw);
                info!("Genre '{}' returned {} books", genre, books.len());
                if books.is_empty() {
                    self.set_status(Status::NoGenreResults(genre));
                    return;
                }
                self.genre_chips = vec![genre.clone()];
                self.set_current_category(Some(genre));
                self.render_books(books);
            }
            Err(e) => self.handle_fetch_error(e),
        }
    }

    /// Replaces the grid with `books` and reveals the first page.
    pub fn render_books(&mut self, books: Vec<Book>) {
        if books.is_empty() {
            self.results = None;
            self.set_status(Status::NoResults);
            return;
        }
        let mut results = Paginator::new(books, self.settings.page_size);
        results.reveal_next();
        self.results = Some(results);
        self.set_showing_status();
    }

    /// Reveals the next page and returns the indices of the newly shown cards.
    pub fn load_more(&mut self) -> Range<usize> {
        let Some(results) = self.results.as_mut() else {
            return 0..0;
        };
        let start = results.displayed();
        let end = start + results.reveal_next().len();
        self.set_showing_status();
        start..end
    }

    fn set_showing_status(&mut self) {
        if let Some(results) = &self.results {
            let status = Status::Showing {
                displayed: results.displayed(),
                total:     results.total(),
                genre:     self.current_category.clone(),
            };
            self.set_status(status);
        }
    }

    /// Hands the card at `index` over to the details view.
    pub fn select(&self, index: usize) -> Result<&Book> {
        let book = self
            .results
            .as_ref()
            .and_then(|r| r.get(index))
            .ok_or_else(|| anyhow!("No book at position {}", index + 1))?;
        self.store.select_book(book, self.source.api_key())?;
        debug!("Selected book {:?}", book.id);
        Ok(book)
    }
}
