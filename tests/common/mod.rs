#![allow(dead_code)]

use std::{cell::RefCell, collections::VecDeque, path::PathBuf, rc::Rc};

use anyhow::{anyhow, Result};
use bookfinder::{
    api::SearchParams,
    session::SessionStore,
    traits::BookSource,
    types::{book::Book, id::BookId},
};

/// In-memory stand-in for the HTTP client. Replies are consumed in order;
/// every request is recorded.
#[derive(Clone, Default)]
pub struct FakeSource {
    pub searches: Rc<RefCell<Vec<SearchParams>>>,
    pub fetches:  Rc<RefCell<Vec<(BookId, String)>>>,
    replies:      Rc<RefCell<VecDeque<Result<serde_json::Value>>>>,
    book:         Rc<RefCell<Option<Book>>>,
}

impl FakeSource {
    pub fn reply(self, reply: serde_json::Value) -> Self {
        self.replies.borrow_mut().push_back(Ok(reply));
        self
    }

    pub fn fail(self) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Err(anyhow!("HTTP 500: Internal Server Error")));
        self
    }

    pub fn with_book(self, book: Book) -> Self {
        *self.book.borrow_mut() = Some(book);
        self
    }
}

impl BookSource for FakeSource {
    async fn search_books(&self, params: &SearchParams) -> Result<serde_json::Value> {
        self.searches.borrow_mut().push(params.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("no reply queued")))
    }

    async fn fetch_book(&self, id: &BookId, api_key: &str) -> Result<Book> {
        self.fetches
            .borrow_mut()
            .push((id.clone(), api_key.to_string()));
        self.book
            .borrow()
            .clone()
            .ok_or_else(|| anyhow!("HTTP 404: Not Found"))
    }

    fn api_key(&self) -> &str {
        "test-key"
    }
}

/// A session store backed by a fresh file unique to `name`.
pub fn store(name: &str) -> SessionStore {
    let path: PathBuf = std::env::temp_dir()
        .join(format!("bookfinder-it-{}", std::process::id()))
        .join(format!("{name}.json"));
    let store = SessionStore::new(path);
    store.clear().unwrap();
    store
}

pub fn books_json(n: usize) -> serde_json::Value {
    serde_json::Value::Array(
        (1..=n)
            .map(|i| serde_json::json!({"id": i, "title": format!("Book {i}")}))
            .collect(),
    )
}
