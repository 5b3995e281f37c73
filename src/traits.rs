use anyhow::Result;

use crate::{
    api::SearchParams,
    config::Config,
    types::{book::Book, id::BookId},
};

/// Where book data comes from. Implemented by the HTTP client, and by
/// in-memory fakes in tests.
pub trait BookSource {
    /// Runs a search and returns the raw response body. Normalizing it is the
    /// caller's business, since the shape varies between API versions.
    async fn search_books(&self, params: &SearchParams) -> Result<serde_json::Value>;

    async fn fetch_book(&self, id: &BookId, api_key: &str) -> Result<Book>;

    fn api_key(&self) -> &str;
}

pub trait DisplayTerminal {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()>;

    fn fmt_to_string(&self, config: &Config) -> Result<String> {
        let mut s = String::new();
        DisplayTerminal::fmt(self, &mut s, config)?;
        Ok(s)
    }
}

impl<T: DisplayTerminal> DisplayTerminal for &T {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()> {
        DisplayTerminal::fmt(*self, f, config)
    }
}
