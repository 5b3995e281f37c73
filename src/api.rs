use anyhow::{anyhow, Context, Result};
use reqwest::Url;
use tracing::{debug, trace};

use crate::{
    config::Config,
    traits::BookSource,
    types::{book::Book, genre::Genre, id::BookId},
};

const SEARCH_PATH: &str = "search-books";

/// One of the two ways of asking the search endpoint for books.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchParams {
    Query { text: String, number: u32 },
    Genre { genre: Genre, number: u32 },
}

impl SearchParams {
    fn pairs(&self) -> [(&'static str, String); 2] {
        match self {
            SearchParams::Query { text, number } => {
                [("query", text.clone()), ("number", number.to_string())]
            }
            SearchParams::Genre { genre, number } => [
                ("genres", genre.to_string()),
                ("number", number.to_string()),
            ],
        }
    }
}

/// Client for the Big Book API.
#[derive(Debug, Clone)]
pub struct BigBookClient {
    base:    String,
    api_key: String,
    client:  reqwest::Client,
}

impl BigBookClient {
    pub fn new(base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base:    base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client:  reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_base, &config.api_key)
    }

    pub fn search_url(&self, params: &SearchParams) -> Result<Url> {
        let mut url = self.endpoint(&[SEARCH_PATH])?;
        url.query_pairs_mut()
            .append_pair("api-key", &self.api_key)
            .extend_pairs(params.pairs());
        Ok(url)
    }

    pub fn book_url(&self, id: &BookId, api_key: &str) -> Result<Url> {
        let mut url = self.endpoint(&[&id.to_string()])?;
        url.query_pairs_mut().append_pair("api-key", api_key);
        Ok(url)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url =
            Url::parse(&self.base).with_context(|| format!("Invalid API base '{}'", self.base))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("API base '{}' can't have a path", self.base))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_text(&self, url: Url) -> Result<String> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            );
        }
        Ok(resp.text().await?)
    }
}

impl BookSource for BigBookClient {
    async fn search_books(&self, params: &SearchParams) -> Result<serde_json::Value> {
        debug!("Searching books with {:?}", params);
        let resp = self.get_text(self.search_url(params)?).await?;
        trace!("Search response: {} bytes", resp.len());
        serde_json::from_str(&resp).context("Search response isn't valid JSON")
    }

    async fn fetch_book(&self, id: &BookId, api_key: &str) -> Result<Book> {
        debug!("Fetching book {}", id);
        let resp = self.get_text(self.book_url(id, api_key)?).await?;
        let de = &mut serde_json::Deserializer::from_str(&resp);
        serde_path_to_error::deserialize(de)
            .map_err(|e| anyhow!("Book {} has an unexpected shape at '{}': {}", id, e.path(), e.inner()))
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn client() -> BigBookClient {
        BigBookClient::new("https://api.bigbookapi.com/", "k3y")
    }

    #[test]
    fn query_search_url() {
        let url = client()
            .search_url(&SearchParams::Query {
                text:   "the left hand & darkness".into(),
                number: 24,
            })
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.bigbookapi.com/search-books?api-key=k3y&query=the+left+hand+%26+darkness&number=24"
        );
    }

    #[test]
    fn genre_search_url() {
        let url = client()
            .search_url(&SearchParams::Genre {
                genre:  "science fiction".into(),
                number: 36,
            })
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.bigbookapi.com/search-books?api-key=k3y&genres=science+fiction&number=36"
        );
    }

    #[test]
    fn book_url_encodes_id_as_segment() {
        let c = client();
        assert_eq!(
            c.book_url(&BookId::from(16384), "k3y").unwrap().as_str(),
            "https://api.bigbookapi.com/16384?api-key=k3y"
        );
        assert_eq!(
            c.book_url(&BookId::from("a/b"), "k3y").unwrap().as_str(),
            "https://api.bigbookapi.com/a%2Fb?api-key=k3y"
        );
    }

    #[test]
    fn whole_float_id_in_book_url() {
        let id: BookId = serde_json::from_str("16384.0").unwrap();
        assert_eq!(
            client().book_url(&id, "k3y").unwrap().as_str(),
            "https://api.bigbookapi.com/16384?api-key=k3y"
        );
    }

    #[test]
    fn invalid_base_is_an_error() {
        let c = BigBookClient::new("not a url", "k3y");
        assert!(c.book_url(&BookId::from(1), "k3y").is_err());
    }
}
