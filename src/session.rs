use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{debug, trace};

use crate::types::book::Book;

pub const KEY_SELECTED_BOOK: &str = "selectedBook";
pub const KEY_API_KEY: &str = "apiKey";

/// String key/value store shared between the list and details views, kept in
/// a single JSON file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let s = fs::read_to_string(&self.path)
            .with_context(|| format!("Couldn't read session {}", self.path.display()))?;
        if s.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&s)
            .with_context(|| format!("Session {} is corrupt", self.path.display()))
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Couldn't create {}", parent.display()))?;
        }
        fs::write(&self.path, serde_json::to_string(entries)?)
            .with_context(|| format!("Couldn't write session {}", self.path.display()))
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    pub fn set(&self, key: &str, value: impl Into<String>) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.into());
        trace!("Session set {}", key);
        self.save(&entries)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Couldn't remove session {}", self.path.display()))?;
        }
        debug!("Session cleared");
        Ok(())
    }

    /// Hands a book over to the details view, replacing any earlier selection.
    pub fn select_book(&self, book: &Book, api_key: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(KEY_SELECTED_BOOK.into(), serde_json::to_string(book)?);
        entries.insert(KEY_API_KEY.into(), api_key.into());
        self.save(&entries)
    }

    /// The raw handoff record, if any. Parsing is left to the caller so a
    /// corrupt record can be told apart from a missing one.
    pub fn selected_book(&self) -> Result<Option<String>> {
        self.get(KEY_SELECTED_BOOK)
    }

    pub fn api_key(&self) -> Result<Option<String>> {
        Ok(self.get(KEY_API_KEY)?.filter(|x| !x.is_empty()))
    }
}
