//! Terminal rendering, styled through the `output_*` sections of [`Config`].

use std::fmt::Write;

use anyhow::Result;

use crate::{
    config::Config,
    details::DetailsView,
    list::{ListView, Status},
    traits::DisplayTerminal,
    types::{author, book::Book, isbn::Isbn},
};

/// A result card: its 1-based position, title and authors.
pub struct Card<'a> {
    pub index: usize,
    pub book:  &'a Book,
}

impl DisplayTerminal for Card<'_> {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()> {
        let title = self.book.title().unwrap_or(crate::details::NO_TITLE);
        let authors = author::join_names(self.book.authors.as_deref())
            .unwrap_or_else(|| "Unknown Author".to_string());
        write!(
            f,
            "{} {}\n    {}",
            config.output_index.format_str(self.index + 1),
            config.output_title.format_str(title),
            authors
        )?;
        if self.book.image().is_none() {
            write!(f, " {}", config.output_image.format_str("No Image"))?;
        }
        Ok(())
    }
}

impl DisplayTerminal for Status {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()> {
        let output = if self.is_error() {
            &config.output_error
        } else {
            &config.output_status
        };
        write!(f, "{}", output.format_str(self))?;
        Ok(())
    }
}

impl DisplayTerminal for DetailsView {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()> {
        writeln!(f, "{}", config.output_title.format_str(&self.title))?;
        match &self.image {
            Some(url) => writeln!(f, "{}", config.output_image.format_str(url))?,
            None => writeln!(f, "{}", config.output_image.format_str("No Image"))?,
        }
        writeln!(f, "{}", config.output_author.format_str(&self.authors))?;
        if !self.genres.is_empty() {
            writeln!(f, "{}", config.output_genre.format_vec(&self.genres))?;
        }
        if let Some(rating) = &self.rating {
            writeln!(f, "{}", config.output_rating.format_str(rating))?;
        }
        if let Some(isbn) = &self.isbn {
            let isbn = Isbn(isbn.clone()).hyphenated();
            writeln!(f, "{}", config.output_isbn.format_str(isbn))?;
        }
        if let Some(pages) = &self.pages {
            writeln!(f, "{}", config.output_page_count.format_str(pages))?;
        }
        if let Some(published) = &self.published {
            writeln!(f, "{}", config.output_publish_date.format_str(published))?;
        }
        writeln!(f)?;
        write!(f, "{}", config.output_description.format_str(&self.description))?;
        Ok(())
    }
}

/// Cards in `range` of the visible results, one per entry.
pub fn render_cards(
    view: &ListView<'_>,
    range: std::ops::Range<usize>,
    config: &Config,
) -> Result<String> {
    let mut s = String::new();
    for index in range {
        if let Some(book) = view.visible.get(index) {
            writeln!(s, "{}", Card { index, book }.fmt_to_string(config)?)?;
        }
    }
    Ok(s)
}

/// The whole list view: category, chips, every visible card and the status.
pub fn render_list(view: &ListView<'_>, config: &Config) -> Result<String> {
    let mut s = String::new();
    if let Some(genre) = view.current_category {
        writeln!(s, "{}", config.output_category.format_str(genre))?;
    }
    if !view.genre_chips.is_empty() {
        writeln!(s, "{}", config.output_genre.format_vec(view.genre_chips))?;
    }
    s.push_str(&render_cards(view, 0..view.visible.len(), config)?);
    writeln!(s, "{}", view.status.fmt_to_string(config)?)?;
    if view.has_more {
        writeln!(s, "{}", config.output_index.format_str("more: Load More"))?;
    }
    Ok(s)
}

pub fn render_error(message: &str, config: &Config) -> String {
    config.output_error.format_str(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_list_only_present_fields() {
        let config = Config::default();
        let view = DetailsView::from_book(
            &serde_json::from_str(r#"{"id": 1, "title": "Dune", "pages": 412}"#).unwrap(),
        );
        let s = view.fmt_to_string(&config).unwrap();
        assert!(s.contains("Dune"));
        assert!(s.contains("Pages:"));
        assert!(s.contains("412"));
        assert!(!s.contains("Rating:"));
        assert!(!s.contains("Genres:"));
        assert!(s.contains("No description available."));
    }

    #[test]
    fn status_line_uses_message() {
        let config = Config::default();
        let s = Status::Failed.fmt_to_string(&config).unwrap();
        assert!(s.contains("Error connecting to API. Please try again."));
    }
}
