use std::fmt::Display;

use anyhow::Result;
use bookfinder::{details::NO_TITLE, list::ListView, types::author};

/// One line of the result picker.
#[derive(Debug, Clone, PartialEq)]
pub enum Choice {
    Book { index: usize, label: String },
    LoadMore { displayed: usize, total: usize },
    Quit,
}

impl Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Choice::Book { index, label } => write!(f, "{:>3}. {}", index + 1, label),
            Choice::LoadMore { displayed, total } => {
                write!(f, "Load More (showing {displayed} of {total})")
            }
            Choice::Quit => write!(f, "Quit"),
        }
    }
}

pub fn choices(view: &ListView<'_>) -> Vec<Choice> {
    let mut choices = view
        .visible
        .iter()
        .enumerate()
        .map(|(index, book)| {
            let title = book.title().unwrap_or(NO_TITLE);
            let label = match author::join_names(book.authors.as_deref()) {
                Some(authors) => format!("{title} ({authors})"),
                None => title.to_string(),
            };
            Choice::Book { index, label }
        })
        .collect::<Vec<_>>();
    if view.has_more {
        choices.push(Choice::LoadMore {
            displayed: view.displayed,
            total:     view.total,
        });
    }
    choices.push(Choice::Quit);
    choices
}

/// Asks which result to open. Escape counts as quitting.
pub fn user_choose(view: &ListView<'_>, cursor: usize) -> Result<Choice> {
    let choices = choices(view);
    let cursor = cursor.min(choices.len() - 1);
    let choice = inquire::Select::new("Pick a book to view its details", choices)
        .with_starting_cursor(cursor)
        .with_page_size(12)
        .prompt_skippable()?;
    Ok(choice.unwrap_or(Choice::Quit))
}
