use crate::types::book::Book;

pub const DEFAULT_PAGE_SIZE: usize = 4;

/// Holds a full result list and how much of it has been revealed so far.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginator {
    books:     Vec<Book>,
    displayed: usize,
    page_size: usize,
}

impl Paginator {
    /// Nothing is revealed until the first [`Paginator::reveal_next`].
    pub fn new(books: Vec<Book>, page_size: usize) -> Self {
        Self {
            books,
            displayed: 0,
            page_size: page_size.max(1),
        }
    }

    /// Reveals the next `min(page_size, remaining)` books and returns them.
    pub fn reveal_next(&mut self) -> &[Book] {
        let start = self.displayed;
        self.displayed = (start + self.page_size).min(self.books.len());
        &self.books[start..self.displayed]
    }

    pub fn visible(&self) -> &[Book] {
        &self.books[..self.displayed]
    }

    pub fn displayed(&self) -> usize {
        self.displayed
    }

    pub fn total(&self) -> usize {
        self.books.len()
    }

    /// Whether the "Load More" control should still be offered.
    pub fn has_more(&self) -> bool {
        self.displayed < self.books.len()
    }

    pub fn get(&self, index: usize) -> Option<&Book> {
        self.visible().get(index)
    }
}
