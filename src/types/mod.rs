pub mod scalar;

pub mod author;
pub mod book;
pub mod genre;
pub mod id;
pub mod isbn;
pub mod lenient;
pub mod rating;
