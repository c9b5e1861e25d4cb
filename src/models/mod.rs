//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod form;
pub mod genre;

// Re-export commonly used types
pub use author::{Author, AuthorDetail, AuthorForm, NewAuthor};
pub use book::{
    Book, BookDetail, BookForm, BookFormOptions, BookSummary, BookTitle, BookWithAuthor, NewBook,
};
pub use book_instance::{
    BookInstance, BookInstanceForm, BookInstanceFormOptions, BookInstanceStatus,
    BookInstanceWithBook, NewBookInstance,
};
pub use form::{FieldError, FormErrors, Invalid};
pub use genre::{Genre, GenreCreated, GenreDetail, GenreForm, NewGenre};

/// Aggregate counts shown on the home page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub books: i64,
    pub book_instances: i64,
    pub book_instances_available: i64,
    pub authors: i64,
    pub genres: i64,
}
