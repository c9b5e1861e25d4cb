//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::author::Author;
use super::book_instance::BookInstance;
use super::form::{parse_record_id, FormErrors, Invalid};
use super::genre::Genre;

/// Stored book record. `author` and `genre` hold ids of other records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Uuid>,
}

impl Book {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

fn book_url(id: Uuid) -> String {
    format!("/catalog/book/{}", id)
}

/// Title and summary, as listed on author and genre pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
}

impl BookSummary {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

/// Title only, for the copy form's book dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct BookTitle {
    pub id: Uuid,
    pub title: String,
}

impl BookTitle {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            summary: book.summary.clone(),
        }
    }
}

impl From<&Book> for BookTitle {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
        }
    }
}

/// Validated book, ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Uuid>,
}

impl NewBook {
    pub fn into_book(self, id: Uuid) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            summary: self.summary,
            isbn: self.isbn,
            genre: self.genre,
        }
    }
}

/// Book create form as submitted.
///
/// `genre` is a checkbox group: the form decoder yields an empty list when
/// nothing is ticked and a one-element list for a single tick.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Author must not be empty."))]
    pub author: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "ISBN must not be empty."))]
    pub isbn: String,
    #[serde(default)]
    pub genre: Vec<String>,
}

const BOOK_FIELDS: &[&str] = &["title", "author", "summary", "isbn", "genre"];

impl BookForm {
    fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            summary: self.summary.trim().to_string(),
            isbn: self.isbn.trim().to_string(),
            genre: self.genre,
        }
    }

    /// Whether a genre checkbox should be rendered ticked
    pub fn has_genre(&self, id: Uuid) -> bool {
        let id = id.to_string();
        self.genre.iter().any(|g| *g == id)
    }

    pub fn validated(self) -> Result<NewBook, Invalid<Self>> {
        let form = self.trimmed();
        let mut errors = match form.validate() {
            Ok(()) => FormErrors::default(),
            Err(errors) => FormErrors::from_validation(errors, BOOK_FIELDS),
        };

        let author = parse_record_id(
            &form.author,
            "author",
            "Author must be chosen from the list.",
            &mut errors,
            BOOK_FIELDS,
        );

        let genre: Vec<Uuid> = form
            .genre
            .iter()
            .filter_map(|g| Uuid::parse_str(g).ok())
            .collect();
        if genre.len() != form.genre.len() {
            errors.insert("genre", "Genre must be chosen from the list.", BOOK_FIELDS);
        }

        match author {
            Some(author) if errors.is_empty() => Ok(NewBook {
                title: form.title,
                author,
                summary: form.summary,
                isbn: form.isbn,
                genre,
            }),
            _ => Err(Invalid { form, errors }),
        }
    }
}

/// Book list row with its author resolved
#[derive(Debug, Clone)]
pub struct BookWithAuthor {
    pub book: Book,
    pub author: Option<Author>,
}

/// Book page: references resolved, plus the copies of the book
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

/// Choices offered by the book form
#[derive(Debug, Clone, Default)]
pub struct BookFormOptions {
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
}
