//! Repository layer: the catalog's document store
//!
//! Four independent collections (authors, books, genres, book instances)
//! keyed by store-generated ids. References between records are stored as
//! ids only and resolved by the services.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::{ops::Deref, sync::Arc};
use uuid::Uuid;

use crate::{
    config::{DatabaseConfig, StoreBackend},
    error::AppResult,
    models::{
        Author, Book, BookInstance, BookInstanceStatus, BookSummary, BookTitle, Genre, NewAuthor,
        NewBook, NewBookInstance, NewGenre,
    },
};

/// Document store operations used by the catalog services
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Round-trip to the backing store
    async fn ping(&self) -> AppResult<()>;

    // Authors

    /// All authors, ordered by family name
    async fn list_authors(&self) -> AppResult<Vec<Author>>;
    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>>;
    async fn authors_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Author>>;
    async fn insert_author(&self, author: &NewAuthor) -> AppResult<Author>;
    async fn count_authors(&self) -> AppResult<i64>;

    // Books

    /// All books, ordered by title
    async fn list_books(&self) -> AppResult<Vec<Book>>;
    /// Ids and titles of all books, ordered by title
    async fn list_book_titles(&self) -> AppResult<Vec<BookTitle>>;
    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>>;
    async fn books_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Book>>;
    async fn books_by_author(&self, author: Uuid) -> AppResult<Vec<BookSummary>>;
    async fn books_by_genre(&self, genre: Uuid) -> AppResult<Vec<BookSummary>>;
    async fn insert_book(&self, book: &NewBook) -> AppResult<Book>;
    async fn count_books(&self) -> AppResult<i64>;

    // Genres

    /// All genres, ordered by name
    async fn list_genres(&self) -> AppResult<Vec<Genre>>;
    async fn get_genre(&self, id: Uuid) -> AppResult<Option<Genre>>;
    async fn genres_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>>;
    /// Genre whose name matches ignoring case
    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn insert_genre(&self, genre: &NewGenre) -> AppResult<Genre>;
    async fn count_genres(&self) -> AppResult<i64>;

    // Book instances

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstance>>;
    async fn get_book_instance(&self, id: Uuid) -> AppResult<Option<BookInstance>>;
    async fn book_instances_by_book(&self, book: Uuid) -> AppResult<Vec<BookInstance>>;
    async fn insert_book_instance(&self, instance: &NewBookInstance) -> AppResult<BookInstance>;
    /// Count copies, optionally only those with the given status
    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64>;
}

/// Shared handle on the configured store
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn CatalogStore>,
}

impl Repository {
    pub fn new(store: impl CatalogStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Open the store selected by configuration.
    ///
    /// For PostgreSQL this connects the pool and applies pending migrations.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            StoreBackend::Postgres => Ok(Self::new(postgres::PgStore::connect(config).await?)),
            StoreBackend::Memory => {
                tracing::warn!("Using the in-memory catalog store; nothing will be persisted");
                Ok(Self::new(memory::MemoryStore::new()))
            }
        }
    }
}

impl Deref for Repository {
    type Target = dyn CatalogStore;

    fn deref(&self) -> &Self::Target {
        self.store.as_ref()
    }
}
