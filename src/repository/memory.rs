//! In-memory catalog store for local development and tests
//!
//! Collections keep insertion order, like a document store's natural order.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::{AppError, AppResult},
    models::{
        genre::genre_name_key, Author, Book, BookInstance, BookInstanceStatus, BookSummary,
        BookTitle, Genre, NewAuthor, NewBook, NewBookInstance, NewGenre,
    },
};

#[derive(Default)]
struct Collections {
    authors: Vec<Author>,
    books: Vec<Book>,
    genres: Vec<Genre>,
    book_instances: Vec<BookInstance>,
}

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn count(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let mut authors = self.collections.read().await.authors.clone();
        authors.sort_by(|a, b| a.family_name.cmp(&b.family_name));
        Ok(authors)
    }

    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        let collections = self.collections.read().await;
        Ok(collections.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn authors_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Author>> {
        let collections = self.collections.read().await;
        Ok(collections
            .authors
            .iter()
            .filter(|a| ids.contains(&a.id))
            .cloned()
            .collect())
    }

    async fn insert_author(&self, author: &NewAuthor) -> AppResult<Author> {
        let author = author.clone().into_author(Uuid::new_v4());
        self.collections.write().await.authors.push(author.clone());
        Ok(author)
    }

    async fn count_authors(&self) -> AppResult<i64> {
        Ok(count(self.collections.read().await.authors.len()))
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        let mut books = self.collections.read().await.books.clone();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn list_book_titles(&self) -> AppResult<Vec<BookTitle>> {
        let books = self.list_books().await?;
        Ok(books.iter().map(BookTitle::from).collect())
    }

    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        let collections = self.collections.read().await;
        Ok(collections.books.iter().find(|b| b.id == id).cloned())
    }

    async fn books_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Book>> {
        let collections = self.collections.read().await;
        Ok(collections
            .books
            .iter()
            .filter(|b| ids.contains(&b.id))
            .cloned()
            .collect())
    }

    async fn books_by_author(&self, author: Uuid) -> AppResult<Vec<BookSummary>> {
        let collections = self.collections.read().await;
        Ok(collections
            .books
            .iter()
            .filter(|b| b.author == author)
            .map(BookSummary::from)
            .collect())
    }

    async fn books_by_genre(&self, genre: Uuid) -> AppResult<Vec<BookSummary>> {
        let collections = self.collections.read().await;
        Ok(collections
            .books
            .iter()
            .filter(|b| b.genre.contains(&genre))
            .map(BookSummary::from)
            .collect())
    }

    async fn insert_book(&self, book: &NewBook) -> AppResult<Book> {
        let book = book.clone().into_book(Uuid::new_v4());
        self.collections.write().await.books.push(book.clone());
        Ok(book)
    }

    async fn count_books(&self) -> AppResult<i64> {
        Ok(count(self.collections.read().await.books.len()))
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let mut genres = self.collections.read().await.genres.clone();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn get_genre(&self, id: Uuid) -> AppResult<Option<Genre>> {
        let collections = self.collections.read().await;
        Ok(collections.genres.iter().find(|g| g.id == id).cloned())
    }

    async fn genres_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        let collections = self.collections.read().await;
        Ok(collections
            .genres
            .iter()
            .filter(|g| ids.contains(&g.id))
            .cloned()
            .collect())
    }

    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let key = genre_name_key(name);
        let collections = self.collections.read().await;
        Ok(collections
            .genres
            .iter()
            .find(|g| genre_name_key(&g.name) == key)
            .cloned())
    }

    async fn insert_genre(&self, genre: &NewGenre) -> AppResult<Genre> {
        let key = genre_name_key(&genre.name);
        let mut collections = self.collections.write().await;
        if collections.genres.iter().any(|g| genre_name_key(&g.name) == key) {
            return Err(AppError::Conflict(format!(
                "Genre \"{}\" already exists",
                genre.name
            )));
        }

        let genre = genre.clone().into_genre(Uuid::new_v4());
        collections.genres.push(genre.clone());
        Ok(genre)
    }

    async fn count_genres(&self) -> AppResult<i64> {
        Ok(count(self.collections.read().await.genres.len()))
    }

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstance>> {
        Ok(self.collections.read().await.book_instances.clone())
    }

    async fn get_book_instance(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        let collections = self.collections.read().await;
        Ok(collections.book_instances.iter().find(|i| i.id == id).cloned())
    }

    async fn book_instances_by_book(&self, book: Uuid) -> AppResult<Vec<BookInstance>> {
        let collections = self.collections.read().await;
        Ok(collections
            .book_instances
            .iter()
            .filter(|i| i.book == book)
            .cloned()
            .collect())
    }

    async fn insert_book_instance(&self, instance: &NewBookInstance) -> AppResult<BookInstance> {
        let instance = instance.clone().into_book_instance(Uuid::new_v4());
        self.collections
            .write()
            .await
            .book_instances
            .push(instance.clone());
        Ok(instance)
    }

    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        let collections = self.collections.read().await;
        let matching = collections
            .book_instances
            .iter()
            .filter(|i| status.map_or(true, |s| i.status == s))
            .count();
        Ok(count(matching))
    }
}
