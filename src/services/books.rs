//! Book service: home page counts, book pages and book creation

use uuid::Uuid;

use super::{distinct_ids, index_by_id};
use crate::{
    error::{AppError, AppResult},
    models::{
        Book, BookDetail, BookFormOptions, BookInstanceStatus, BookWithAuthor, CatalogCounts,
        NewBook,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Check that the store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }

    /// The five home page counts, queried concurrently
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let (books, book_instances, book_instances_available, authors, genres) = tokio::try_join!(
            self.repository.count_books(),
            self.repository.count_book_instances(None),
            self.repository
                .count_book_instances(Some(BookInstanceStatus::Available)),
            self.repository.count_authors(),
            self.repository.count_genres(),
        )?;

        Ok(CatalogCounts {
            books,
            book_instances,
            book_instances_available,
            authors,
            genres,
        })
    }

    /// All books by title, each with its author resolved
    pub async fn list(&self) -> AppResult<Vec<BookWithAuthor>> {
        let books = self.repository.list_books().await?;
        let author_ids = distinct_ids(books.iter().map(|b| b.author));
        let authors = index_by_id(self.repository.authors_by_ids(&author_ids).await?, |a| a.id);

        Ok(books
            .into_iter()
            .map(|book| {
                let author = authors.get(&book.author).cloned();
                BookWithAuthor { book, author }
            })
            .collect())
    }

    /// Book with author and genres resolved, plus its copies
    pub async fn detail(&self, id: Uuid) -> AppResult<BookDetail> {
        let (book, instances) = tokio::try_join!(
            self.repository.get_book(id),
            self.repository.book_instances_by_book(id),
        )?;

        let book = book.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        let (author, genres) = tokio::try_join!(
            self.repository.get_author(book.author),
            self.repository.genres_by_ids(&book.genre),
        )?;

        // keep the book's own genre order
        let mut genres = index_by_id(genres, |g| g.id);
        let genres = book.genre.iter().filter_map(|id| genres.remove(id)).collect();

        Ok(BookDetail {
            book,
            author,
            genres,
            instances,
        })
    }

    /// Authors and genres for the book form's selection widgets
    pub async fn form_options(&self) -> AppResult<BookFormOptions> {
        let (authors, genres) = tokio::try_join!(
            self.repository.list_authors(),
            self.repository.list_genres(),
        )?;
        Ok(BookFormOptions { authors, genres })
    }

    pub async fn create(&self, book: NewBook) -> AppResult<Book> {
        let created = self.repository.insert_book(&book).await?;
        tracing::info!("Created book \"{}\" ({})", created.title, created.id);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, Genre};
    use crate::repository::MockCatalogStore;

    #[tokio::test]
    async fn counts_come_from_each_collection() {
        let mut store = MockCatalogStore::new();
        store.expect_count_books().returning(|| Ok(4));
        store.expect_count_book_instances().returning(|status| match status {
            None => Ok(9),
            Some(BookInstanceStatus::Available) => Ok(3),
            Some(_) => Ok(0),
        });
        store.expect_count_authors().returning(|| Ok(2));
        store.expect_count_genres().returning(|| Ok(5));

        let service = BooksService::new(Repository::new(store));
        let counts = service.counts().await.unwrap();
        assert_eq!(
            counts,
            CatalogCounts {
                books: 4,
                book_instances: 9,
                book_instances_available: 3,
                authors: 2,
                genres: 5,
            }
        );
    }

    #[tokio::test]
    async fn list_resolves_authors_and_tolerates_dangling_references() {
        let herbert = Author {
            id: Uuid::new_v4(),
            first_name: "Frank".to_string(),
            family_name: "Herbert".to_string(),
            date_of_birth: None,
            date_of_death: None,
        };
        let known = herbert.id;
        let books = vec![
            Book {
                id: Uuid::new_v4(),
                title: "Dune".to_string(),
                author: known,
                summary: String::new(),
                isbn: "1".to_string(),
                genre: vec![],
            },
            Book {
                id: Uuid::new_v4(),
                title: "Orphan".to_string(),
                author: Uuid::new_v4(),
                summary: String::new(),
                isbn: "2".to_string(),
                genre: vec![],
            },
        ];

        let mut store = MockCatalogStore::new();
        store.expect_list_books().return_once(move || Ok(books));
        store
            .expect_authors_by_ids()
            .returning(move |_| Ok(vec![herbert.clone()]));

        let service = BooksService::new(Repository::new(store));
        let list = service.list().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].author.as_ref().map(|a| a.id), Some(known));
        assert!(list[1].author.is_none());
    }

    #[tokio::test]
    async fn detail_keeps_genre_order() {
        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());
        let book = Book {
            id: Uuid::new_v4(),
            title: "Dune".to_string(),
            author: Uuid::new_v4(),
            summary: "desert planet".to_string(),
            isbn: "9780441013593".to_string(),
            genre: vec![first, second],
        };
        let book_id = book.id;

        let mut store = MockCatalogStore::new();
        store
            .expect_get_book()
            .return_once(move |_| Ok(Some(book)));
        store.expect_book_instances_by_book().returning(|_| Ok(vec![]));
        store.expect_get_author().returning(|_| Ok(None));
        store.expect_genres_by_ids().returning(move |_| {
            Ok(vec![
                Genre {
                    id: second,
                    name: "Adventure".to_string(),
                },
                Genre {
                    id: first,
                    name: "Science Fiction".to_string(),
                },
            ])
        });

        let service = BooksService::new(Repository::new(store));
        let detail = service.detail(book_id).await.unwrap();
        let ids: Vec<Uuid> = detail.genres.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[tokio::test]
    async fn missing_book_is_not_found() {
        let mut store = MockCatalogStore::new();
        store.expect_get_book().returning(|_| Ok(None));
        store.expect_book_instances_by_book().returning(|_| Ok(vec![]));

        let service = BooksService::new(Repository::new(store));
        let err = service.detail(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
