//! PostgreSQL-backed catalog store

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{postgres::PgPoolOptions, FromRow, Pool, Postgres};
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
    models::{
        genre::genre_name_key, Author, Book, BookInstance, BookInstanceStatus, BookSummary,
        BookTitle, Genre, NewAuthor, NewBook, NewBookInstance, NewGenre,
    },
};

// Orderings use the C collation so they match a plain byte-wise string sort.
const AUTHOR_COLUMNS: &str = "id, first_name, family_name, date_of_birth, date_of_death";
const BOOK_COLUMNS: &str = "id, title, author, summary, isbn, genre";
const BOOK_INSTANCE_COLUMNS: &str = "id, book, imprint, status, due_back";

/// Status is stored as TEXT and mapped back through `FromStr`.
#[derive(FromRow)]
struct BookInstanceRow {
    id: Uuid,
    book: Uuid,
    imprint: String,
    status: String,
    due_back: NaiveDate,
}

impl TryFrom<BookInstanceRow> for BookInstance {
    type Error = AppError;

    fn try_from(row: BookInstanceRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<BookInstanceStatus>().map_err(AppError::Internal)?;
        Ok(BookInstance {
            id: row.id,
            book: row.book,
            imprint: row.imprint,
            status,
            due_back: row.due_back,
        })
    }
}

fn book_instances_from_rows(rows: Vec<BookInstanceRow>) -> AppResult<Vec<BookInstance>> {
    rows.into_iter().map(BookInstance::try_from).collect()
}

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create the connection pool and bring the schema up to date
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.url)
            .await?;

        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::Internal(format!("Database migrations failed: {}", e)))?;

        tracing::info!("Database migrations completed");

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // =========================================================================
    // AUTHORS
    // =========================================================================

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let query = format!(
            "SELECT {} FROM authors ORDER BY family_name COLLATE \"C\"",
            AUTHOR_COLUMNS
        );
        let rows = sqlx::query_as::<_, Author>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        let query = format!("SELECT {} FROM authors WHERE id = $1", AUTHOR_COLUMNS);
        let row = sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn authors_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Author>> {
        let query = format!("SELECT {} FROM authors WHERE id = ANY($1)", AUTHOR_COLUMNS);
        let rows = sqlx::query_as::<_, Author>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert_author(&self, author: &NewAuthor) -> AppResult<Author> {
        let query = format!(
            r#"
            INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        );
        let row = sqlx::query_as::<_, Author>(&query)
            .bind(Uuid::new_v4())
            .bind(&author.first_name)
            .bind(&author.family_name)
            .bind(author.date_of_birth)
            .bind(author.date_of_death)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn count_authors(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // =========================================================================
    // BOOKS
    // =========================================================================

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        let query = format!("SELECT {} FROM books ORDER BY title COLLATE \"C\"", BOOK_COLUMNS);
        let rows = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn list_book_titles(&self) -> AppResult<Vec<BookTitle>> {
        let rows = sqlx::query_as::<_, BookTitle>(
            "SELECT id, title FROM books ORDER BY title COLLATE \"C\"",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        let query = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn books_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Book>> {
        let query = format!("SELECT {} FROM books WHERE id = ANY($1)", BOOK_COLUMNS);
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn books_by_author(&self, author: Uuid) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummary>(
            "SELECT id, title, summary FROM books WHERE author = $1",
        )
        .bind(author)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn books_by_genre(&self, genre: Uuid) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummary>(
            "SELECT id, title, summary FROM books WHERE $1 = ANY(genre)",
        )
        .bind(genre)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_book(&self, book: &NewBook) -> AppResult<Book> {
        let query = format!(
            r#"
            INSERT INTO books (id, title, author, summary, isbn, genre)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(Uuid::new_v4())
            .bind(&book.title)
            .bind(book.author)
            .bind(&book.summary)
            .bind(&book.isbn)
            .bind(&book.genre)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn count_books(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // =========================================================================
    // GENRES
    // =========================================================================

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name COLLATE \"C\"")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_genre(&self, id: Uuid) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn genres_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE name_key = $1")
            .bind(genre_name_key(name))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_genre(&self, genre: &NewGenre) -> AppResult<Genre> {
        let result = sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (id, name, name_key) VALUES ($1, $2, $3) RETURNING id, name",
        )
        .bind(Uuid::new_v4())
        .bind(&genre.name)
        .bind(genre_name_key(&genre.name))
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Conflict(
                format!("Genre \"{}\" already exists", genre.name),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn count_genres(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // =========================================================================
    // BOOK INSTANCES
    // =========================================================================

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstance>> {
        let query = format!("SELECT {} FROM book_instances", BOOK_INSTANCE_COLUMNS);
        let rows = sqlx::query_as::<_, BookInstanceRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        book_instances_from_rows(rows)
    }

    async fn get_book_instance(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        let query = format!("SELECT {} FROM book_instances WHERE id = $1", BOOK_INSTANCE_COLUMNS);
        sqlx::query_as::<_, BookInstanceRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(BookInstance::try_from)
            .transpose()
    }

    async fn book_instances_by_book(&self, book: Uuid) -> AppResult<Vec<BookInstance>> {
        let query = format!("SELECT {} FROM book_instances WHERE book = $1", BOOK_INSTANCE_COLUMNS);
        let rows = sqlx::query_as::<_, BookInstanceRow>(&query)
            .bind(book)
            .fetch_all(&self.pool)
            .await?;
        book_instances_from_rows(rows)
    }

    async fn insert_book_instance(&self, instance: &NewBookInstance) -> AppResult<BookInstance> {
        let query = format!(
            r#"
            INSERT INTO book_instances (id, book, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            BOOK_INSTANCE_COLUMNS
        );
        let row = sqlx::query_as::<_, BookInstanceRow>(&query)
            .bind(Uuid::new_v4())
            .bind(instance.book)
            .bind(&instance.imprint)
            .bind(instance.status.as_str())
            .bind(instance.due_back)
            .fetch_one(&self.pool)
            .await?;
        BookInstance::try_from(row)
    }

    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM book_instances WHERE ($1::TEXT IS NULL OR status = $1)",
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
