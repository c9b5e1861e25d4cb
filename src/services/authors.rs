//! Author service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorDetail, NewAuthor},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.list_authors().await
    }

    /// Author and the books written by them, fetched together
    pub async fn detail(&self, id: Uuid) -> AppResult<AuthorDetail> {
        let (author, books) = tokio::try_join!(
            self.repository.get_author(id),
            self.repository.books_by_author(id),
        )?;

        let author = author.ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        Ok(AuthorDetail { author, books })
    }

    pub async fn create(&self, author: NewAuthor) -> AppResult<Author> {
        let created = self.repository.insert_author(&author).await?;
        tracing::info!("Created author {} ({})", created.name(), created.id);
        Ok(created)
    }
}
