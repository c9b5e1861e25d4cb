//! Book instance (copy) service

use uuid::Uuid;

use super::{distinct_ids, index_by_id};
use crate::{
    error::{AppError, AppResult},
    models::{BookInstance, BookInstanceFormOptions, BookInstanceWithBook, NewBookInstance},
    repository::Repository,
};

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All copies, each with its book resolved
    pub async fn list(&self) -> AppResult<Vec<BookInstanceWithBook>> {
        let instances = self.repository.list_book_instances().await?;
        let book_ids = distinct_ids(instances.iter().map(|i| i.book));
        let books = index_by_id(self.repository.books_by_ids(&book_ids).await?, |b| b.id);

        Ok(instances
            .into_iter()
            .map(|instance| {
                let book = books.get(&instance.book).cloned();
                BookInstanceWithBook { instance, book }
            })
            .collect())
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookInstanceWithBook> {
        let instance = self
            .repository
            .get_book_instance(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
        let book = self.repository.get_book(instance.book).await?;
        Ok(BookInstanceWithBook { instance, book })
    }

    /// Book titles for the copy form's dropdown
    pub async fn form_options(&self) -> AppResult<BookInstanceFormOptions> {
        let books = self.repository.list_book_titles().await?;
        Ok(BookInstanceFormOptions { books })
    }

    pub async fn create(&self, instance: NewBookInstance) -> AppResult<BookInstance> {
        let created = self.repository.insert_book_instance(&instance).await?;
        tracing::info!(
            "Created copy {} of book {} ({})",
            created.id,
            created.book,
            created.status
        );
        Ok(created)
    }
}
