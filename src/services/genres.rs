//! Genre service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Genre, GenreCreated, GenreDetail, NewGenre},
    repository::Repository,
};

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.list_genres().await
    }

    /// Genre and the books filed under it, fetched together
    pub async fn detail(&self, id: Uuid) -> AppResult<GenreDetail> {
        let (genre, books) = tokio::try_join!(
            self.repository.get_genre(id),
            self.repository.books_by_genre(id),
        )?;

        let genre = genre.ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
        Ok(GenreDetail { genre, books })
    }

    /// Store a genre unless one with the same name (ignoring case) exists.
    pub async fn create(&self, genre: NewGenre) -> AppResult<GenreCreated> {
        if let Some(existing) = self.repository.find_genre_by_name(&genre.name).await? {
            tracing::info!(
                "Genre \"{}\" already exists as \"{}\" ({})",
                genre.name,
                existing.name,
                existing.id
            );
            return Ok(GenreCreated::Existing(existing));
        }

        match self.repository.insert_genre(&genre).await {
            Ok(created) => {
                tracing::info!("Created genre \"{}\" ({})", created.name, created.id);
                Ok(GenreCreated::Inserted(created))
            }
            // Another request stored the same name between lookup and insert
            Err(AppError::Conflict(msg)) => {
                tracing::info!("{}", msg);
                self.repository
                    .find_genre_by_name(&genre.name)
                    .await?
                    .map(GenreCreated::Existing)
                    .ok_or(AppError::Conflict(msg))
            }
            Err(e) => Err(e),
        }
    }
}
