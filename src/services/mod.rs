//! Catalog services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub genres: genres::GenresService,
    pub book_instances: book_instances::BookInstancesService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            book_instances: book_instances::BookInstancesService::new(repository),
        }
    }
}

/// Distinct ids in first-seen order, for populating references
fn distinct_ids(ids: impl IntoIterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// Fetched records keyed by id
fn index_by_id<T>(records: Vec<T>, id: impl Fn(&T) -> Uuid) -> HashMap<Uuid, T> {
    records.into_iter().map(|record| (id(&record), record)).collect()
}
