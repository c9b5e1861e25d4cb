//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;
use validator::Validate;

use super::book::BookSummary;
use super::form::{FormErrors, Invalid};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

/// Key under which two genre names count as the same genre.
///
/// Case is ignored; composed and decomposed accents compare equal.
pub fn genre_name_key(name: &str) -> String {
    name.trim().nfc().collect::<String>().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGenre {
    pub name: String,
}

impl NewGenre {
    pub fn into_genre(self, id: Uuid) -> Genre {
        Genre { id, name: self.name }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(length(
        min = 3,
        max = 100,
        message = "Genre name must contain at least 3 characters (up to 100)."
    ))]
    pub name: String,
}

impl GenreForm {
    pub fn validated(self) -> Result<NewGenre, Invalid<Self>> {
        let form = Self {
            name: self.name.trim().to_string(),
        };
        match form.validate() {
            Ok(()) => Ok(NewGenre { name: form.name }),
            Err(errors) => {
                let errors = FormErrors::from_validation(errors, &["name"]);
                Err(Invalid { form, errors })
            }
        }
    }
}

/// Outcome of a genre create request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreCreated {
    /// A new record was stored
    Inserted(Genre),
    /// A genre with the same name already existed; nothing was stored
    Existing(Genre),
}

impl GenreCreated {
    pub fn genre(&self) -> &Genre {
        match self {
            GenreCreated::Inserted(genre) | GenreCreated::Existing(genre) => genre,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenreDetail {
    pub genre: Genre,
    pub books: Vec<BookSummary>,
}
