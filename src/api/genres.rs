//! Genre endpoints

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, FormRejection};

use super::{not_implemented, parse_id, redirect_found};
use crate::{
    error::AppResult,
    models::{FormErrors, GenreForm},
    views::{self, Page},
    AppState,
};

/// All genres, sorted by name
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Page> {
    let genres = state.services.genres.list().await?;
    Ok(views::genres::list(&genres))
}

/// Genre with the books carrying it
pub async fn get_genre(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page> {
    let id = parse_id(&id, "Genre")?;
    let detail = state.services.genres.detail(id).await?;
    Ok(views::genres::detail(&detail))
}

pub async fn create_genre_form() -> Page {
    views::genres::form(&GenreForm::default(), &FormErrors::default())
}

/// Store a new genre, or redirect to the existing genre of the same name
pub async fn create_genre(
    State(state): State<AppState>,
    form: Result<Form<GenreForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(form) = form?;
    let genre = match form.validated() {
        Ok(genre) => genre,
        Err(invalid) => {
            return Ok(views::genres::form(&invalid.form, &invalid.errors).into_response());
        }
    };

    let created = state.services.genres.create(genre).await?;
    Ok(redirect_found(&created.genre().url()))
}

pub async fn delete_genre_form(Path(id): Path<String>) -> String {
    not_implemented("Genre delete GET", &id)
}

pub async fn delete_genre(Path(id): Path<String>) -> String {
    not_implemented("Genre delete POST", &id)
}

pub async fn update_genre_form(Path(id): Path<String>) -> String {
    not_implemented("Genre update GET", &id)
}

pub async fn update_genre(Path(id): Path<String>) -> String {
    not_implemented("Genre update POST", &id)
}
