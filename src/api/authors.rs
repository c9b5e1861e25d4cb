//! Author endpoints

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, FormRejection};

use super::{not_implemented, parse_id, redirect_found};
use crate::{
    error::AppResult,
    models::{AuthorForm, FormErrors},
    views::{self, Page},
    AppState,
};

/// All authors, sorted by family name
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Page> {
    let authors = state.services.authors.list().await?;
    Ok(views::authors::list(&authors))
}

/// Author with their books
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page> {
    let id = parse_id(&id, "Author")?;
    let detail = state.services.authors.detail(id).await?;
    Ok(views::authors::detail(&detail))
}

pub async fn create_author_form() -> Page {
    views::authors::form(&AuthorForm::default(), &FormErrors::default())
}

/// Store a valid author and redirect to it, or re-render the form with its errors
pub async fn create_author(
    State(state): State<AppState>,
    form: Result<Form<AuthorForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(form) = form?;
    let author = match form.validated() {
        Ok(author) => author,
        Err(invalid) => {
            tracing::debug!("Author form rejected: {} error(s)", invalid.errors.len());
            return Ok(views::authors::form(&invalid.form, &invalid.errors).into_response());
        }
    };

    let author = state.services.authors.create(author).await?;
    Ok(redirect_found(&author.url()))
}

pub async fn delete_author_form(Path(id): Path<String>) -> String {
    not_implemented("Author delete GET", &id)
}

pub async fn delete_author(Path(id): Path<String>) -> String {
    not_implemented("Author delete POST", &id)
}

pub async fn update_author_form(Path(id): Path<String>) -> String {
    not_implemented("Author update GET", &id)
}

pub async fn update_author(Path(id): Path<String>) -> String {
    not_implemented("Author update POST", &id)
}
