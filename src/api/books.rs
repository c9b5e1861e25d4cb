//! Book endpoints, including the catalog home page

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, FormRejection};

use super::{not_implemented, parse_id, redirect_found};
use crate::{
    error::AppResult,
    models::{BookForm, FormErrors},
    views::{self, Page},
    AppState,
};

/// Home page with record counts
pub async fn index(State(state): State<AppState>) -> AppResult<Page> {
    let counts = state.services.books.counts().await?;
    Ok(views::home::index(&counts))
}

/// All books, sorted by title
pub async fn list_books(State(state): State<AppState>) -> AppResult<Page> {
    let books = state.services.books.list().await?;
    Ok(views::books::list(&books))
}

/// Book with author, genres and copies
pub async fn get_book(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page> {
    let id = parse_id(&id, "Book")?;
    let detail = state.services.books.detail(id).await?;
    Ok(views::books::detail(&detail))
}

pub async fn create_book_form(State(state): State<AppState>) -> AppResult<Page> {
    let options = state.services.books.form_options().await?;
    Ok(views::books::form(
        &options,
        &BookForm::default(),
        &FormErrors::default(),
    ))
}

/// Store a valid book and redirect to it; an invalid submission gets the
/// form back with fresh author and genre choices.
pub async fn create_book(
    State(state): State<AppState>,
    form: Result<Form<BookForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(form) = form?;
    let book = match form.validated() {
        Ok(book) => book,
        Err(invalid) => {
            tracing::debug!("Book form rejected: {} error(s)", invalid.errors.len());
            let options = state.services.books.form_options().await?;
            return Ok(views::books::form(&options, &invalid.form, &invalid.errors).into_response());
        }
    };

    let book = state.services.books.create(book).await?;
    Ok(redirect_found(&book.url()))
}

pub async fn delete_book_form(Path(id): Path<String>) -> String {
    not_implemented("Book delete GET", &id)
}

pub async fn delete_book(Path(id): Path<String>) -> String {
    not_implemented("Book delete POST", &id)
}

pub async fn update_book_form(Path(id): Path<String>) -> String {
    not_implemented("Book update GET", &id)
}

pub async fn update_book(Path(id): Path<String>) -> String {
    not_implemented("Book update POST", &id)
}
