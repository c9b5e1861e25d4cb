//! Book instance (copy) endpoints

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, FormRejection};

use super::{not_implemented, parse_id, redirect_found};
use crate::{
    error::AppResult,
    models::{BookInstanceForm, FormErrors},
    views::{self, Page},
    AppState,
};

/// All copies, each with its book
pub async fn list_book_instances(State(state): State<AppState>) -> AppResult<Page> {
    let instances = state.services.book_instances.list().await?;
    Ok(views::book_instances::list(&instances))
}

pub async fn get_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page> {
    let id = parse_id(&id, "Book copy")?;
    let entry = state.services.book_instances.detail(id).await?;
    Ok(views::book_instances::detail(&entry))
}

pub async fn create_book_instance_form(State(state): State<AppState>) -> AppResult<Page> {
    let options = state.services.book_instances.form_options().await?;
    Ok(views::book_instances::form(
        &options,
        &BookInstanceForm::default(),
        &FormErrors::default(),
    ))
}

pub async fn create_book_instance(
    State(state): State<AppState>,
    form: Result<Form<BookInstanceForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(form) = form?;
    let instance = match form.validated() {
        Ok(instance) => instance,
        Err(invalid) => {
            let options = state.services.book_instances.form_options().await?;
            return Ok(
                views::book_instances::form(&options, &invalid.form, &invalid.errors)
                    .into_response(),
            );
        }
    };

    let instance = state.services.book_instances.create(instance).await?;
    Ok(redirect_found(&instance.url()))
}

pub async fn delete_book_instance_form(Path(id): Path<String>) -> String {
    not_implemented("BookInstance delete GET", &id)
}

pub async fn delete_book_instance(Path(id): Path<String>) -> String {
    not_implemented("BookInstance delete POST", &id)
}

pub async fn update_book_instance_form(Path(id): Path<String>) -> String {
    not_implemented("BookInstance update GET", &id)
}

pub async fn update_book_instance(Path(id): Path<String>) -> String {
    not_implemented("BookInstance update POST", &id)
}
