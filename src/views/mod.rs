//! HTML views
//!
//! Pages are rendered with `maud`; every interpolated value is escaped.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod home;

use axum::response::Html;
use maud::{html, Markup, DOCTYPE};

use crate::{error::ErrorPage, models::FormErrors};

/// A rendered page, ready to be returned from a handler
pub type Page = Html<String>;

const NAV: &[(&str, &str)] = &[
    ("/catalog", "Home"),
    ("/catalog/books", "All books"),
    ("/catalog/authors", "All authors"),
    ("/catalog/genres", "All genres"),
    ("/catalog/bookinstances", "All book-instances"),
];

const CREATE_NAV: &[(&str, &str)] = &[
    ("/catalog/author/create", "Create new author"),
    ("/catalog/genre/create", "Create new genre"),
    ("/catalog/book/create", "Create new book"),
    ("/catalog/bookinstance/create", "Create new book instance (copy)"),
];

/// Common page shell with the sidebar navigation
pub fn layout(title: &str, content: Markup) -> Page {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Local Library" }
            }
            body {
                div.container-fluid {
                    div.row {
                        nav."col-sm-2" {
                            ul.sidebar-nav {
                                @for (href, label) in NAV {
                                    li { a href=(href) { (label) } }
                                }
                                li { hr; }
                                @for (href, label) in CREATE_NAV {
                                    li { a href=(href) { (label) } }
                                }
                            }
                        }
                        main."col-sm-10" {
                            h1 { (title) }
                            (content)
                        }
                    }
                }
            }
        }
    };
    Html(markup.into_string())
}

/// Generic error page. `detail` is only shown when asked for.
pub fn error_page(page: &ErrorPage, show_detail: bool) -> Page {
    layout(
        "Error",
        html! {
            p.error-message { (page.message) }
            p.error-status { "Status " (page.status.as_u16()) }
            @if show_detail {
                pre.error-detail { (page.detail) }
            }
        },
    )
}

/// Messages for a rejected form
pub(crate) fn form_errors(errors: &FormErrors) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul.errors {
                @for error in errors.iter() {
                    li data-field=(error.field) { (error.message) }
                }
            }
        }
    }
}
