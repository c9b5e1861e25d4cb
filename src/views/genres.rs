//! Genre pages

use maud::html;

use super::{form_errors, layout, Page};
use crate::models::{FormErrors, Genre, GenreDetail, GenreForm};

pub fn list(genres: &[Genre]) -> Page {
    layout(
        "Genre List",
        html! {
            @if genres.is_empty() {
                p { "There are no genres." }
            } @else {
                ul.genre-list {
                    @for genre in genres {
                        li { a href=(genre.url()) { (genre.name) } }
                    }
                }
            }
        },
    )
}

pub fn detail(detail: &GenreDetail) -> Page {
    layout(
        &format!("Genre: {}", detail.genre.name),
        html! {
            div.genre-books {
                h4 { "Books" }
                @if detail.books.is_empty() {
                    p { "This genre has no books." }
                } @else {
                    dl {
                        @for book in &detail.books {
                            dt { a href=(book.url()) { (book.title) } }
                            dd { (book.summary) }
                        }
                    }
                }
            }
        },
    )
}

pub fn form(form: &GenreForm, errors: &FormErrors) -> Page {
    layout(
        "Create Genre",
        html! {
            form method="POST" action="" {
                div.form-group {
                    label for="name" { "Genre:" }
                    input #name type="text" name="name" placeholder="Fantasy, Poetry etc."
                        required value=(form.name);
                }
                button type="submit" { "Submit" }
            }
            (form_errors(errors))
        },
    )
}
