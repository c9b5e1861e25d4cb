//! Author pages

use maud::html;

use super::{form_errors, layout, Page};
use crate::models::{Author, AuthorDetail, AuthorForm, FormErrors};

pub fn list(authors: &[Author]) -> Page {
    layout(
        "Author List",
        html! {
            @if authors.is_empty() {
                p { "There are no authors." }
            } @else {
                ul.author-list {
                    @for author in authors {
                        li {
                            a href=(author.url()) { (author.name()) }
                            " (" (author.lifespan()) ")"
                        }
                    }
                }
            }
        },
    )
}

pub fn detail(detail: &AuthorDetail) -> Page {
    let author = &detail.author;
    layout(
        &format!("Author: {}", author.name()),
        html! {
            p.lifespan { (author.lifespan()) }
            div.author-books {
                h4 { "Books" }
                @if detail.books.is_empty() {
                    p { "This author has no books." }
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

/// Create form, empty or re-filled after a rejected submission
pub fn form(form: &AuthorForm, errors: &FormErrors) -> Page {
    layout(
        "Create Author",
        html! {
            form method="POST" action="" {
                div.form-group {
                    label for="first_name" { "First Name:" }
                    input #first_name type="text" name="first_name" placeholder="First name"
                        required value=(form.first_name);
                    label for="family_name" { "Family Name:" }
                    input #family_name type="text" name="family_name" placeholder="Family name"
                        required value=(form.family_name);
                }
                div.form-group {
                    label for="date_of_birth" { "Date of birth:" }
                    input #date_of_birth type="date" name="date_of_birth" value=(form.date_of_birth);
                }
                div.form-group {
                    label for="date_of_death" { "Date of death:" }
                    input #date_of_death type="date" name="date_of_death" value=(form.date_of_death);
                }
                button type="submit" { "Submit" }
            }
            (form_errors(errors))
        },
    )
}
