//! Book pages

use maud::{html, Markup};

use super::{form_errors, layout, Page};
use crate::models::{
    BookDetail, BookForm, BookFormOptions, BookInstance, BookInstanceStatus, BookWithAuthor,
    FormErrors,
};

pub fn list(books: &[BookWithAuthor]) -> Page {
    layout(
        "Book List",
        html! {
            @if books.is_empty() {
                p { "There are no books." }
            } @else {
                ul.book-list {
                    @for entry in books {
                        li {
                            a href=(entry.book.url()) { (entry.book.title) }
                            @if let Some(author) = &entry.author {
                                " (" (author.name()) ")"
                            }
                        }
                    }
                }
            }
        },
    )
}

pub(crate) fn status_class(status: BookInstanceStatus) -> &'static str {
    match status {
        BookInstanceStatus::Available => "text-success",
        BookInstanceStatus::Maintenance => "text-danger",
        BookInstanceStatus::Loaned | BookInstanceStatus::Reserved => "text-warning",
    }
}

fn copy_entry(instance: &BookInstance) -> Markup {
    html! {
        hr;
        p class=(status_class(instance.status)) { (instance.status.as_str()) }
        p { strong { "Imprint: " } (instance.imprint) }
        @if instance.status != BookInstanceStatus::Available {
            p { strong { "Due back: " } (instance.due_back_formatted()) }
        }
        p { strong { "Id: " } a href=(instance.url()) { (instance.id.to_string()) } }
    }
}

pub fn detail(detail: &BookDetail) -> Page {
    let book = &detail.book;
    layout(
        &format!("Title: {}", book.title),
        html! {
            p {
                strong { "Author: " }
                @if let Some(author) = &detail.author {
                    a href=(author.url()) { (author.name()) }
                }
            }
            p { strong { "Summary: " } (book.summary) }
            p { strong { "ISBN: " } (book.isbn) }
            p {
                strong { "Genre: " }
                @for (i, genre) in detail.genres.iter().enumerate() {
                    @if i > 0 { ", " }
                    a href=(genre.url()) { (genre.name) }
                }
            }
            div.book-copies {
                h4 { "Copies" }
                @if detail.instances.is_empty() {
                    p { "There are no copies of this book in the library." }
                } @else {
                    @for instance in &detail.instances {
                        (copy_entry(instance))
                    }
                }
            }
        },
    )
}

/// Create form. Author and genre choices come from `options`; the
/// submitted author is pre-selected and submitted genres are ticked.
pub fn form(options: &BookFormOptions, form: &BookForm, errors: &FormErrors) -> Page {
    layout(
        "Create Book",
        html! {
            form method="POST" action="" {
                div.form-group {
                    label for="title" { "Title:" }
                    input #title type="text" name="title" placeholder="Name of book"
                        required value=(form.title);
                }
                div.form-group {
                    label for="author" { "Author:" }
                    select #author name="author" required {
                        option value="" { "--Please select an author--" }
                        @for author in &options.authors {
                            @let id = author.id.to_string();
                            option value=(id) selected[form.author == id] { (author.name()) }
                        }
                    }
                }
                div.form-group {
                    label for="summary" { "Summary:" }
                    textarea #summary name="summary" placeholder="Summary" required { (form.summary) }
                }
                div.form-group {
                    label for="isbn" { "ISBN:" }
                    input #isbn type="text" name="isbn" placeholder="ISBN13" required value=(form.isbn);
                }
                div.form-group {
                    label { "Genre:" }
                    div {
                        @for genre in &options.genres {
                            @let id = genre.id.to_string();
                            div.genre-choice {
                                input type="checkbox" name="genre" id=(id) value=(id)
                                    checked[form.has_genre(genre.id)];
                                label for=(id) { (genre.name) }
                            }
                        }
                    }
                }
                button type="submit" { "Submit" }
            }
            (form_errors(errors))
        },
    )
}
