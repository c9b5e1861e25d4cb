//! Book instance (copy) pages

use maud::html;

use super::{books::status_class, form_errors, layout, Page};
use crate::models::{
    BookInstanceForm, BookInstanceFormOptions, BookInstanceStatus, BookInstanceWithBook, FormErrors,
};

pub fn list(instances: &[BookInstanceWithBook]) -> Page {
    layout(
        "Book Instance List",
        html! {
            @if instances.is_empty() {
                p { "There are no book copies in this library." }
            } @else {
                ul.bookinstance-list {
                    @for entry in instances {
                        @let instance = &entry.instance;
                        li {
                            a href=(instance.url()) {
                                @match &entry.book {
                                    Some(book) => { (book.title) }
                                    None => { "(unknown book)" }
                                }
                                " : " (instance.imprint)
                            }
                            " - "
                            span class=(status_class(instance.status)) { (instance.status.as_str()) }
                            @if instance.status != BookInstanceStatus::Available {
                                span { " (Due: " (instance.due_back_formatted()) " )" }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn detail(entry: &BookInstanceWithBook) -> Page {
    let instance = &entry.instance;
    layout(
        &format!("ID: {}", instance.id),
        html! {
            p {
                strong { "Title: " }
                @if let Some(book) = &entry.book {
                    a href=(book.url()) { (book.title) }
                }
            }
            p { strong { "Imprint: " } (instance.imprint) }
            p {
                strong { "Status: " }
                span class=(status_class(instance.status)) { (instance.status.as_str()) }
            }
            @if instance.status != BookInstanceStatus::Available {
                p {
                    strong { "Due back: " }
                    time datetime=(instance.due_back_iso()) { (instance.due_back_formatted()) }
                }
            }
        },
    )
}

/// Create form; the submitted book and status stay selected on re-render.
pub fn form(options: &BookInstanceFormOptions, form: &BookInstanceForm, errors: &FormErrors) -> Page {
    let selected_status = form.selected_status();
    layout(
        "Create BookInstance",
        html! {
            form method="POST" action="" {
                div.form-group {
                    label for="book" { "Book:" }
                    select #book name="book" required {
                        option value="" { "--Please select a book--" }
                        @for book in &options.books {
                            @let id = book.id.to_string();
                            option value=(id) selected[form.book == id] { (book.title) }
                        }
                    }
                }
                div.form-group {
                    label for="imprint" { "Imprint:" }
                    input #imprint type="text" name="imprint" placeholder="Publisher and date information"
                        required value=(form.imprint);
                }
                div.form-group {
                    label for="due_back" { "Date when book available:" }
                    input #due_back type="date" name="due_back" value=(form.due_back);
                }
                div.form-group {
                    label for="status" { "Status:" }
                    select #status name="status" required {
                        @for status in BookInstanceStatus::ALL {
                            option value=(status.as_str()) selected[status == selected_status] {
                                (status.as_str())
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
