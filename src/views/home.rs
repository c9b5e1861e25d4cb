use maud::html;

use super::{layout, Page};
use crate::models::CatalogCounts;

pub fn index(counts: &CatalogCounts) -> Page {
    layout(
        "Local Library Home",
        html! {
            p {
                "Welcome to " em { "Local Library" } ", a very basic catalog of the library's books."
            }
            h2 { "Dynamic content" }
            p { "The library has the following record counts:" }
            ul.counts {
                li { strong { "Books: " } span #book-count { (counts.books) } }
                li { strong { "Copies: " } span #book-instance-count { (counts.book_instances) } }
                li {
                    strong { "Copies available: " }
                    span #book-instance-available-count { (counts.book_instances_available) }
                }
                li { strong { "Authors: " } span #author-count { (counts.authors) } }
                li { strong { "Genres: " } span #genre-count { (counts.genres) } }
            }
        },
    )
}
