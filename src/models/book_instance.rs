//! Book instance (physical copy) model and related types

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::book::{Book, BookTitle};
use super::form::{
    format_iso_date, format_medium_date, parse_iso_date, parse_record_id,
    validate_optional_iso_date, FormErrors, Invalid,
};

/// Lending status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookInstanceStatus {
    Available,
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Available,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl Default for BookInstanceStatus {
    fn default() -> Self {
        BookInstanceStatus::Maintenance
    }
}

impl std::fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookInstanceStatus {
    type Err = String;

    /// Exact match only; status values are stored verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(BookInstanceStatus::Available),
            "Maintenance" => Ok(BookInstanceStatus::Maintenance),
            "Loaned" => Ok(BookInstanceStatus::Loaned),
            "Reserved" => Ok(BookInstanceStatus::Reserved),
            other => Err(format!("Unknown book instance status: {}", other)),
        }
    }
}

/// Stored copy record. `book` holds the id of a Book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInstance {
    pub id: Uuid,
    pub book: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: NaiveDate,
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        format_medium_date(self.due_back)
    }

    pub fn due_back_iso(&self) -> String {
        format_iso_date(self.due_back)
    }

    /// Value for an `<input type="date">`
    pub fn due_back_yyyy_mm_dd(&self) -> String {
        format_iso_date(self.due_back)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookInstance {
    pub book: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: NaiveDate,
}

impl NewBookInstance {
    pub fn into_book_instance(self, id: Uuid) -> BookInstance {
        BookInstance {
            id,
            book: self.book,
            imprint: self.imprint,
            status: self.status,
            due_back: self.due_back,
        }
    }
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.parse::<BookInstanceStatus>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("status"))
    }
}

/// Copy create form as submitted
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookInstanceForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Book must be specified"))]
    pub book: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    #[serde(default)]
    #[validate(custom(function = "validate_status", message = "Invalid status"))]
    pub status: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_iso_date", message = "Invalid date"))]
    pub due_back: String,
}

const BOOK_INSTANCE_FIELDS: &[&str] = &["book", "imprint", "status", "due_back"];

impl BookInstanceForm {
    fn trimmed(self) -> Self {
        Self {
            book: self.book.trim().to_string(),
            imprint: self.imprint.trim().to_string(),
            status: self.status.trim().to_string(),
            due_back: self.due_back.trim().to_string(),
        }
    }

    /// Status to pre-select when the form is shown again
    pub fn selected_status(&self) -> BookInstanceStatus {
        self.status.parse().unwrap_or_default()
    }

    /// Empty status falls back to Maintenance, empty due date to today.
    pub fn validated(self) -> Result<NewBookInstance, Invalid<Self>> {
        let form = self.trimmed();
        let mut errors = match form.validate() {
            Ok(()) => FormErrors::default(),
            Err(errors) => FormErrors::from_validation(errors, BOOK_INSTANCE_FIELDS),
        };
        let book = parse_record_id(
            &form.book,
            "book",
            "Book must be chosen from the list",
            &mut errors,
            BOOK_INSTANCE_FIELDS,
        );

        let book = match book {
            Some(book) if errors.is_empty() => book,
            _ => return Err(Invalid { form, errors }),
        };

        Ok(NewBookInstance {
            book,
            status: form.selected_status(),
            due_back: parse_iso_date(&form.due_back).unwrap_or_else(|| Local::now().date_naive()),
            imprint: form.imprint,
        })
    }
}

/// Copy with its book resolved
#[derive(Debug, Clone)]
pub struct BookInstanceWithBook {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

/// Choices offered by the copy form
#[derive(Debug, Clone, Default)]
pub struct BookInstanceFormOptions {
    pub books: Vec<BookTitle>,
}
