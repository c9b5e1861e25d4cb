//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::book::BookSummary;
use super::form::{
    format_iso_date, format_medium_date, parse_iso_date, validate_alphanumeric,
    validate_optional_iso_date, FormErrors, Invalid,
};

/// Stored author record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Display name, "family, first"
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    /// "Jan 5, 1920 - Mar 2, 1990"; either side is blank when unknown.
    pub fn lifespan(&self) -> String {
        let birth = self.date_of_birth.map(format_medium_date).unwrap_or_default();
        let death = self.date_of_death.map(format_medium_date).unwrap_or_default();
        format!("{} - {}", birth, death)
    }

    pub fn date_of_birth_yyyy_mm_dd(&self) -> String {
        self.date_of_birth.map(format_iso_date).unwrap_or_default()
    }

    pub fn date_of_death_yyyy_mm_dd(&self) -> String {
        self.date_of_death.map(format_iso_date).unwrap_or_default()
    }
}

/// Validated author, ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl NewAuthor {
    pub fn into_author(self, id: Uuid) -> Author {
        Author {
            id,
            first_name: self.first_name,
            family_name: self.family_name,
            date_of_birth: self.date_of_birth,
            date_of_death: self.date_of_death,
        }
    }
}

/// Author create form as submitted
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 100, message = "First name must be specified (up to 100 characters)."),
        custom(function = "validate_alphanumeric", message = "First name has non-alphanumeric characters.")
    )]
    pub first_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 100, message = "Family name must be specified (up to 100 characters)."),
        custom(function = "validate_alphanumeric", message = "Family name has non-alphanumeric characters.")
    )]
    pub family_name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_iso_date", message = "Invalid date of birth"))]
    pub date_of_birth: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_iso_date", message = "Invalid date of death"))]
    pub date_of_death: String,
}

const AUTHOR_FIELDS: &[&str] = &["first_name", "family_name", "date_of_birth", "date_of_death"];

impl AuthorForm {
    fn trimmed(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            family_name: self.family_name.trim().to_string(),
            date_of_birth: self.date_of_birth.trim().to_string(),
            date_of_death: self.date_of_death.trim().to_string(),
        }
    }

    /// Trim and validate; on failure the trimmed input comes back with the messages.
    pub fn validated(self) -> Result<NewAuthor, Invalid<Self>> {
        let form = self.trimmed();
        if let Err(errors) = form.validate() {
            let errors = FormErrors::from_validation(errors, AUTHOR_FIELDS);
            return Err(Invalid { form, errors });
        }

        Ok(NewAuthor {
            date_of_birth: parse_iso_date(&form.date_of_birth),
            date_of_death: parse_iso_date(&form.date_of_death),
            first_name: form.first_name,
            family_name: form.family_name,
        })
    }
}

/// Author together with the books that reference it
#[derive(Debug, Clone)]
pub struct AuthorDetail {
    pub author: Author,
    pub books: Vec<BookSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Author {
        Author {
            id: Uuid::nil(),
            first_name: "Isaac".to_string(),
            family_name: "Asimov".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1920, 1, 2),
            date_of_death: None,
        }
    }

    #[test]
    fn derived_fields() {
        let author = author();
        assert_eq!(author.name(), "Asimov, Isaac");
        assert_eq!(author.url(), format!("/catalog/author/{}", Uuid::nil()));
        assert_eq!(author.lifespan(), "Jan 2, 1920 - ");
        assert_eq!(author.date_of_birth_yyyy_mm_dd(), "1920-01-02");
        assert_eq!(author.date_of_death_yyyy_mm_dd(), "");
    }

    #[test]
    fn lifespan_without_dates() {
        let mut author = author();
        author.date_of_birth = None;
        assert_eq!(author.lifespan(), " - ");
    }

    #[test]
    fn valid_form_is_trimmed_and_parsed() {
        let form = AuthorForm {
            first_name: "  Ursula ".to_string(),
            family_name: "LeGuin".to_string(),
            date_of_birth: "1929-10-21".to_string(),
            date_of_death: String::new(),
        };
        let author = form.validated().unwrap();
        assert_eq!(author.first_name, "Ursula");
        assert_eq!(author.date_of_birth, NaiveDate::from_ymd_opt(1929, 10, 21));
        assert_eq!(author.date_of_death, None);
    }

    #[test]
    fn blank_first_name_is_rejected() {
        let form = AuthorForm {
            first_name: "   ".to_string(),
            family_name: "Herbert".to_string(),
            ..Default::default()
        };
        let invalid = form.validated().unwrap_err();
        assert_eq!(invalid.errors.len(), 1);
        assert!(invalid.errors.has_field("first_name"));
        assert_eq!(invalid.form.family_name, "Herbert");
    }

    #[test]
    fn punctuation_and_bad_dates_are_rejected() {
        let form = AuthorForm {
            first_name: "Jean-Luc".to_string(),
            family_name: "Picard".to_string(),
            date_of_birth: "next tuesday".to_string(),
            date_of_death: String::new(),
        };
        let invalid = form.validated().unwrap_err();
        let messages: Vec<&str> = invalid.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["First name has non-alphanumeric characters.", "Invalid date of birth"]
        );
    }
}
