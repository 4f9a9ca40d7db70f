//! Book model and record schema.
//!
//! A submitted form ([`BookForm`]) is never written as-is: it goes through
//! [`BookForm::validate`], which either yields a [`BookDraft`] ready for
//! persistence or the list of per-field violations.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

/// Genre stored when none was submitted
pub const DEFAULT_GENRE: &str = "Other";

/// Book record as stored in the `books` table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: String,
    /// Publication year
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single schema violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Form body submitted by the creation and edit views.
///
/// Every field is kept as text so the form can be rendered again exactly as
/// the user typed it when validation fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
}

/// Candidate record that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: Option<i32>,
}

#[derive(Debug, Validate)]
struct RequiredFields {
    #[validate(
        required(message = "Please provide the title of the book."),
        length(min = 1, message = "Title is required.")
    )]
    title: Option<String>,
    #[validate(
        required(message = "Please provide the author name of the book."),
        length(min = 1, message = "Author name is required.")
    )]
    author: Option<String>,
}

/// Field order used when reporting violations
const CHECKED_FIELDS: [&str; 2] = ["title", "author"];

fn trimmed(value: &Option<String>) -> Option<String> {
    value.as_deref().map(|v| v.trim().to_string())
}

fn collect_violations(errors: &ValidationErrors) -> Vec<FieldError> {
    let field_errors = errors.field_errors();
    CHECKED_FIELDS
        .iter()
        .filter_map(|field| {
            let first = field_errors.get(*field).and_then(|list| list.first())?;
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid.", field));
            Some(FieldError::new(*field, message))
        })
        .collect()
}

impl BookForm {
    /// Check the form against the record schema.
    ///
    /// `title` and `author` must be present and non-blank; `genre` falls back
    /// to [`DEFAULT_GENRE`]; `year` is left unset when blank and must
    /// otherwise be a whole number.
    pub fn validate(&self) -> Result<BookDraft, Vec<FieldError>> {
        let required = RequiredFields {
            title: trimmed(&self.title),
            author: trimmed(&self.author),
        };

        let mut violations = match required.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => collect_violations(&errors),
        };

        let year = match trimmed(&self.year).filter(|y| !y.is_empty()) {
            None => None,
            Some(text) => match text.parse::<i32>() {
                Ok(year) => Some(year),
                Err(_) => {
                    violations.push(FieldError::new("year", "Year must be a whole number."));
                    None
                }
            },
        };

        if !violations.is_empty() {
            return Err(violations);
        }

        let genre = trimmed(&self.genre)
            .filter(|g| !g.is_empty())
            .unwrap_or_else(|| DEFAULT_GENRE.to_string());

        Ok(BookDraft {
            title: required.title.unwrap_or_default(),
            author: required.author.unwrap_or_default(),
            genre,
            year,
        })
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: Some(book.title.clone()),
            author: Some(book.author.clone()),
            genre: Some(book.genre.clone()),
            year: book.year.map(|y| y.to_string()),
        }
    }
}
