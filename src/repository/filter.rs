//! Search predicate shared by every store.
//!
//! A term matches a book when it occurs, ignoring case, anywhere in the
//! title, the author, the genre or the year written in decimal. The same
//! substring rule applies to all four fields.

use crate::models::Book;

/// Case-insensitive substring filter over the searchable book fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    term: Option<String>,
}

impl SearchFilter {
    /// Filter matching every record
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a filter from the raw `search` parameter; blank input matches everything
    pub fn new(term: Option<&str>) -> Self {
        let term = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Self { term }
    }

    /// Trimmed term, if any
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    /// `ILIKE` pattern with `\`, `%` and `_` escaped so they match literally
    pub fn like_pattern(&self) -> Option<String> {
        let term = self.term.as_deref()?;
        let mut pattern = String::with_capacity(term.len() + 2);
        pattern.push('%');
        for c in term.chars() {
            if matches!(c, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        Some(pattern)
    }

    /// Evaluate the filter in memory
    pub fn matches(&self, book: &Book) -> bool {
        let Some(term) = self.term.as_deref() else {
            return true;
        };
        let needle = term.to_lowercase();
        let contains = |value: &str| value.to_lowercase().contains(&needle);

        contains(&book.title)
            || contains(&book.author)
            || contains(&book.genre)
            || book.year.map(|y| contains(&y.to_string())).unwrap_or(false)
    }
}
