//! HTML views rendered from the templates in `templates/`

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    models::book::{Book, BookForm, FieldError},
    pagination::Page,
};

/// Listing and search results
#[derive(Template)]
#[template(path = "index.html")]
pub struct BookListView<'a> {
    pub books: &'a [Book],
    pub page: i64,
    pub page_count: i64,
    pub total: i64,
    /// Term the results were filtered with, when coming from the search route
    pub search: Option<&'a str>,
}

impl<'a> BookListView<'a> {
    pub fn new(page: &'a Page<Book>, search: Option<&'a str>) -> Self {
        Self {
            books: &page.items,
            page: page.page,
            page_count: page.page_count,
            total: page.total,
            search,
        }
    }
}

#[derive(Template)]
#[template(path = "new-book.html")]
pub struct NewBookView<'a> {
    pub book: &'a BookForm,
    pub errors: &'a [FieldError],
}

#[derive(Template)]
#[template(path = "update-book.html")]
pub struct UpdateBookView<'a> {
    pub id: i32,
    pub book: &'a BookForm,
    pub errors: &'a [FieldError],
}

#[derive(Template)]
#[template(path = "page-not-found.html")]
pub struct PageNotFoundView<'a> {
    pub message: &'a str,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorView<'a> {
    pub status: u16,
    pub message: &'a str,
}

/// Render a view into an HTML response with the given status
pub fn render<T: Template>(status: StatusCode, view: &T) -> Response {
    match view.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}
