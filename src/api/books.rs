//! Book catalog pages.
//!
//! Handlers keep no state between requests: the page number and search term
//! come from the current query string only. Validation failures re-render
//! the submitted form; every other failure escapes as an [`AppError`] and
//! ends on the not-found page.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    api::{FormBody, LenientQuery},
    error::{AppError, AppResult},
    models::book::BookForm,
    pagination::{parse_page, PageQuery},
    views::{render, BookListView, NewBookView, UpdateBookView},
    AppState,
};

/// Listing route every successful write returns to
pub const BOOKS_ROUTE: &str = "/books";

/// Query string of the search route
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub page: Option<String>,
    pub search: Option<String>,
}

fn parse_id(raw: &str) -> AppResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::NotFound(format!("Book {} not found", raw)))
}

/// `GET /`
pub async fn home() -> Redirect {
    Redirect::to(BOOKS_ROUTE)
}

/// `GET /books`
pub async fn list_books(
    State(state): State<AppState>,
    LenientQuery(query): LenientQuery<PageQuery>,
) -> AppResult<Response> {
    let page = state.services.catalog.list_books(query.page_number()).await?;
    Ok(render(StatusCode::OK, &BookListView::new(&page, None)))
}

/// `GET /books/search`
pub async fn search_books(
    State(state): State<AppState>,
    LenientQuery(query): LenientQuery<SearchQuery>,
) -> AppResult<Response> {
    let term = query.search.as_deref().unwrap_or_default();
    let page = state
        .services
        .catalog
        .search_books(parse_page(query.page.as_deref()), Some(term))
        .await?;
    Ok(render(StatusCode::OK, &BookListView::new(&page, Some(term))))
}

/// `GET /books/new`
pub async fn new_book_form() -> Response {
    render(
        StatusCode::OK,
        &NewBookView {
            book: &BookForm::default(),
            errors: &[],
        },
    )
}

/// `POST /books/new`
pub async fn create_book(
    State(state): State<AppState>,
    FormBody(form): FormBody<BookForm>,
) -> AppResult<Response> {
    match state.services.catalog.create_book(&form).await {
        Ok(_) => Ok(Redirect::to(BOOKS_ROUTE).into_response()),
        Err(AppError::Validation(errors)) => {
            tracing::debug!("Rejected new book: {} violation(s)", errors.len());
            Ok(render(
                StatusCode::OK,
                &NewBookView {
                    book: &form,
                    errors: &errors,
                },
            ))
        }
        Err(e) => Err(e),
    }
}

/// `GET /books/:id`
pub async fn edit_book_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let book = state.services.catalog.get_book(id).await?;
    Ok(render(
        StatusCode::OK,
        &UpdateBookView {
            id,
            book: &BookForm::from(&book),
            errors: &[],
        },
    ))
}

/// `POST /books/:id`
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormBody(form): FormBody<BookForm>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    match state.services.catalog.update_book(id, &form).await {
        Ok(_) => Ok(Redirect::to(BOOKS_ROUTE).into_response()),
        Err(AppError::Validation(errors)) => {
            tracing::debug!("Rejected update of book id={}: {} violation(s)", id, errors.len());
            Ok(render(
                StatusCode::OK,
                &UpdateBookView {
                    id,
                    book: &form,
                    errors: &errors,
                },
            ))
        }
        Err(e) => Err(e),
    }
}

/// `POST /books/:id/delete`
///
/// Deleting a record that is already gone is a no-op.
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    let id = parse_id(&id)?;
    match state.services.catalog.delete_book(id).await {
        Ok(()) => Ok(Redirect::to(BOOKS_ROUTE)),
        Err(AppError::NotFound(msg)) => {
            tracing::debug!("Nothing to delete: {}", msg);
            Ok(Redirect::to(BOOKS_ROUTE))
        }
        Err(e) => Err(e),
    }
}
