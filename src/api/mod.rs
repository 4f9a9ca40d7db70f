//! HTTP handlers and router for the catalog

pub mod books;
pub mod errors;
pub mod health;

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    routing::{get, post},
    Form, Router,
};
use serde::de::DeserializeOwned;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::{error::AppError, AppState};

/// Query string extractor that never rejects.
///
/// A query string that cannot be decoded (duplicate keys, for instance) is
/// treated as if no parameters were given.
pub struct LenientQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for LenientQuery<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(LenientQuery(value)),
            Err(rejection) => {
                tracing::debug!("Ignoring malformed query string: {}", rejection.body_text());
                Ok(LenientQuery(T::default()))
            }
        }
    }
}

/// Form body extractor whose rejection goes through [`AppError`]
pub struct FormBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for FormBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(FormBody(value))
    }
}

/// Create the application router with all routes.
///
/// A known path requested with the wrong method is answered like an unknown
/// path.
pub fn create_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        .route("/", get(books::home).fallback(errors::fallback))
        // Books
        .route("/books", get(books::list_books).fallback(errors::fallback))
        .route("/books/search", get(books::search_books).fallback(errors::fallback))
        .route(
            "/books/new",
            get(books::new_book_form)
                .post(books::create_book)
                .fallback(errors::fallback),
        )
        .route(
            "/books/noroute",
            get(errors::redirect_to_custom_error).fallback(errors::fallback),
        )
        .route(
            "/books/:id",
            get(books::edit_book_form)
                .post(books::update_book)
                .fallback(errors::fallback),
        )
        .route("/books/:id/delete", post(books::delete_book).fallback(errors::fallback))
        // Error pages
        .route("/page-not-found", get(errors::page_not_found).fallback(errors::fallback))
        .route("/noroute", get(errors::custom_error).fallback(errors::fallback))
        // Probes
        .route("/health", get(health::health_check).fallback(errors::fallback))
        .route("/ready", get(health::readiness_check).fallback(errors::fallback))
        .nest_service("/static", assets)
        .fallback(errors::fallback)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}
