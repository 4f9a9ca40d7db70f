//! Terminal error pages.
//!
//! Once a request reaches an [`ErrorPage`] it ends with a rendered page: a
//! 404 renders the not-found view, any other status renders the generic
//! error view.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::views::{render, ErrorView, PageNotFoundView};

/// Message shown when a server error carries none of its own
pub const DEFAULT_SERVER_ERROR_MESSAGE: &str =
    "Server-side problem identified. Please contact the administrator.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorPage {
    NotFound { message: String },
    ServerError { status: StatusCode, message: String },
}

impl ErrorPage {
    pub fn not_found(message: impl Into<String>) -> Self {
        ErrorPage::NotFound {
            message: message.into(),
        }
    }

    /// Classify a failure by status; a missing status means 500 and a blank
    /// message is replaced by [`DEFAULT_SERVER_ERROR_MESSAGE`].
    pub fn from_status(status: Option<StatusCode>, message: Option<&str>) -> Self {
        let status = status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = message.map(str::trim).filter(|m| !m.is_empty());

        if status == StatusCode::NOT_FOUND {
            return Self::not_found(message.unwrap_or("Page not found."));
        }

        ErrorPage::ServerError {
            status,
            message: message.unwrap_or(DEFAULT_SERVER_ERROR_MESSAGE).to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ErrorPage::NotFound { .. } => StatusCode::NOT_FOUND,
            ErrorPage::ServerError { status, .. } => *status,
        }
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        match &self {
            ErrorPage::NotFound { message } => {
                tracing::info!("{} ({})", message, StatusCode::NOT_FOUND.as_u16());
                render(StatusCode::NOT_FOUND, &PageNotFoundView { message })
            }
            ErrorPage::ServerError { status, message } => {
                tracing::error!("Oops an error has occurred: {} ({})", message, status.as_u16());
                render(
                    *status,
                    &ErrorView {
                        status: status.as_u16(),
                        message,
                    },
                )
            }
        }
    }
}

/// `GET /page-not-found`
pub async fn page_not_found() -> ErrorPage {
    ErrorPage::not_found("Page Not Found")
}

/// `GET /noroute`: deliberately fails with a server error
pub async fn custom_error() -> ErrorPage {
    ErrorPage::from_status(Some(StatusCode::INTERNAL_SERVER_ERROR), Some("Custom Error"))
}

/// `GET /books/noroute`
pub async fn redirect_to_custom_error() -> Redirect {
    Redirect::to("/noroute")
}

/// Any request no route matched
pub async fn fallback() -> ErrorPage {
    ErrorPage::from_status(Some(StatusCode::NOT_FOUND), Some("Page not found."))
}
