use crate::app::BookError;
use crate::transport::http::types::{ErrorBody, BOOK_NOT_FOUND, SERVER_ERROR};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Handler-boundary error. Every failure becomes a JSON response here; store details are
/// logged and replaced with a generic message.
#[derive(Debug)]
pub enum ApiError {
    Book(BookError),
    BadBody(JsonRejection),
    /// Any failure reported to the caller as a generic 500, whatever its kind.
    Internal(BookError),
}

impl From<BookError> for ApiError {
    fn from(value: BookError) -> Self {
        Self::Book(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::BadBody(value)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Book(BookError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Book(BookError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Book(BookError::InvalidId(_) | BookError::Store(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadBody(rejection) => {
                ErrorBody::new(format!("Invalid JSON body: {}", rejection.body_text()))
            }
            ApiError::Book(BookError::Validation(err)) => ErrorBody {
                error: err.summary().to_string(),
                fields: Some(err.fields),
            },
            ApiError::Book(BookError::NotFound(_)) => ErrorBody::new(BOOK_NOT_FOUND),
            ApiError::Internal(err)
            | ApiError::Book(err @ (BookError::InvalidId(_) | BookError::Store(_))) => {
                tracing::error!(error = %err, "request failed");
                ErrorBody::new(SERVER_ERROR)
            }
        };
        (status, Json(body)).into_response()
    }
}
