use crate::app::BookError;
use crate::domain::{Book, BookPayload};
use crate::transport::http::handlers::common::ApiError;
use crate::transport::http::types::{AppState, ErrorBody, MessageBody, BOOK_DELETED};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "All books in insertion order", body = [Book]),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list_books_handler(State(state): State<AppState>) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.books.list_all().await?;
    Ok(Json(books))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 404, description = "No book with this id", body = ErrorBody),
        (status = 500, description = "Malformed id or store failure", body = ErrorBody)
    )
)]
pub async fn get_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let book = state.books.get_by_id(&id).await?;
    Ok(Json(book))
}

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Missing or invalid fields", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn create_book_handler(
    State(state): State<AppState>,
    request: Result<Json<BookPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let Json(payload) = request?;
    let book = state.books.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Book id")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book replaced", body = Book),
        (status = 400, description = "Body is not a JSON object", body = ErrorBody),
        (status = 404, description = "No book with this id", body = ErrorBody),
        (status = 500, description = "Missing or invalid fields, malformed id or store failure", body = ErrorBody)
    )
)]
pub async fn update_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<BookPayload>, JsonRejection>,
) -> Result<Json<Book>, ApiError> {
    let Json(payload) = request?;
    // Unlike create, a rejected replacement is reported as a server error.
    let book = state.books.update(&id, &payload).await.map_err(|e| match e {
        BookError::Validation(_) => ApiError::Internal(e),
        other => ApiError::Book(other),
    })?;
    Ok(Json(book))
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted", body = MessageBody),
        (status = 404, description = "No book with this id", body = ErrorBody),
        (status = 500, description = "Malformed id or store failure", body = ErrorBody)
    )
)]
pub async fn delete_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    state.books.delete(&id).await?;
    Ok(Json(MessageBody {
        message: BOOK_DELETED.to_string(),
    }))
}
