//! The book service.
//!
//! This module sits between the HTTP handlers and the store. It is responsible for:
//! 1.  Parsing caller-supplied identifiers.
//! 2.  Validating create/update payloads before anything is written.
//! 3.  Turning store results into the `BookError` taxonomy the transport layer maps to statuses.
//!
//! Each operation performs at most one store mutation; there are no retries.

use crate::domain::{validate_payload, Book, BookId, BookPayload, ValidationError};
use crate::storage::BookStore;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("book {0} not found")]
    NotFound(BookId),

    #[error("malformed book id: {0:?}")]
    InvalidId(String),

    #[error("store failure: {0:#}")]
    Store(#[from] anyhow::Error),
}

pub type BookResult<T> = Result<T, BookError>;

/// Resource model for books. Cheap to clone; all clones share one store handle.
#[derive(Clone)]
pub struct BookService {
    store: Arc<dyn BookStore>,
}

impl BookService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    fn parse_id(raw: &str) -> BookResult<BookId> {
        BookId::parse(raw).ok_or_else(|| BookError::InvalidId(raw.to_string()))
    }

    /// Every stored book, in insertion order.
    pub async fn list_all(&self) -> BookResult<Vec<Book>> {
        Ok(self.store.list().await?)
    }

    pub async fn get_by_id(&self, raw_id: &str) -> BookResult<Book> {
        let id = Self::parse_id(raw_id)?;
        self.store.find(id).await?.ok_or(BookError::NotFound(id))
    }

    /// Validates `payload` and persists it as a new book with a store-assigned id.
    ///
    /// Nothing is written when validation fails.
    pub async fn create(&self, payload: &BookPayload) -> BookResult<Book> {
        let fields = validate_payload(payload)?;
        let book = self.store.insert(fields).await?;
        tracing::info!(book_id = %book.id, "book created");
        Ok(book)
    }

    /// Replaces all four business fields of an existing book.
    ///
    /// The existence check runs before validation, so an unknown id reports `NotFound` even when
    /// the payload is also invalid.
    pub async fn update(&self, raw_id: &str, payload: &BookPayload) -> BookResult<Book> {
        let id = Self::parse_id(raw_id)?;
        if self.store.find(id).await?.is_none() {
            return Err(BookError::NotFound(id));
        }
        let fields = validate_payload(payload)?;
        let book = self
            .store
            .replace(id, fields)
            .await?
            .ok_or(BookError::NotFound(id))?;
        tracing::info!(book_id = %id, "book updated");
        Ok(book)
    }

    pub async fn delete(&self, raw_id: &str) -> BookResult<()> {
        let id = Self::parse_id(raw_id)?;
        if !self.store.remove(id).await? {
            return Err(BookError::NotFound(id));
        }
        tracing::info!(book_id = %id, "book deleted");
        Ok(())
    }

    pub async fn count(&self) -> BookResult<u64> {
        Ok(self.store.count().await?)
    }

    pub async fn ping(&self) -> BookResult<()> {
        Ok(self.store.ping().await?)
    }
}
