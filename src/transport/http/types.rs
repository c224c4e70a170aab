use crate::app::BookService;
use crate::domain::FieldError;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub books: BookService,
}

impl AppState {
    pub fn new(books: BookService) -> Self {
        Self { books }
    }
}

/// Body of every non-2xx response.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    /// Offending fields, present only on validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: None,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthBody {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub const BOOK_NOT_FOUND: &str = "Book not found";
pub const SERVER_ERROR: &str = "Server error";
pub const BOOK_DELETED: &str = "Book deleted successfully";
pub const STORE_UNREACHABLE: &str = "Store unreachable";
