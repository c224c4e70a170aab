//! Domain types for the book resource.

pub mod book;

pub use book::{
    validate_payload, Book, BookFields, BookId, BookPayload, FieldError, FieldProblem,
    ValidationError,
};
