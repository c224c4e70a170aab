pub mod book_service;

pub use book_service::{BookError, BookResult, BookService};
