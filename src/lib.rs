pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{BookError, BookService};
pub use domain::{Book, BookFields, BookId, BookPayload};
pub use infra::Config;
pub use storage::{BookStore, MemoryBookStore, PostgresBookStore};
