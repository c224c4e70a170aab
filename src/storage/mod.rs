//! Persistence for book records.
//!
//! A [`BookStore`] is the store handle the service is constructed with. It is opened once at
//! startup and shared by every request; implementations are internally synchronized.

use crate::domain::{Book, BookFields, BookId};
use crate::infra::{Backend, Config};
use async_trait::async_trait;
use std::sync::Arc;

pub mod memory;
pub mod postgres;

pub use memory::MemoryBookStore;
pub use postgres::PostgresBookStore;

/// Contract every book backend provides.
///
/// Absence is reported through `Option`/`bool`, never as an error: `Err` always means the
/// store itself failed.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> anyhow::Result<Vec<Book>>;

    async fn find(&self, id: BookId) -> anyhow::Result<Option<Book>>;

    /// Persists a new record. The store assigns the identifier.
    async fn insert(&self, fields: BookFields) -> anyhow::Result<Book>;

    /// Overwrites all business fields of `id`. Returns `None` if no such record exists.
    async fn replace(&self, id: BookId, fields: BookFields) -> anyhow::Result<Option<Book>>;

    /// Returns `true` if a record was removed.
    async fn remove(&self, id: BookId) -> anyhow::Result<bool>;

    async fn count(&self) -> anyhow::Result<u64>;

    /// Round-trips to the backend without touching data.
    async fn ping(&self) -> anyhow::Result<()>;
}

/// Opens the backend selected by `config`.
pub async fn open(config: &Config) -> anyhow::Result<Arc<dyn BookStore>> {
    match config.backend {
        Backend::Memory => Ok(Arc::new(MemoryBookStore::new())),
        Backend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;
            let store = PostgresBookStore::connect(url, config.max_connections).await?;
            Ok(Arc::new(store))
        }
    }
}
