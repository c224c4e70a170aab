//! In-process book store. Keeps records in insertion order; nothing survives a restart.

use crate::domain::{Book, BookFields, BookId};
use crate::storage::BookStore;
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list(&self) -> anyhow::Result<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }

    async fn find(&self, id: BookId) -> anyhow::Result<Option<Book>> {
        let books = self.books.read().await;
        Ok(books.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, fields: BookFields) -> anyhow::Result<Book> {
        let book = Book::from_parts(BookId::new_random(), fields);
        self.books.write().await.push(book.clone());
        Ok(book)
    }

    async fn replace(&self, id: BookId, fields: BookFields) -> anyhow::Result<Option<Book>> {
        let mut books = self.books.write().await;
        Ok(books.iter_mut().find(|b| b.id == id).map(|slot| {
            *slot = Book::from_parts(id, fields);
            slot.clone()
        }))
    }

    async fn remove(&self, id: BookId) -> anyhow::Result<bool> {
        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|b| b.id != id);
        Ok(books.len() != before)
    }

    async fn count(&self) -> anyhow::Result<u64> {
        Ok(self.books.read().await.len() as u64)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
