//! Book store backed by PostgreSQL.

use crate::domain::{Book, BookFields, BookId};
use crate::storage::BookStore;
use anyhow::Context;
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use uuid::Uuid;

const BOOK_COLUMNS: &str = "id, title, author, year, genre";

/// A book store that uses a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PostgresBookStore {
    pool: PgPool,
}

impl PostgresBookStore {
    /// Connects to `database_url` and makes sure the `books` table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("failed to connect to Postgres")?;
        Self::new_with_pool(pool).await
    }

    pub async fn new_with_pool(pool: PgPool) -> anyhow::Result<Self> {
        // `seq` carries insertion order; `id` is the public identifier.
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS books (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                seq BIGSERIAL NOT NULL,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                year INTEGER NOT NULL,
                genre TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .context("failed to create books table")?;

        Ok(Self { pool })
    }

    /// Deletes every record. Used to reset state between test runs.
    pub async fn clear(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM books").execute(&self.pool).await?;
        Ok(())
    }
}

fn row_to_book(row: &PgRow) -> anyhow::Result<Book> {
    let id: Uuid = row.try_get("id")?;
    Ok(Book {
        id: BookId::from(id),
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        year: row.try_get("year")?,
        genre: row.try_get("genre")?,
    })
}

#[async_trait]
impl BookStore for PostgresBookStore {
    async fn list(&self) -> anyhow::Result<Vec<Book>> {
        let sql = format!("SELECT {} FROM books ORDER BY seq", BOOK_COLUMNS);
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .context("failed to list books")?;
        rows.iter().map(row_to_book).collect()
    }

    async fn find(&self, id: BookId) -> anyhow::Result<Option<Book>> {
        let sql = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to load book {}", id))?;
        row.as_ref().map(row_to_book).transpose()
    }

    async fn insert(&self, fields: BookFields) -> anyhow::Result<Book> {
        let sql = format!(
            "INSERT INTO books (title, author, year, genre) VALUES ($1, $2, $3, $4) RETURNING {}",
            BOOK_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&fields.title)
            .bind(&fields.author)
            .bind(fields.year)
            .bind(&fields.genre)
            .fetch_one(&self.pool)
            .await
            .context("failed to insert book")?;
        row_to_book(&row)
    }

    async fn replace(&self, id: BookId, fields: BookFields) -> anyhow::Result<Option<Book>> {
        let sql = format!(
            "UPDATE books SET title = $2, author = $3, year = $4, genre = $5 WHERE id = $1 RETURNING {}",
            BOOK_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .bind(&fields.title)
            .bind(&fields.author)
            .bind(fields.year)
            .bind(&fields.genre)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to update book {}", id))?;
        row.as_ref().map(row_to_book).transpose()
    }

    async fn remove(&self, id: BookId) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete book {}", id))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> anyhow::Result<u64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(n.max(0) as u64)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
