//! Books repository backed by Postgres

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{BookStore, SearchFilter};
use crate::{
    error::AppResult,
    models::book::{Book, BookDraft},
    pagination::PageWindow,
};

const SEARCH_CONDITION: &str = "title ILIKE $1 OR author ILIKE $1 OR genre ILIKE $1 \
                                OR CAST(year AS TEXT) ILIKE $1";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn count_and_list(&self, window: PageWindow) -> AppResult<(i64, Vec<Book>)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((total, books))
    }

    async fn search(&self, window: PageWindow, filter: &SearchFilter) -> AppResult<(i64, Vec<Book>)> {
        let Some(pattern) = filter.like_pattern() else {
            return self.count_and_list(window).await;
        };

        let count_query = format!("SELECT COUNT(*) FROM books WHERE {}", SEARCH_CONDITION);
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await?;

        let select_query = format!(
            "SELECT * FROM books WHERE {} ORDER BY id LIMIT $2 OFFSET $3",
            SEARCH_CONDITION
        );
        let books = sqlx::query_as::<_, Book>(&select_query)
            .bind(&pattern)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((total, books))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn create(&self, draft: &BookDraft) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, genre, year)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.genre)
        .bind(draft.year)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    async fn update(&self, id: i32, draft: &BookDraft) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $2, author = $3, genre = $4, year = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.genre)
        .bind(draft.year)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
