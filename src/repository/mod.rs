//! Repository layer for database operations

pub mod books;
pub mod filter;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, BookDraft},
    pagination::PageWindow,
};

pub use filter::SearchFilter;

/// Port for reading and writing the `books` table.
///
/// Absent rows are ordinary outcomes (`None` / `false`); only storage faults
/// come back as errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Total number of records and one window of them, in insertion order
    async fn count_and_list(&self, window: PageWindow) -> AppResult<(i64, Vec<Book>)>;

    /// Same as [`BookStore::count_and_list`] restricted to records matching `filter`
    async fn search(&self, window: PageWindow, filter: &SearchFilter) -> AppResult<(i64, Vec<Book>)>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    /// Insert a record; the store assigns the id
    async fn create(&self, draft: &BookDraft) -> AppResult<Book>;

    /// Overwrite every field of an existing record
    async fn update(&self, id: i32, draft: &BookDraft) -> AppResult<Option<Book>>;

    /// Returns true if the record existed and was deleted
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Round-trip to the store to check connectivity
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the active book store
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a repository backed by the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self::with_store(Arc::new(books::BooksRepository::new(pool)))
    }

    /// Create a repository that keeps everything in process memory
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(memory::MemoryBooksRepository::new()))
    }

    pub fn with_store(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }
}
