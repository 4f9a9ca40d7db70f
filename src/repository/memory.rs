//! In-process book store.
//!
//! Used by the test suites and by `memory:` database URLs for demos. Records
//! are lost when the process exits.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{BookStore, SearchFilter};
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookDraft},
    pagination::PageWindow,
};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i32, Book>,
    last_id: i32,
}

#[derive(Default)]
pub struct MemoryBooksRepository {
    table: RwLock<Table>,
}

impl MemoryBooksRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn window_of<'a>(rows: impl Iterator<Item = &'a Book>, window: PageWindow) -> Vec<Book> {
    let skip = usize::try_from(window.offset).unwrap_or(usize::MAX);
    let take = usize::try_from(window.limit).unwrap_or(usize::MAX);
    rows.skip(skip).take(take).cloned().collect()
}

#[async_trait]
impl BookStore for MemoryBooksRepository {
    async fn count_and_list(&self, window: PageWindow) -> AppResult<(i64, Vec<Book>)> {
        self.search(window, &SearchFilter::all()).await
    }

    async fn search(&self, window: PageWindow, filter: &SearchFilter) -> AppResult<(i64, Vec<Book>)> {
        let table = self.table.read().await;
        let total = table.rows.values().filter(|b| filter.matches(b)).count();
        let books = window_of(table.rows.values().filter(|b| filter.matches(b)), window);
        Ok((total as i64, books))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, draft: &BookDraft) -> AppResult<Book> {
        let mut table = self.table.write().await;
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| AppError::Internal("book id sequence exhausted".to_string()))?;
        let now = Utc::now();
        let book = Book {
            id,
            title: draft.title.clone(),
            author: draft.author.clone(),
            genre: draft.genre.clone(),
            year: draft.year,
            created_at: now,
            updated_at: now,
        };
        table.last_id = id;
        table.rows.insert(id, book.clone());
        Ok(book)
    }

    async fn update(&self, id: i32, draft: &BookDraft) -> AppResult<Option<Book>> {
        let mut table = self.table.write().await;
        let Some(book) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        book.title = draft.title.clone();
        book.author = draft.author.clone();
        book.genre = draft.genre.clone();
        book.year = draft.year;
        book.updated_at = Utc::now();
        Ok(Some(book.clone()))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
