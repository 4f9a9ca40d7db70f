//! Catalog management service.
//!
//! Sits between the route handlers and the [`BookStore`](crate::repository::BookStore):
//! submitted forms are validated here, and absent records are turned into
//! [`AppError::NotFound`] so handlers can tell them apart from validation
//! failures and storage faults.

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookForm},
    pagination::{Page, PageWindow},
    repository::{Repository, SearchFilter},
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    page_size: i64,
}

impl CatalogService {
    pub fn new(repository: Repository, page_size: i64) -> Self {
        Self {
            repository,
            page_size,
        }
    }

    fn window(&self, page: i64) -> PageWindow {
        PageWindow::new(page, self.page_size)
    }

    /// One page of the whole catalog
    pub async fn list_books(&self, page: i64) -> AppResult<Page<Book>> {
        let window = self.window(page);
        let (total, books) = self.repository.books.count_and_list(window).await?;
        Ok(Page::new(books, total, window))
    }

    /// One page of the books matching `term` in any searchable field
    pub async fn search_books(&self, page: i64, term: Option<&str>) -> AppResult<Page<Book>> {
        let window = self.window(page);
        let filter = SearchFilter::new(term);
        let (total, books) = self.repository.books.search(window, &filter).await?;
        Ok(Page::new(books, total, window))
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository
            .books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Validate and insert a new book
    pub async fn create_book(&self, form: &BookForm) -> AppResult<Book> {
        let draft = form.validate().map_err(AppError::Validation)?;
        let book = self.repository.books.create(&draft).await?;
        tracing::info!("Created book id={} title={:?}", book.id, book.title);
        Ok(book)
    }

    /// Replace every field of an existing book.
    ///
    /// A missing record is reported before the form is looked at; an invalid
    /// form leaves the stored record untouched.
    pub async fn update_book(&self, id: i32, form: &BookForm) -> AppResult<Book> {
        self.get_book(id).await?;

        let draft = form.validate().map_err(AppError::Validation)?;
        let book = self
            .repository
            .books
            .update(id, &draft)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;
        tracing::info!("Updated book id={}", book.id);
        Ok(book)
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        if !self.repository.books.delete(id).await? {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    /// Check that the backing store answers
    pub async fn check_connection(&self) -> AppResult<()> {
        self.repository.books.ping().await
    }
}
