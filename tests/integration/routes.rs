//! Catalog routes driven through the router with the in-memory store

use axum::{
    body::{to_bytes, Body},
    http::{header::LOCATION, Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt;

use bookshelf_server::{
    api::create_router, config::AppConfig, models::BookForm, repository::Repository, AppState,
};

const FORM: &str = "application/x-www-form-urlencoded";

struct TestApp {
    state: AppState,
}

impl TestApp {
    fn new() -> Self {
        Self {
            state: AppState::new(AppConfig::default(), Repository::in_memory()),
        }
    }

    fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    async fn get(&self, uri: &str) -> Response {
        self.router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post(&self, uri: &str, body: &str) -> Response {
        self.router()
            .oneshot(
                Request::post(uri)
                    .header("content-type", FORM)
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// POST without any content type
    async fn post_untyped(&self, uri: &str, body: &str) -> Response {
        self.router()
            .oneshot(Request::post(uri).body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    /// Insert a record directly through the catalog service
    async fn seed(&self, title: &str, author: &str, genre: &str, year: Option<i32>) -> i32 {
        let form = BookForm {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            genre: Some(genre.to_string()),
            year: year.map(|y| y.to_string()),
        };
        self.state.services.catalog.create_book(&form).await.unwrap().id
    }

    async fn seed_many(&self, count: usize) {
        for n in 0..count {
            self.seed(&format!("Volume {}", n), "Writer", "Reference", None).await;
        }
    }
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[LOCATION].to_str().unwrap()
}

fn row_count(html: &str) -> usize {
    html.matches("data-book-id=").count()
}

fn page_count(html: &str) -> i64 {
    html.split("data-page-count=\"")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .and_then(|n| n.parse().ok())
        .expect("page count missing from listing")
}

#[tokio::test]
async fn test_home_redirects_to_listing() {
    let app = TestApp::new();
    let response = app.get("/").await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/books");
}

#[tokio::test]
async fn test_page_count_for_various_totals() {
    for (total, expected) in [(0, 0), (1, 1), (10, 1), (11, 2), (25, 3)] {
        let app = TestApp::new();
        app.seed_many(total).await;

        let response = app.get("/books").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert_eq!(page_count(&html), expected, "total={}", total);
        assert_eq!(row_count(&html), total.min(10));
    }
}

#[tokio::test]
async fn test_out_of_range_page_is_empty_but_not_an_error() {
    let app = TestApp::new();
    app.seed_many(3).await;

    let response = app.get("/books?page=999").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert_eq!(row_count(&html), 0);
    assert_eq!(page_count(&html), 1);
}

#[tokio::test]
async fn test_page_comes_from_each_request_only() {
    let app = TestApp::new();
    app.seed_many(15).await;

    let second = body_text(app.get("/books?page=1").await).await;
    assert_eq!(row_count(&second), 5);

    // A later request without a page parameter starts from the first page again
    let first = body_text(app.get("/books").await).await;
    assert_eq!(row_count(&first), 10);

    let garbage = body_text(app.get("/books?page=abc").await).await;
    assert_eq!(row_count(&garbage), 10);
}

#[tokio::test]
async fn test_search_single_title_match() {
    let app = TestApp::new();
    let hobbit = app.seed("The Hobbit", "J. R. R. Tolkien", "Fantasy", Some(1937)).await;
    app.seed("Dune", "Frank Herbert", "Science Fiction", Some(1965)).await;
    app.seed("Emma", "Jane Austen", "Novel", Some(1815)).await;

    let response = app.get("/books/search?search=hobb").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert_eq!(row_count(&html), 1);
    assert!(html.contains(&format!("data-book-id=\"{}\"", hobbit)));
    assert_eq!(page_count(&html), 1);
}

#[tokio::test]
async fn test_search_covers_author_genre_and_year() {
    let app = TestApp::new();
    app.seed("The Hobbit", "J. R. R. Tolkien", "Fantasy", Some(1937)).await;
    app.seed("Dune", "Frank Herbert", "Science Fiction", Some(1965)).await;
    app.seed("Emma", "Jane Austen", "Novel", Some(1815)).await;

    for (term, expected) in [("AUSTEN", 1), ("fiction", 1), ("19", 2), ("nothing", 0)] {
        let html = body_text(app.get(&format!("/books/search?search={}", term)).await).await;
        assert_eq!(row_count(&html), expected, "term={}", term);
    }

    let html = body_text(app.get("/books/search").await).await;
    assert_eq!(row_count(&html), 3);
}

#[tokio::test]
async fn test_new_book_form_renders() {
    let app = TestApp::new();
    let response = app.get("/books/new").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("action=\"/books/new\""));
}

#[tokio::test]
async fn test_create_then_list() {
    let app = TestApp::new();
    let response = app
        .post("/books/new", "title=Dune&author=Frank+Herbert&genre=&year=1965")
        .await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/books");

    let html = body_text(app.get("/books").await).await;
    assert_eq!(row_count(&html), 1);
    assert!(html.contains("Frank Herbert"));
    assert!(html.contains("<td>Other</td>"));
}

#[tokio::test]
async fn test_create_missing_title_rerenders_form() {
    let app = TestApp::new();
    let response = app
        .post("/books/new", "author=Frank+Herbert&genre=Sci-Fi&year=1965")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("data-field=\"title\""));
    assert!(!html.contains("data-field=\"author\""));
    assert!(html.contains("Please provide the title of the book."));
    assert!(html.contains("value=\"Frank Herbert\""));
    assert!(html.contains("value=\"1965\""));

    let listing = body_text(app.get("/books").await).await;
    assert_eq!(row_count(&listing), 0);
}

#[tokio::test]
async fn test_edit_form_prefilled() {
    let app = TestApp::new();
    let id = app.seed("Emma", "Jane Austen", "Novel", Some(1815)).await;

    let response = app.get(&format!("/books/{}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("value=\"Emma\""));
    assert!(html.contains("value=\"1815\""));
    assert!(html.contains(&format!("action=\"/books/{}/delete\"", id)));
}

#[tokio::test]
async fn test_edit_missing_or_malformed_id_redirects_to_not_found() {
    let app = TestApp::new();
    for uri in ["/books/42", "/books/not-a-number"] {
        let response = app.get(uri).await;
        assert!(response.status().is_redirection(), "uri={}", uri);
        assert_eq!(location(&response), "/page-not-found");
    }
}

#[tokio::test]
async fn test_update_overwrites_record() {
    let app = TestApp::new();
    let id = app.seed("Emma", "Jane Austen", "Novel", Some(1815)).await;

    let response = app
        .post(&format!("/books/{}", id), "title=Persuasion&author=Jane+Austen&genre=&year=")
        .await;
    assert_eq!(location(&response), "/books");

    let book = app.state.services.catalog.get_book(id).await.unwrap();
    assert_eq!(book.title, "Persuasion");
    assert_eq!(book.genre, "Other");
    assert_eq!(book.year, None);
}

#[tokio::test]
async fn test_update_blank_title_leaves_record_unchanged() {
    let app = TestApp::new();
    let id = app.seed("Emma", "Jane Austen", "Novel", Some(1815)).await;
    let before = app.state.services.catalog.get_book(id).await.unwrap();

    let response = app
        .post(&format!("/books/{}", id), "title=&author=Someone+Else&genre=Novel&year=1816")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Title is required."));
    assert!(html.contains("value=\"Someone Else\""));
    assert!(html.contains(&format!("action=\"/books/{}\"", id)));

    let after = app.state.services.catalog.get_book(id).await.unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_update_missing_record_fails_gracefully() {
    let app = TestApp::new();
    let response = app
        .post("/books/42", "title=Ghost&author=Nobody&genre=&year=")
        .await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/page-not-found");
    assert_eq!(app.state.services.catalog.list_books(0).await.unwrap().total, 0);
}

#[tokio::test]
async fn test_delete_existing_and_missing() {
    let app = TestApp::new();
    let id = app.seed("Dune", "Frank Herbert", "Science Fiction", Some(1965)).await;

    let response = app.post(&format!("/books/{}/delete", id), "").await;
    assert_eq!(location(&response), "/books");
    assert_eq!(app.state.services.catalog.list_books(0).await.unwrap().total, 0);

    let response = app.post(&format!("/books/{}/delete", id), "").await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/books");
}

#[tokio::test]
async fn test_page_not_found_route_is_404() {
    let app = TestApp::new();
    let response = app.get("/page-not-found").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page Not Found"));
}

#[tokio::test]
async fn test_unmatched_route_is_404() {
    let app = TestApp::new();
    let response = app.get("/definitely/not/here").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page not found."));
}

#[tokio::test]
async fn test_custom_error_route_is_500() {
    let app = TestApp::new();
    let response = app.get("/books/noroute").await;
    assert_eq!(location(&response), "/noroute");

    let response = app.get("/noroute").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(response).await.contains("Custom Error"));
}

#[tokio::test]
async fn test_probes() {
    let app = TestApp::new();
    assert_eq!(body_text(app.get("/health").await).await, "ok");

    let response = app.get("/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ready");
}

#[tokio::test]
async fn test_repeated_query_parameters_fall_back_to_defaults() {
    let app = TestApp::new();
    app.seed_many(15).await;

    let response = app.get("/books?page=1&page=2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert_eq!(row_count(&html), 10);
    assert_eq!(page_count(&html), 2);

    let response = app.get("/books/search?search=a&search=b").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(row_count(&body_text(response).await), 10);
}

#[tokio::test]
async fn test_trailing_garbage_in_page_is_ignored() {
    let app = TestApp::new();
    app.seed_many(15).await;

    let html = body_text(app.get("/books?page=1abc").await).await;
    assert_eq!(row_count(&html), 5);
}

#[tokio::test]
async fn test_undecodable_form_redirects_to_not_found() {
    let app = TestApp::new();
    let id = app.seed("Emma", "Jane Austen", "Novel", Some(1815)).await;

    let response = app.post_untyped("/books/new", "title=Dune&author=Frank+Herbert").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/page-not-found");

    let response = app.post("/books/new", "title=a&title=b&author=c").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/page-not-found");

    let response = app
        .post_untyped(&format!("/books/{}", id), "title=Persuasion&author=Jane+Austen")
        .await;
    assert_eq!(location(&response), "/page-not-found");

    assert_eq!(app.state.services.catalog.list_books(0).await.unwrap().total, 1);
    let book = app.state.services.catalog.get_book(id).await.unwrap();
    assert_eq!(book.title, "Emma");
}

#[tokio::test]
async fn test_wrong_method_on_known_path_is_404() {
    let app = TestApp::new();
    let id = app.seed("Dune", "Frank Herbert", "Science Fiction", Some(1965)).await;

    let response = app.get(&format!("/books/{}/delete", id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page not found."));

    let response = app.post("/books", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page not found."));

    let response = app.post("/books/search", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(app.state.services.catalog.list_books(0).await.unwrap().total, 1);
}
