//! Plain HTTP endpoints.

/// Placeholder page served at `/`.
pub async fn home_page() -> &'static str {
    "Home Page"
}
