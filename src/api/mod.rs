//! Remote post store.
//!
//! The [`PostStore`] trait is the seam between the sync engine / importer
//! and the willow.camp API. [`ApiClient`] is the HTTP implementation;
//! tests substitute an in-memory store.
//!
//! Every operation is blocking and returns either the parsed record or a
//! typed [`ApiError`]. Failures are never swallowed at this layer.

mod client;

pub use client::{ApiClient, DEFAULT_TIMEOUT};

use crate::model::Post;

/// Number of posts requested by a single `list` call.
///
/// Pagination beyond this first page is not implemented; stores with more
/// posts than this are only partially listed.
pub const LIST_PAGE_SIZE: usize = 1000;

/// Errors returned by a [`PostStore`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 401/403 from the server.
    #[error("API request failed: HTTP {status} (unauthorized): {body}")]
    Unauthorized { status: u16, body: String },

    /// 404 for a per-post endpoint.
    #[error("Post not found: {slug}")]
    NotFound { slug: String },

    /// Any other non-2xx response.
    #[error("API request failed: HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response.
    #[error("Error making API request: {0}")]
    Transport(String),

    /// A 2xx response whose body could not be decoded.
    #[error("Unexpected API response: {0}")]
    Decode(String),
}

/// Result type for store operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Operations the remote post store supports.
pub trait PostStore {
    /// List posts, requesting up to `page_size` in one call.
    fn list(&self, page_size: usize) -> ApiResult<Vec<Post>>;

    /// Fetch a single post by slug.
    fn get(&self, slug: &str) -> ApiResult<Post>;

    /// Create a post; the server derives slug, id and title from the body.
    fn create(&self, markdown: &str) -> ApiResult<Post>;

    /// Replace the Markdown body of an existing post.
    fn update(&self, slug: &str, markdown: &str) -> ApiResult<Post>;

    /// Delete a post.
    fn delete(&self, slug: &str) -> ApiResult<()>;
}
