//! HTTP client for the willow.camp posts API.
//!
//! Uses an async `reqwest` client driven by a private current-thread tokio
//! runtime, so each call blocks until its response arrives.

use std::time::Duration;

use reqwest::Method;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, trace};

use super::{ApiError, ApiResult, PostStore};
use crate::model::Post;

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// willow.camp API client.
pub struct ApiClient {
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
    base_url: String,
    token: Option<String>,
}

/// Request body for create/update: `{"post": {"markdown": ...}}`.
#[derive(Debug, Serialize)]
struct PostPayload<'a> {
    post: MarkdownBody<'a>,
}

#[derive(Debug, Serialize)]
struct MarkdownBody<'a> {
    markdown: &'a str,
}

/// Response envelope for a single post.
#[derive(Debug, Deserialize)]
struct PostEnvelope {
    post: Post,
}

/// Response envelope for a post listing.
#[derive(Debug, Deserialize)]
struct PostsEnvelope {
    posts: Vec<Post>,
}

impl ApiClient {
    /// Create a client for `base_url`.
    ///
    /// The bearer `token` is attached to every request when present.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client or runtime cannot
    /// be built.
    pub fn new(base_url: &str, token: Option<String>) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(concat!("willow-camp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {e}")))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create tokio runtime: {e}")))?;

        Ok(Self {
            client,
            runtime,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// The base address requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request and return the raw status and body.
    fn send(&self, method: Method, path: &str, payload: Option<&PostPayload<'_>>) -> ApiResult<(u16, String)> {
        let url = self.url(path);
        debug!(%method, %url, "API request");

        let mut request = self.client.request(method, &url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(payload) = payload {
            trace!(body = ?payload, "request body");
            request = request.json(payload);
        }

        self.runtime.block_on(async {
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            debug!(status, bytes = body.len(), "API response");
            Ok((status, body))
        })
    }

    fn request(&self, method: Method, path: &str, slug: Option<&str>, payload: Option<&PostPayload<'_>>) -> ApiResult<String> {
        let (status, body) = self.send(method, path, payload)?;
        check_status(status, body, slug)
    }
}

/// Map a response status to success or a typed failure.
///
/// Only 2xx is success. A 404 on a per-post endpoint is `NotFound`.
fn check_status(status: u16, body: String, slug: Option<&str>) -> ApiResult<String> {
    match (status, slug) {
        (200..=299, _) => Ok(body),
        (401 | 403, _) => Err(ApiError::Unauthorized { status, body }),
        (404, Some(slug)) => Err(ApiError::NotFound {
            slug: slug.to_string(),
        }),
        _ => Err(ApiError::Http { status, body }),
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn post_path(slug: &str) -> String {
    format!("/api/posts/{slug}")
}

impl PostStore for ApiClient {
    fn list(&self, page_size: usize) -> ApiResult<Vec<Post>> {
        let path = format!("/api/posts?per_page={page_size}");
        let body = self.request(Method::GET, &path, None, None)?;
        Ok(decode::<PostsEnvelope>(&body)?.posts)
    }

    fn get(&self, slug: &str) -> ApiResult<Post> {
        let body = self.request(Method::GET, &post_path(slug), Some(slug), None)?;
        Ok(decode::<PostEnvelope>(&body)?.post)
    }

    fn create(&self, markdown: &str) -> ApiResult<Post> {
        let payload = PostPayload {
            post: MarkdownBody { markdown },
        };
        let body = self.request(Method::POST, "/api/posts", None, Some(&payload))?;
        Ok(decode::<PostEnvelope>(&body)?.post)
    }

    fn update(&self, slug: &str, markdown: &str) -> ApiResult<Post> {
        let payload = PostPayload {
            post: MarkdownBody { markdown },
        };
        let body = self.request(Method::PATCH, &post_path(slug), Some(slug), Some(&payload))?;
        Ok(decode::<PostEnvelope>(&body)?.post)
    }

    fn delete(&self, slug: &str) -> ApiResult<()> {
        self.request(Method::DELETE, &post_path(slug), Some(slug), None)?;
        Ok(())
    }
}
