//! Error types for the willow.camp CLI.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (3=not_found, 4=validation, 5=api, 8=io)
//! - Context-aware recovery hints
//! - Structured JSON output for `--json` consumers

use std::path::PathBuf;
use thiserror::Error;

use crate::api::ApiError;

/// Result type alias for willow.camp operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Not Found (exit 3)
    PostNotFound,
    FileNotFound,

    // Validation (exit 4)
    MissingToken,
    InvalidArgument,
    DuplicateSlug,

    // API (exit 5)
    Unauthorized,
    HttpError,
    TransportError,

    // I/O and parsing (exit 8)
    FilesystemError,
    ParseError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::PostNotFound => "POST_NOT_FOUND",
            Self::FileNotFound => "FILE_NOT_FOUND",
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::DuplicateSlug => "DUPLICATE_SLUG",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::HttpError => "HTTP_ERROR",
            Self::TransportError => "TRANSPORT_ERROR",
            Self::FilesystemError => "FILESYSTEM_ERROR",
            Self::ParseError => "PARSE_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::PostNotFound | Self::FileNotFound => 3,
            Self::MissingToken | Self::InvalidArgument | Self::DuplicateSlug => 4,
            Self::Unauthorized | Self::HttpError | Self::TransportError => 5,
            Self::FilesystemError | Self::ParseError => 8,
        }
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in willow.camp CLI operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("API token is required (unless using --dry-run)")]
    MissingToken,

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Duplicate slug '{slug}': {} and {}", first.display(), second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingToken => ErrorCode::MissingToken,
            Self::FileNotFound { .. } => ErrorCode::FileNotFound,
            Self::DuplicateSlug { .. } => ErrorCode::DuplicateSlug,
            Self::Api(api) => match api {
                ApiError::NotFound { .. } => ErrorCode::PostNotFound,
                ApiError::Unauthorized { .. } => ErrorCode::Unauthorized,
                ApiError::Http { .. } => ErrorCode::HttpError,
                ApiError::Decode(_) => ErrorCode::ParseError,
                ApiError::Transport(_) => ErrorCode::TransportError,
            },
            Self::Parse { .. } | Self::Json(_) => ErrorCode::ParseError,
            Self::Io(_) | Self::Glob(_) => ErrorCode::FilesystemError,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingToken => Some(
                "Pass --token or set WILLOW_API_TOKEN. Try 'willow-camp help' for more information."
                    .to_string(),
            ),

            Self::DuplicateSlug { slug, .. } => Some(format!(
                "Two Markdown files map to the slug '{slug}'. Rename one so every file stem is unique."
            )),

            Self::Api(ApiError::Unauthorized { .. }) => {
                Some("Check that your API token is valid and not expired.".to_string())
            }

            Self::Api(ApiError::NotFound { slug }) => Some(format!(
                "No post with slug '{slug}'. Use `willow-camp list` to see available posts."
            )),

            Self::FileNotFound { path } => Some(format!(
                "Check the path '{}' and try again.",
                path.display()
            )),

            Self::Api(_)
            | Self::Parse { .. }
            | Self::Io(_)
            | Self::Json(_)
            | Self::Glob(_)
            | Self::InvalidArgument(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
