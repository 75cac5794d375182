//! willow.camp CLI - Markdown blog posts on willow.camp
//!
//! This crate provides the core functionality for the `willow-camp` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (Post, Ghost export records)
//! - [`api`] - Remote post store trait and HTTP client
//! - [`sync`] - Timestamp-based directory sync
//! - [`import`] - Ghost export to Markdown conversion
//! - [`config`] - Token and API address resolution
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod model;
pub mod sync;

pub use error::{Error, Result};
