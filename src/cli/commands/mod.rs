//! Command implementations.

pub mod completions;
pub mod ghost_import;
pub mod posts;
pub mod sync;
pub mod upload;
