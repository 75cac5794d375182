//! CLI definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// willow.camp CLI - manage and sync Markdown blog posts
#[derive(Parser, Debug)]
#[command(name = "willow-camp", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API Bearer Token
    #[arg(short, long, global = true, env = "WILLOW_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// API base URL (default: https://willow.camp)
    #[arg(long, global = true, env = "WILLOW_API_URL")]
    pub api_url: Option<String>,

    /// Show what would be done without making actual changes
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Show detailed output (-v), debug logs (-vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no logs except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all posts
    List,

    /// Show a single post by slug
    Show {
        /// Post slug
        #[arg(short, long)]
        slug: String,
    },

    /// Create a new post from a Markdown file
    Create {
        /// Markdown file to upload
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Update an existing post by slug
    Update {
        /// Post slug
        #[arg(short, long)]
        slug: String,

        /// Markdown file with the new content
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Delete a post by slug
    Delete {
        /// Post slug
        #[arg(short, long)]
        slug: String,
    },

    /// Bulk upload posts from a directory
    Upload {
        /// Directory containing Markdown files
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,
    },

    /// Download a post to a Markdown file
    Download {
        /// Post slug
        #[arg(short, long)]
        slug: String,

        /// Output file (default: <slug>.md)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a Ghost export into Markdown files (and upload them when a token is set)
    GhostImport {
        /// Ghost export JSON file
        #[arg(long)]
        ghost_export: PathBuf,

        /// Directory for the generated Markdown files
        #[arg(long, default_value = "ghost_export")]
        output_dir: PathBuf,
    },

    /// Two-way sync between a directory and willow.camp
    Sync {
        /// Directory containing Markdown files
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Whether this command needs an API token outside dry-run mode.
    #[must_use]
    pub const fn requires_token(&self) -> bool {
        !matches!(self, Self::GhostImport { .. } | Self::Completions { .. })
    }
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
