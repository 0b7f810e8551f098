use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for nblog
#[derive(Parser, Debug)]
#[command(author, version, about = "nblog: content tools for Notion blogs")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times) Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(
    short = 'c',
    long = "config-file",
    global = true,
    action = clap::ArgAction::Append
  )]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,

  /// Write JSON output to a file instead of stdout
  #[arg(short, long, global = true)]
  pub output: Option<PathBuf>,
}

/// All supported subcommands for the nblog CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new nblog configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(default_value = "nblog.toml")]
    path: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Extract the table of contents of a rendered HTML page or a record map.
  Toc {
    /// HTML file, or a Notion record map as `.json`.
    input: PathBuf,

    /// Page to read from a record map. Defaults to the map's only root page.
    #[arg(short, long)]
    page_id: Option<String>,

    /// Print headings even when there are fewer than `toc.min_headings`.
    #[arg(short, long)]
    all: bool,

    /// Print the HTML with generated heading ids instead of the table.
    #[arg(long, conflicts_with_all = ["page_id", "all"])]
    annotate: bool,
  },

  /// Estimate the reading time of a text, HTML or record map file.
  ReadingTime {
    /// Text or HTML file, or a Notion record map as `.json`.
    input: PathBuf,

    /// Page to read from a record map. Defaults to the map's only root page.
    #[arg(short, long)]
    page_id: Option<String>,

    /// Post summary, read before the page content.
    #[arg(short, long)]
    summary: Option<String>,

    /// Last-edited marker of the post.
    #[arg(long)]
    last_edited: Option<String>,
  },

  /// Fill in reading times and series order, and sort posts newest first.
  Posts {
    /// JSON array of posts.
    input: PathBuf,

    /// Record map holding the posts' pages.
    #[arg(short, long)]
    record_map: Option<PathBuf>,
  },

  /// Show series navigation for a post.
  Series {
    /// JSON array of posts.
    input: PathBuf,

    /// ID of the post being viewed.
    #[arg(long)]
    current: String,

    /// Zero-based page of the series listing. Defaults to the page holding
    /// the current post.
    #[arg(long)]
    page: Option<usize>,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
