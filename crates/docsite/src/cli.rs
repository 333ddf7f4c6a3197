//! CLI argument parsing

use clap::{Parser, Subcommand};
use docsite::constants::DEFAULT_DOCS_DIR;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "Documentation content pipeline", long_about = None)]
#[command(version)]
#[command(after_help = "Use 'docsite <command> --help' for more information about a command.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to docs directory (defaults to ./docs)
    #[arg(short, long, default_value = DEFAULT_DOCS_DIR, global = true)]
    pub docs_dir: PathBuf,

    /// Config file (defaults to <docs-dir>/docsite.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Format a code snippet read from a file or stdin
    #[command(visible_alias = "format")]
    Fmt {
        /// Snippet file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Language tag (js, ts, json, py, ...); defaults to the file extension
        #[arg(short, long)]
        lang: Option<String>,

        /// Whitespace cleanup only, whatever the language
        #[arg(long)]
        lightweight: bool,
    },

    /// Format the fenced code blocks of a markdown or MDX document
    #[command(visible_alias = "markdown")]
    Md {
        /// Path to document
        file: PathBuf,

        /// Rewrite the file in place
        #[arg(short, long, conflicts_with = "check")]
        write: bool,

        /// Exit with an error if any block would change
        #[arg(long)]
        check: bool,

        /// Whitespace cleanup only, whatever the language
        #[arg(long)]
        lightweight: bool,
    },

    /// Print the breadcrumb trail for a URL path
    #[command(visible_alias = "bc")]
    Crumbs {
        /// URL path, e.g. /apis/sessions-api
        path: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Export the docs tree as plain text for language models
    #[command(visible_alias = "llms")]
    Export {
        /// Include every page body (llms-full.txt) instead of an index
        #[arg(long)]
        full: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
