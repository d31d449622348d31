//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Render directories as tree diagrams and rebuild directory skeletons from them
#[derive(Parser, Debug)]
#[command(name = "skeltree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a directory tree
    #[command(visible_alias = "t")]
    Tree(TreeArgs),

    /// Create directories and empty files from a tree layout file
    #[command(visible_aliases = ["gen", "g"])]
    Dir(DirArgs),

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(clap::Args, Debug)]
pub struct TreeArgs {
    /// Root directory
    #[arg(default_value = ".", value_hint = ValueHint::DirPath)]
    pub path: PathBuf,

    /// Max depth (default: 99)
    #[arg(short = 'L', long, allow_negative_numbers = true)]
    pub level: Option<i32>,

    /// Include files
    #[arg(long)]
    pub files: bool,

    /// Glob pattern to ignore (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub ignore: Vec<String>,

    /// Use ASCII connectors instead of Unicode
    #[arg(long)]
    pub ascii: bool,

    /// Save tree to a text file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct DirArgs {
    /// Path to tree layout file
    #[arg(value_hint = ValueHint::FilePath)]
    pub layout: PathBuf,

    /// Root directory to create structure in
    #[arg(default_value = ".", value_hint = ValueHint::DirPath)]
    pub root: PathBuf,

    /// Preview actions without creating
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create global config template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
