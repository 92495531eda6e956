//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use taxonomy_index_domain::SortOrder;

/// taxonomy-index: group classified content by taxonomy terms
#[derive(Parser, Debug)]
#[command(name = "taxonomy-index")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the index and list terms per taxonomy
    List(ListArgs),

    /// Build the index, bind term pages and show every taxonomy node
    Terms(TermsArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Override the content manifest path
    #[arg(long)]
    pub content: Option<PathBuf>,

    /// Only list this taxonomy (plural, e.g. "tags")
    #[arg(long)]
    pub taxonomy: Option<String>,

    /// Term order
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,

    /// Reverse the order
    #[arg(long)]
    pub reverse: bool,

    /// Maximum terms per taxonomy
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TermsArgs {
    /// Override the content manifest path
    #[arg(long)]
    pub content: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Alphabetical,
    Count,
}

impl From<OrderArg> for SortOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Alphabetical => SortOrder::Alphabetical,
            OrderArg::Count => SortOrder::ByCount,
        }
    }
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./taxonomy-index.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}
