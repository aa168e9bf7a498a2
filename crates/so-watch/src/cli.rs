//! Command-line interface for so-watch.

use clap::{Args, Parser, Subcommand};
use so_config::{ConfigOverrides, ConfigScope, OrderBy};

/// so-watch - Finds Stack Overflow answers for the errors in your terminal
#[derive(Parser)]
#[command(name = "so-watch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record this terminal so that `display` can watch it
    Capture,

    /// Watch the captured terminal and show answers for detected errors
    Display {
        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Search for free-form text
    Query {
        /// Search terms
        #[arg(required = true, num_args = 1.., value_name = "TEXT")]
        text: Vec<String>,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Read or change a configuration file
    Config {
        /// Use the global configuration file instead of ./.so-watch.toml
        #[arg(long)]
        global: bool,

        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Ask for settings and write a configuration file
    Init {
        /// Write the global configuration file instead of ./.so-watch.toml
        #[arg(long)]
        global: bool,

        /// Write the default values without asking
        #[arg(long, short)]
        default: bool,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the value of a key
    Get { key: String },

    /// Set a key
    Set { key: String, value: String },

    /// Print all keys
    List,

    /// Restore default values
    Reset,
}

/// Per-invocation configuration overrides
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideArgs {
    /// Language tag of the search (e.g. python)
    #[arg(long)]
    pub language: Option<String>,

    /// Result ordering: Relevance, Newest, Active or Votes
    #[arg(long, value_name = "ORDER")]
    pub order_by: Option<OrderBy>,

    /// Only show posts with an accepted answer
    #[arg(long, conflicts_with = "unverified")]
    pub verified_only: bool,

    /// Also show posts whose answers are not accepted
    #[arg(long)]
    pub unverified: bool,

    /// Show up to N comments per question and answer
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub display_comments: Option<u32>,
}

impl From<OverrideArgs> for ConfigOverrides {
    fn from(args: OverrideArgs) -> Self {
        let verified_only = match (args.verified_only, args.unverified) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        ConfigOverrides {
            language: args.language,
            order_by: args.order_by,
            verified_only,
            max_comments: args.display_comments.map(|n| n as usize),
        }
    }
}

pub fn scope(global: bool) -> ConfigScope {
    if global {
        ConfigScope::Global
    } else {
        ConfigScope::Local
    }
}
