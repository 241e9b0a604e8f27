use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "registry-console", about = "Container registry admin console", version)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, overrides config and REGISTRY_CONSOLE_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List repositories
    Repos {
        /// Case-insensitive substring filter
        #[arg(long)]
        filter: Option<String>,
    },

    /// Registry-wide totals and the largest repositories
    Stats {
        /// How many repositories to show: 20, 30 or all
        #[arg(long, default_value = "20")]
        limit: String,
    },

    /// Overview of one repository
    Dashboard {
        repository: String,
    },

    /// Ranked images of a repository
    Images {
        repository: String,
        #[arg(long, value_enum, default_value_t = Rank::Downloads)]
        rank: Rank,
        /// Number of images (default 10)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Delete a single image by digest
    Delete {
        repository: String,
        digest: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Delete images not pulled within the last N days
    Prune {
        repository: String,
        /// Age threshold in days; invalid values fall back to 30
        #[arg(long, default_value = "30")]
        days: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Rank {
    Downloads,
    Size,
}
