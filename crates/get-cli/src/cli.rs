use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// URL of the repo synthesized when no repos.json exists yet.
pub const DEFAULT_REPO_URL: &str = "https://www.switchbru.com/appstore";

#[derive(Parser)]
#[command(author, version, about, arg_required_else_help = true)]
pub struct Args {
    /// Directory holding repos.json, installed packages, and scratch space
    #[arg(short, long, default_value = "./.get")]
    pub config_dir: PathBuf,

    /// Fallback repo URL used when generating a default repos.json
    #[arg(long, default_value = DEFAULT_REPO_URL)]
    pub url: String,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colors in output
    #[arg(long)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every package in the catalog with its install status
    #[command(visible_alias = "ls")]
    List,

    /// Download and install packages
    #[command(visible_alias = "i")]
    Install {
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// Remove installed packages
    #[command(visible_alias = "rm")]
    Remove {
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// List configured repos
    Repos,

    /// Flip a repo's enabled flag
    Toggle { repo: String },
}
