//! treeseek CLI - Toolkit for the noisy tree-search environment
//!
//! This CLI provides a unified interface for:
//! - Rolling out baseline policies and reporting episode statistics
//! - Tracing single episodes observation by observation
//! - Generating and inspecting search trees

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "treeseek")]
#[command(version, about = "Noisy tree-search environment toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll out a baseline policy over many episodes
    Rollout(treeseek::cli::commands::rollout::RolloutArgs),

    /// Step through a single episode, printing each observation
    Trace(treeseek::cli::commands::trace::TraceArgs),

    /// Generate and print a search tree
    Tree(treeseek::cli::commands::tree::TreeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rollout(args) => treeseek::cli::commands::rollout::execute(args),
        Commands::Trace(args) => treeseek::cli::commands::trace::execute(args),
        Commands::Tree(args) => treeseek::cli::commands::tree::execute(args),
    }
}
