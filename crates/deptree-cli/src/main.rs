//! Deptree CLI - Command-line interface for Deptree
//!
//! Loads a pattern graph description and shows the dependency tree the
//! way a tree view would see it: lazily expanded, filtered, and updated
//! in place when the pattern changes.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "deptree")]
#[command(author = "Deptree Contributors")]
#[command(version)]
#[command(about = "Browse the dependency tree of a pattern", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dependency tree of a pattern graph
    Show {
        /// Pattern graph description (JSON)
        graph: PathBuf,

        /// Number of levels to expand
        #[arg(short, long, default_value = "1")]
        depth: usize,

        /// Only show top-level rows whose name contains this text
        #[arg(short, long)]
        filter: Option<String>,

        /// Saved expansion state to restore (JSON list of paths)
        #[arg(long)]
        state: Option<PathBuf>,

        /// Model configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show how the tree changes between two versions of a pattern
    Diff {
        /// Graph before the change
        old: PathBuf,

        /// Graph after the change
        new: PathBuf,

        /// Number of levels expanded before the change
        #[arg(short, long, default_value = "1")]
        depth: usize,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List the path of every visible row
    Paths {
        /// Pattern graph description (JSON)
        graph: PathBuf,

        /// Number of levels to expand
        #[arg(short, long, default_value = "1")]
        depth: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Show {
            graph,
            depth,
            filter,
            state,
            config,
            json,
        } => commands::show(&commands::ShowOptions {
            graph: &graph,
            depth,
            filter: filter.as_deref(),
            state: state.as_deref(),
            config: config.as_deref(),
            json,
        }),
        Commands::Diff {
            old,
            new,
            depth,
            json,
        } => commands::diff(&old, &new, depth, json),
        Commands::Paths { graph, depth } => commands::paths(&graph, depth),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
