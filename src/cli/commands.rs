use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tick", about = concat!("tick v", env!("CARGO_PKG_VERSION"), " - a plain-text to-do list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use this config file instead of discovering tick.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Tasks file to open (default: tasks.file from config, else tasks.txt)
    #[arg(short = 'f', long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks with their numbers
    List(ListArgs),
    /// Add a task
    Add(AddArgs),
    /// Mark a task completed
    Done(IndexArg),
    /// Mark a task active again
    Undo(IndexArg),
    /// Flip a task between active and completed
    Toggle(IndexArg),
    /// Delete a task
    Rm(RmArgs),
    /// Show task totals
    Status,
    /// Show entries from the recovery log
    Recovery(RecoveryArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Only show tasks in this state (active, completed)
    #[arg(long)]
    pub state: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct IndexArg {
    /// Task number as shown by `tick list`
    pub index: usize,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task number as shown by `tick list`
    pub index: usize,
    /// Delete without asking
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct RecoveryArgs {
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
}
