use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tb", about = concat!("taskboard v", env!("CARGO_PKG_VERSION"), " - tasks from a remote API, in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Task API base URL (overrides TASKBOARD_API_URL and the config file)
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    /// Config file (default: $TASKBOARD_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks, highest priority first
    List,
    /// Create a task
    Add(AddArgs),
    /// Flip a task between pending and completed
    Toggle(IdArgs),
    /// Permanently delete a task
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    #[arg(long)]
    pub title: String,
    /// Task description
    #[arg(long)]
    pub description: String,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: String,
    /// Priority
    #[arg(long, value_parser = ["Low", "Medium", "High"])]
    pub priority: String,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task ID
    pub id: String,
    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}
