use clap::{Parser, Subcommand};

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "taskboard",
    version = VERSION,
    about = "Task and project board over a spreadsheet-backed list store",
    after_help = "\
CONFIG:
  Defaults < ./taskboard.toml < TASKBOARD_* env vars (e.g. TASKBOARD_STORE__BASE_URL) < --store-url
  Run `taskboard init` to write a taskboard.toml with every default spelled out.

EXIT CODES:
  0  Success
  1  Error (validation, store unreachable, failed sync, etc.)

SYNC NOTES:
  `task move` changes the task locally first, then writes the new status to the store.
  If the write still fails after retries the change is rolled back (sync.on_failure = \"rollback\")
  or kept and flagged (sync.on_failure = \"flag\"), and UPDATE_ERROR is reported.
  Position inside a column is display-only and is not stored."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Base URL of the list store (overrides store.base_url)
    #[arg(long, global = true)]
    pub store_url: Option<String>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default taskboard.toml in the current directory
    Init,

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Show tasks grouped by status
    Board,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List all tasks in store order
    List,
    /// Add a task
    #[command(after_help = "\
NOTE:
  Title, --project, --owner, --start and --end are required; missing ones are all
  reported together as VALIDATION_ERROR without contacting the store.
  Dates use YYYY-MM-DD. Status defaults to the board's default status.")]
    Add {
        /// Task title
        title: Option<String>,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        owner: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Execution date (YYYY-MM-DD)
        #[arg(long)]
        executed: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Move a task to another status column
    Move {
        /// Task ID, ID prefix, or exact title
        task: String,
        /// Target status
        #[arg(long)]
        to: String,
        /// Expected current status (defaults to the task's status)
        #[arg(long)]
        from: Option<String>,
        /// Position inside the target column (defaults to last)
        #[arg(long)]
        index: Option<usize>,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List all projects
    List,
    /// Add a project
    Add {
        /// Project name
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
}
