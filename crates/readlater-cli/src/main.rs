//! readlater: command-line front end for the ReadLater data layer.
//!
//! Every command prints its result as JSON on stdout. Logs go to stderr.

mod commands;
mod config;
mod logging;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use readlater_db::{ItemId, ReadingStatus, TodoStatus};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "readlater")]
#[command(author, version, about = "Reading list and todo store with Telegram backups")]
#[command(propagate_version = true)]
struct Cli {
    /// JSON store file (overrides READLATER_STORE_PATH)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show both collections, Priority-tagged items first
    List {
        /// Only show items carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Save a link to the reading list
    AddReading {
        #[arg(short, long)]
        url: String,

        #[arg(short = 'T', long)]
        title: String,

        /// Tag to assign (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        fav_icon_url: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Create a todo item
    AddTodo {
        #[arg(short = 'T', long)]
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(short, long, default_value = "")]
        url: String,

        /// Tag to assign (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        priority: Option<String>,

        #[arg(long)]
        due_date: Option<String>,
    },

    /// Change fields of a reading item
    UpdateReading {
        id: ItemId,

        #[command(flatten)]
        fields: ReadingFields,
    },

    /// Change fields of a todo item
    UpdateTodo {
        id: ItemId,

        #[command(flatten)]
        fields: TodoFields,
    },

    /// Delete a reading item and sever its links
    DeleteReading { id: ItemId },

    /// Delete a todo item and sever its links
    DeleteTodo { id: ItemId },

    /// Link a todo item with a reading item
    Link { todo_id: ItemId, reading_id: ItemId },

    /// Remove the link between a todo item and a reading item
    Unlink { todo_id: ItemId, reading_id: ItemId },

    /// Manage the tag registry
    Tags {
        #[command(subcommand)]
        command: TagCommands,
    },

    /// Manage Telegram credentials
    Credentials {
        #[command(subcommand)]
        command: CredentialCommands,
    },

    /// Send a test message with the stored credentials
    TestConnection,

    /// Upload a snapshot to the Telegram channel and pin it
    Backup,

    /// Replace local data with the backup pinned in the Telegram channel
    Restore,

    /// Write the whole namespace as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the whole namespace with a JSON snapshot file
    Import { file: PathBuf },
}

#[derive(Subcommand)]
enum TagCommands {
    /// List known tags
    List,
    /// Register a tag
    Add { name: String },
    /// Remove a tag (the protected tag stays)
    Remove { name: String },
}

#[derive(Subcommand)]
enum CredentialCommands {
    /// Store the bot token and chat id
    Set {
        #[arg(long)]
        bot_token: String,

        #[arg(long)]
        chat_id: String,

        /// Send a test message before saving
        #[arg(long)]
        test: bool,
    },
    /// Show the stored chat id (the token is never printed)
    Show,
}

#[derive(Args)]
struct ReadingFields {
    #[arg(short, long)]
    url: Option<String>,

    #[arg(short = 'T', long)]
    title: Option<String>,

    /// Replace the tag list (repeatable)
    #[arg(short, long = "tag")]
    tags: Option<Vec<String>>,

    #[arg(short, long)]
    status: Option<ReadingStatusArg>,

    #[arg(long)]
    notes: Option<String>,

    #[arg(long)]
    fav_icon_url: Option<String>,
}

#[derive(Args)]
struct TodoFields {
    #[arg(short = 'T', long)]
    title: Option<String>,

    #[arg(short, long)]
    description: Option<String>,

    #[arg(short, long)]
    url: Option<String>,

    /// Replace the tag list (repeatable)
    #[arg(short, long = "tag")]
    tags: Option<Vec<String>>,

    #[arg(short, long)]
    status: Option<TodoStatusArg>,

    #[arg(long)]
    priority: Option<String>,

    #[arg(long)]
    due_date: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReadingStatusArg {
    Unread,
    Done,
}

impl From<ReadingStatusArg> for ReadingStatus {
    fn from(arg: ReadingStatusArg) -> Self {
        match arg {
            ReadingStatusArg::Unread => ReadingStatus::Unread,
            ReadingStatusArg::Done => ReadingStatus::Done,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TodoStatusArg {
    Open,
    Done,
}

impl From<TodoStatusArg> for TodoStatus {
    fn from(arg: TodoStatusArg) -> Self {
        match arg {
            TodoStatusArg::Open => TodoStatus::Open,
            TodoStatusArg::Done => TodoStatus::Done,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let _log_guard = logging::init();

    let config = Config::from_env().with_store_path(cli.store.clone());

    match commands::run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(subsystem = "cli", error = %e, "Command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
