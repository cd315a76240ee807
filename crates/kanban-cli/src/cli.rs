use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use kanban_domain::{CardId, ColumnId, DashboardId};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT_HASH"), ")");

#[derive(Parser)]
#[command(name = "kanban-sync")]
#[command(about = "Drive kanban dashboards against a remote board service with offline fallback", long_about = None)]
#[command(version = VERSION)]
pub struct Cli {
    /// Base URL of the board service (overrides config.toml)
    #[arg(long, global = true, env = "KANBAN_API_URL")]
    pub api_url: Option<String>,

    /// Directory holding the local fallback slot (overrides config.toml)
    #[arg(long, global = true, env = "KANBAN_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// User id that owns newly created dashboards
    #[arg(long, global = true, env = "KANBAN_OWNER_ID")]
    pub owner_id: Option<String>,

    /// Remote request timeout in seconds
    #[arg(long, global = true, env = "KANBAN_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Dashboard operations
    Dashboard(DashboardCommand),
    /// Column operations
    Column(ColumnCommand),
    /// Card operations
    Card(CardCommand),
    /// Local fallback store maintenance
    Store(StoreCommand),
}

// Dashboard commands
#[derive(Args)]
pub struct DashboardCommand {
    #[command(subcommand)]
    pub action: DashboardAction,
}

#[derive(Subcommand)]
pub enum DashboardAction {
    /// List dashboards
    List,
    /// Create a dashboard owned by the configured user
    Create {
        #[arg(long)]
        title: String,
    },
    /// Open a dashboard and print it with its columns
    Show {
        #[arg(long)]
        id: DashboardId,
    },
    /// Update dashboard fields
    Update(DashboardUpdateArgs),
}

#[derive(Args)]
pub struct DashboardUpdateArgs {
    #[arg(long)]
    pub id: DashboardId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,
    #[arg(long)]
    pub clear_description: bool,
    #[arg(long, conflicts_with = "clear_background")]
    pub background: Option<String>,
    #[arg(long)]
    pub clear_background: bool,
    #[arg(long)]
    pub public: Option<bool>,
}

// Column commands
#[derive(Args)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// List the columns of a dashboard
    List {
        #[arg(long)]
        dashboard: DashboardId,
    },
    /// Append a column to a dashboard
    Create {
        #[arg(long)]
        dashboard: DashboardId,
        #[arg(long)]
        title: String,
    },
    /// Put the given columns first, in order
    Reorder {
        #[arg(long)]
        dashboard: DashboardId,
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<ColumnId>,
    },
}

// Card commands
#[derive(Args)]
pub struct CardCommand {
    #[command(subcommand)]
    pub action: CardAction,
}

#[derive(Subcommand)]
pub enum CardAction {
    /// Create a card at the end of a column
    Create {
        #[arg(long)]
        dashboard: DashboardId,
        #[arg(long)]
        column: ColumnId,
        #[arg(long)]
        title: String,
    },
    /// Update card fields
    Update(CardUpdateArgs),
    /// Move a card by position
    Move(CardMoveArgs),
}

#[derive(Args)]
pub struct CardUpdateArgs {
    #[arg(long)]
    pub dashboard: DashboardId,
    #[arg(long)]
    pub column: ColumnId,
    #[arg(long)]
    pub id: CardId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,
    #[arg(long)]
    pub clear_description: bool,
    /// RFC 3339 timestamp, e.g. 2026-03-01T09:00:00Z
    #[arg(long, conflicts_with = "clear_due_date")]
    pub due_date: Option<DateTime<Utc>>,
    #[arg(long)]
    pub clear_due_date: bool,
}

#[derive(Args)]
pub struct CardMoveArgs {
    #[arg(long)]
    pub dashboard: DashboardId,
    /// Source column id
    #[arg(long)]
    pub from: ColumnId,
    /// Destination column id
    #[arg(long)]
    pub to: ColumnId,
    /// Zero-based index of the card in the source column
    #[arg(long)]
    pub from_index: usize,
    /// Zero-based target index; past the end appends
    #[arg(long, default_value_t = 0)]
    pub to_index: usize,
}

// Store commands
#[derive(Args)]
pub struct StoreCommand {
    #[command(subcommand)]
    pub action: StoreAction,
}

#[derive(Subcommand)]
pub enum StoreAction {
    /// Print where the local fallback slot lives
    Info,
    /// Delete the local fallback slot
    Reset,
}
