use std::path::PathBuf;
use std::sync::Arc;

use kanban_core::{AppConfig, KanbanResult};
use kanban_domain::DashboardId;
use kanban_persistence::{FileMedium, LocalStore, SlotStore};
use kanban_sync::{BoardState, BoardStore, LocalBackend, RemoteBoardGateway, SyncExecutor};

use crate::cli::Cli;

pub type LocalSlot = Arc<SlotStore<FileMedium>>;
pub type Executor = SyncExecutor<RemoteBoardGateway, LocalBackend<LocalSlot>>;

/// Everything one CLI invocation needs, wired from config plus flag
/// overrides.
pub struct CliContext {
    pub store: BoardStore<Executor>,
    slot: LocalSlot,
    data_dir: PathBuf,
}

impl CliContext {
    pub fn build(config: &AppConfig) -> KanbanResult<Self> {
        let data_dir = config.effective_data_dir();
        let owner_id = config.effective_owner_id();
        let slot = Arc::new(SlotStore::new(FileMedium::new(&data_dir)));

        let remote = RemoteBoardGateway::new(config.effective_api_url(), config.request_timeout())?;
        let local = LocalBackend::new(Arc::clone(&slot), owner_id);
        let executor = SyncExecutor::new(remote, local);

        tracing::debug!(
            api_url = config.effective_api_url(),
            data_dir = %data_dir.display(),
            "Built CLI context"
        );

        Ok(Self {
            store: BoardStore::new(Arc::new(executor), owner_id),
            slot,
            data_dir,
        })
    }

    /// Open a dashboard so column and card intents have a target.
    pub async fn open(&self, dashboard_id: &DashboardId) -> Result<BoardState, String> {
        self.store.select_dashboard(dashboard_id).await;
        self.settled_state()
    }

    /// Current state, or the error the last intent left behind.
    pub fn settled_state(&self) -> Result<BoardState, String> {
        let state = self.store.snapshot();
        match state.error {
            Some(error) => Err(error),
            None => Ok(state),
        }
    }

    pub fn slot_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.slot.key()))
    }

    pub async fn reset_slot(&self) {
        self.slot.clear().await;
    }
}

/// Layer flag and environment overrides on top of `config.toml`.
pub fn resolve_config(cli: &Cli) -> AppConfig {
    let mut config = AppConfig::load();
    if let Some(api_url) = &cli.api_url {
        config.api_url = Some(api_url.clone());
    }
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = Some(data_dir.clone());
    }
    if let Some(owner_id) = &cli.owner_id {
        config.owner_id = Some(owner_id.clone());
    }
    if let Some(timeout) = cli.timeout_secs {
        config.request_timeout_secs = Some(timeout);
    }
    config
}
