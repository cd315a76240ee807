//! Board-state synchronization engine.
//!
//! Intents enter through [`BoardStore`], which applies drag-and-drop edits
//! optimistically and hands every mutation to a [`BoardBackend`]. In
//! production that backend is a [`SyncExecutor`]: it tries the
//! [`RemoteBoardGateway`] first and replays the mutation against the
//! [`LocalBackend`] when the remote fails.

pub mod backend;
pub mod executor;
pub mod gateway;
pub mod local;
pub mod state;

pub use backend::BoardBackend;
pub use executor::SyncExecutor;
pub use gateway::RemoteBoardGateway;
pub use local::LocalBackend;
pub use state::{BoardState, BoardStore, SyncHandle};
