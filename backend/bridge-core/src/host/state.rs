//! Host-side state management using actor pattern.
//!
//! Tracks what the built-in capabilities have recorded:
//! - users created via the create-user channel
//! - interaction messages received via the button-clicked channel
//!
//! # Architecture
//!
//! Uses an actor pattern to ensure all state mutations are serialized:
//! - Commands are sent via an mpsc channel
//! - A dedicated task processes commands sequentially
//! - Reads use Arc<RwLock<T>> for lock-free concurrent access
//!
//! Handlers only ever send commands, so a slow read never blocks the
//! dispatch loop.

use crate::error::host::HostError;

use common::ErrorLocation;

use std::sync::Arc;

use log::{info, warn};
use tokio::sync::{Mutex, RwLock, mpsc};

/// A user recorded by the create-user capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub email: String,
    pub name: String,
}

/// Commands that mutate host state.
///
/// All state mutations go through the state actor via these commands,
/// which serializes access and prevents race conditions.
#[derive(Debug, Clone)]
pub enum HostCommand {
    /// Record a user created from the presentation process
    RecordUser(UserRecord),

    /// Record an interaction message from the presentation process
    RecordInteraction(String),
}

/// Host state manager.
///
/// Cloneable; all clones share the same underlying state. The actor is
/// lazily spawned on first use within an async context.
#[derive(Clone)]
pub struct HostState {
    /// Channel to send state mutation commands to the actor
    command_tx: Arc<Mutex<Option<mpsc::Sender<HostCommand>>>>,

    /// Shared read-only access to recorded users
    users: Arc<RwLock<Vec<UserRecord>>>,

    /// Shared read-only access to recorded interactions
    interactions: Arc<RwLock<Vec<String>>>,

    /// Track if actor has been initialized
    actor_init: Arc<Mutex<bool>>,
}

impl HostState {
    pub fn new() -> Self {
        Self {
            command_tx: Arc::new(Mutex::new(None)),
            users: Arc::new(RwLock::new(Vec::new())),
            interactions: Arc::new(RwLock::new(Vec::new())),
            actor_init: Arc::new(Mutex::new(false)),
        }
    }

    /// Send a state update command.
    ///
    /// Spawns the actor on first call (lazy initialization).
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Actor`] if the state actor has died
    /// (should never happen).
    pub async fn update(&self, cmd: HostCommand) -> Result<(), HostError> {
        self.ensure_actor().await;

        let tx_guard = self.command_tx.lock().await;
        let tx = tx_guard.as_ref().ok_or_else(|| HostError::Actor {
            message: String::from("State actor not initialized"),
            location: ErrorLocation::caller(),
        })?;

        tx.send(cmd).await.map_err(|e| HostError::Actor {
            message: format!("State actor died: {e}"),
            location: ErrorLocation::caller(),
        })
    }

    /// Snapshot of the recorded users (read-only, lock-free with
    /// respect to mutations).
    pub async fn users(&self) -> Vec<UserRecord> {
        self.users.read().await.clone()
    }

    /// Snapshot of the recorded interaction messages.
    pub async fn interactions(&self) -> Vec<String> {
        self.interactions.read().await.clone()
    }

    /// Ensure actor is spawned (called lazily from async context).
    async fn ensure_actor(&self) {
        let mut init_guard = self.actor_init.lock().await;
        if !*init_guard {
            let (tx, rx) = mpsc::channel(100);
            let users_clone = Arc::clone(&self.users);
            let interactions_clone = Arc::clone(&self.interactions);

            // Store tx BEFORE spawning to avoid race
            let mut tx_guard = self.command_tx.lock().await;
            *tx_guard = Some(tx);
            drop(tx_guard);

            tokio::spawn(state_actor(rx, users_clone, interactions_clone));
            *init_guard = true;
            info!("Host state actor spawned");
        }
    }
}

impl Default for HostState {
    fn default() -> Self {
        Self::new()
    }
}

/// The state actor task.
///
/// Owns the mutable state and processes commands sequentially until
/// the channel closes (all HostState handles dropped).
async fn state_actor(
    mut command_rx: mpsc::Receiver<HostCommand>,
    users: Arc<RwLock<Vec<UserRecord>>>,
    interactions: Arc<RwLock<Vec<String>>>,
) {
    info!("Host state actor started");

    while let Some(cmd) = command_rx.recv().await {
        match cmd {
            HostCommand::RecordUser(record) => {
                let mut users_write = users.write().await;
                users_write.push(record);
                info!("Host now holds {} recorded user(s)", users_write.len());
            }
            HostCommand::RecordInteraction(message) => {
                let mut interactions_write = interactions.write().await;
                interactions_write.push(message);
            }
        }
    }

    warn!("Host state actor stopped - this should not happen during normal operation");
}
