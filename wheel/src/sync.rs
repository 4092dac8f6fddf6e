//! Remote store boundary and the optimistic sync adapter.
//!
//! The engine mutates local state first and hands the host `Push*` actions.
//! [`SyncAdapter`] carries those out against a [`BoardStore`] without ever
//! rolling local state back: a failed push is logged and the local view stays
//! ahead of the store until the next full load. Read-only views refresh on a
//! fixed interval through [`poll_loop`].
//!
//! Every adapter result that resolves after its view was torn down is
//! dropped, gated by the shared [`Liveness`] flag.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::board::{BoardConfig, BoardError};
use crate::engine::Action;

/// Identifies one team's board inside a game room.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TeamRef {
    pub room_code: String,
    pub team_name: String,
}

impl TeamRef {
    #[must_use]
    pub fn new(room_code: impl Into<String>, team_name: impl Into<String>) -> Self {
        Self { room_code: room_code.into(), team_name: team_name.into() }
    }
}

/// Failures talking to the remote store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request never got a response.
    #[error("store unreachable: {0}")]
    Transport(String),
    /// The store answered with a non-success status.
    #[error("store returned HTTP {status}")]
    Status { status: u16 },
    /// The response body did not have the expected shape.
    #[error("unexpected store response: {0}")]
    Decode(String),
    /// The store returned a board that fails validation.
    #[error(transparent)]
    Board(#[from] BoardError),
    /// No board or team exists for this reference.
    #[error("team {0:?} not found")]
    NotFound(String),
}

/// Fetch/push operations the engine needs from the backend.
///
/// Futures are not required to be `Send`; browser fetches are bound to the
/// main thread.
#[async_trait(?Send)]
pub trait BoardStore {
    async fn fetch_board(&self, team: &TeamRef) -> Result<BoardConfig, StoreError>;
    async fn push_board(&self, team: &TeamRef, board: &BoardConfig) -> Result<(), StoreError>;
    async fn fetch_energy(&self, team: &TeamRef) -> Result<u32, StoreError>;
    /// Apply a signed change; returns the store's resulting balance.
    async fn push_energy_delta(&self, team: &TeamRef, delta: i64) -> Result<u32, StoreError>;
}

/// Shared "still mounted" flag. Cloned into every async task a view spawns;
/// cleared on teardown.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Default for Liveness {
    fn default() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }
}

impl Liveness {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn kill(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Board plus balance, as loaded from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub board: BoardConfig,
    pub balance: u32,
}

/// Store-confirmed balance for a given energy push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyAck {
    pub seq: u64,
    pub balance: u32,
}

/// Runs engine push actions and snapshot loads against a store for one team.
pub struct SyncAdapter<S> {
    store: S,
    team: TeamRef,
    liveness: Liveness,
}

impl<S: BoardStore> SyncAdapter<S> {
    #[must_use]
    pub fn new(store: S, team: TeamRef, liveness: Liveness) -> Self {
        Self { store, team, liveness }
    }

    #[must_use]
    pub fn team(&self) -> &TeamRef {
        &self.team
    }

    #[must_use]
    pub fn liveness(&self) -> &Liveness {
        &self.liveness
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch board and balance. Errors are returned as-is; liveness is not
    /// checked.
    ///
    /// # Errors
    ///
    /// Returns the first store failure.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, StoreError> {
        let board = self.store.fetch_board(&self.team).await?;
        board.validate()?;
        let balance = self.store.fetch_energy(&self.team).await?;
        Ok(Snapshot { board, balance })
    }

    /// Fetch a snapshot for a live view. `None` when the fetch failed (logged)
    /// or the view was torn down while it was in flight.
    pub async fn refresh(&self) -> Option<Snapshot> {
        let result = self.fetch_snapshot().await;
        if !self.liveness.is_alive() {
            log::debug!("dropping snapshot for {:?}: view torn down", self.team.team_name);
            return None;
        }
        match result {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!("board refresh failed for {:?}: {e}", self.team.team_name);
                None
            }
        }
    }

    /// Carry out one engine action. Push failures are logged and leave local
    /// state untouched. Returns the store's balance for an energy push that
    /// succeeded while the view is still alive.
    pub async fn dispatch(&self, action: &Action) -> Option<EnergyAck> {
        match action {
            Action::PushBoard(board) => {
                if let Err(e) = self.store.push_board(&self.team, board).await {
                    log::warn!("board push failed for {:?}: {e}", self.team.team_name);
                }
                None
            }
            Action::PushEnergyDelta { seq, delta } => match self.store.push_energy_delta(&self.team, *delta).await {
                Ok(balance) if self.liveness.is_alive() => Some(EnergyAck { seq: *seq, balance }),
                Ok(_) => None,
                Err(e) => {
                    log::warn!("energy push ({delta:+}) failed for {:?}: {e}", self.team.team_name);
                    None
                }
            },
            Action::RenderNeeded | Action::SetCursor(_) => None,
        }
    }

    /// Dispatch actions in order, collecting energy acknowledgements.
    pub async fn dispatch_all(&self, actions: &[Action]) -> Vec<EnergyAck> {
        let mut acks = Vec::new();
        for action in actions {
            if let Some(ack) = self.dispatch(action).await {
                acks.push(ack);
            }
        }
        acks
    }
}

/// Refresh, apply, sleep; repeat until the view is torn down.
///
/// `sleep` yields one interval-long future per call, so the same loop runs on
/// browser timers and on tokio.
pub async fn poll_loop<S, F, Fut, A>(adapter: &SyncAdapter<S>, mut sleep: F, mut apply: A)
where
    S: BoardStore,
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
    A: FnMut(Snapshot),
{
    while adapter.liveness.is_alive() {
        if let Some(snapshot) = adapter.refresh().await {
            apply(snapshot);
        }
        if !adapter.liveness.is_alive() {
            break;
        }
        sleep().await;
    }
}
