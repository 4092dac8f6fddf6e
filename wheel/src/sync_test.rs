use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use futures::executor::block_on;

use super::*;
use crate::engine::EngineCore;
use crate::fixtures::sample_board;
use crate::input::TileRef;

// =============================================================
// Helpers
// =============================================================

/// In-process store with switchable failures.
#[derive(Debug, Default)]
struct MemoryStore {
    teams: RefCell<HashMap<TeamRef, (BoardConfig, u32)>>,
    fail_pushes: Cell<bool>,
    fail_fetches: Cell<bool>,
    board_pushes: Cell<usize>,
}

impl MemoryStore {
    fn new() -> Self {
        Self::default()
    }

    fn insert(&self, team: TeamRef, board: BoardConfig, balance: u32) {
        self.teams.borrow_mut().insert(team, (board, balance));
    }

    fn set_fail_pushes(&self, fail: bool) {
        self.fail_pushes.set(fail);
    }

    fn set_fail_fetches(&self, fail: bool) {
        self.fail_fetches.set(fail);
    }

    fn board_pushes(&self) -> usize {
        self.board_pushes.get()
    }

    fn board(&self, team: &TeamRef) -> Option<BoardConfig> {
        self.teams.borrow().get(team).map(|(b, _)| b.clone())
    }

    fn balance(&self, team: &TeamRef) -> Option<u32> {
        self.teams.borrow().get(team).map(|(_, e)| *e)
    }

    fn check(flag: &Cell<bool>) -> Result<(), StoreError> {
        if flag.get() { Err(StoreError::Transport("injected failure".into())) } else { Ok(()) }
    }
}

#[async_trait(?Send)]
impl BoardStore for MemoryStore {
    async fn fetch_board(&self, team: &TeamRef) -> Result<BoardConfig, StoreError> {
        Self::check(&self.fail_fetches)?;
        self.board(team).ok_or_else(|| StoreError::NotFound(team.team_name.clone()))
    }

    async fn push_board(&self, team: &TeamRef, board: &BoardConfig) -> Result<(), StoreError> {
        Self::check(&self.fail_pushes)?;
        let mut teams = self.teams.borrow_mut();
        let entry = teams.get_mut(team).ok_or_else(|| StoreError::NotFound(team.team_name.clone()))?;
        entry.0 = board.clone();
        self.board_pushes.set(self.board_pushes.get() + 1);
        Ok(())
    }

    async fn fetch_energy(&self, team: &TeamRef) -> Result<u32, StoreError> {
        Self::check(&self.fail_fetches)?;
        self.balance(team).ok_or_else(|| StoreError::NotFound(team.team_name.clone()))
    }

    async fn push_energy_delta(&self, team: &TeamRef, delta: i64) -> Result<u32, StoreError> {
        Self::check(&self.fail_pushes)?;
        let mut teams = self.teams.borrow_mut();
        let entry = teams.get_mut(team).ok_or_else(|| StoreError::NotFound(team.team_name.clone()))?;
        entry.1 = apply_delta(entry.1, delta);
        Ok(entry.1)
    }
}

/// Balance after a signed change, floored at zero.
fn apply_delta(balance: u32, delta: i64) -> u32 {
    let next = i64::from(balance).saturating_add(delta).max(0);
    u32::try_from(next).unwrap_or(u32::MAX)
}

fn team() -> TeamRef {
    TeamRef::new("ABC123", "Team Alpha")
}

fn seeded_store(balance: u32) -> MemoryStore {
    let store = MemoryStore::new();
    store.insert(team(), sample_board(), balance);
    store
}

fn adapter(store: MemoryStore) -> SyncAdapter<MemoryStore> {
    SyncAdapter::new(store, team(), Liveness::new())
}

/// Store that tears the view down while a fetch is in flight.
struct TeardownMidFetch {
    inner: MemoryStore,
    liveness: Liveness,
}

#[async_trait(?Send)]
impl BoardStore for TeardownMidFetch {
    async fn fetch_board(&self, team: &TeamRef) -> Result<BoardConfig, StoreError> {
        self.liveness.kill();
        self.inner.fetch_board(team).await
    }
    async fn push_board(&self, team: &TeamRef, board: &BoardConfig) -> Result<(), StoreError> {
        self.inner.push_board(team, board).await
    }
    async fn fetch_energy(&self, team: &TeamRef) -> Result<u32, StoreError> {
        self.inner.fetch_energy(team).await
    }
    async fn push_energy_delta(&self, team: &TeamRef, delta: i64) -> Result<u32, StoreError> {
        self.liveness.kill();
        self.inner.push_energy_delta(team, delta).await
    }
}

// =============================================================
// apply_delta
// =============================================================

#[test]
fn delta_is_floored_at_zero() {
    assert_eq!(apply_delta(50, 25), 75);
    assert_eq!(apply_delta(50, -20), 30);
    assert_eq!(apply_delta(10, -50), 0);
}

// =============================================================
// Liveness
// =============================================================

#[test]
fn liveness_is_shared_between_clones() {
    let a = Liveness::new();
    let b = a.clone();
    assert!(b.is_alive());
    a.kill();
    assert!(!b.is_alive());
}

// =============================================================
// Snapshots
// =============================================================

#[test]
fn refresh_returns_board_and_balance() {
    let adapter = adapter(seeded_store(32));
    let snapshot = block_on(adapter.refresh()).unwrap();
    assert_eq!(snapshot.balance, 32);
    assert_eq!(snapshot.board, sample_board());
}

#[test]
fn refresh_failure_is_none() {
    let store = seeded_store(32);
    store.set_fail_fetches(true);
    assert!(block_on(adapter(store).refresh()).is_none());
}

#[test]
fn unknown_team_is_not_found() {
    let adapter = SyncAdapter::new(seeded_store(1), TeamRef::new("ABC123", "Nobody"), Liveness::new());
    let err = block_on(adapter.fetch_snapshot()).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn invalid_stored_board_is_rejected() {
    let mut board = sample_board();
    board.rings[1].inner_radius = 10.0;
    let store = MemoryStore::new();
    store.insert(team(), board, 1);
    let err = block_on(adapter(store).fetch_snapshot()).unwrap_err();
    assert!(matches!(err, StoreError::Board(_)));
}

#[test]
fn snapshot_resolving_after_teardown_is_dropped() {
    let liveness = Liveness::new();
    let store = TeardownMidFetch { inner: seeded_store(32), liveness: liveness.clone() };
    let adapter = SyncAdapter::new(store, team(), liveness);
    assert!(block_on(adapter.refresh()).is_none());
}

// =============================================================
// Dispatch
// =============================================================

#[test]
fn click_actions_reach_the_store() {
    let adapter = adapter(seeded_store(100));
    let mut engine = EngineCore::default();
    let snapshot = block_on(adapter.refresh()).unwrap();
    engine.load_snapshot(snapshot.board, snapshot.balance);

    let actions = engine.on_tile_click(TileRef::new(2, 2), 0);
    let acks = block_on(adapter.dispatch_all(&actions));

    assert_eq!(adapter.store().board_pushes(), 1);
    assert!(adapter.store().board(&team()).unwrap().tile(2, 2).unwrap().energy_point);
    assert_eq!(adapter.store().balance(&team()), Some(97));
    assert_eq!(acks, vec![EnergyAck { seq: 1, balance: 97 }]);
}

#[test]
fn failed_push_keeps_local_state() {
    let store = seeded_store(100);
    store.set_fail_pushes(true);
    let adapter = adapter(store);
    let mut engine = EngineCore::default();
    engine.load_snapshot(sample_board(), 100);

    let actions = engine.on_tile_click(TileRef::new(2, 2), 0);
    let acks = block_on(adapter.dispatch_all(&actions));

    assert!(acks.is_empty());
    assert_eq!(engine.balance(), 97);
    assert!(engine.board.tile(2, 2).unwrap().energy_point);
    assert_eq!(adapter.store().balance(&team()), Some(100));
    assert_eq!(adapter.store().board_pushes(), 0);
}

#[test]
fn render_and_cursor_actions_are_local() {
    let adapter = adapter(seeded_store(1));
    assert!(block_on(adapter.dispatch(&Action::RenderNeeded)).is_none());
    assert!(block_on(adapter.dispatch(&Action::SetCursor("move".into()))).is_none());
}

#[test]
fn energy_ack_after_teardown_is_dropped() {
    let liveness = Liveness::new();
    let store = TeardownMidFetch { inner: seeded_store(10), liveness: liveness.clone() };
    let adapter = SyncAdapter::new(store, team(), liveness);
    let ack = block_on(adapter.dispatch(&Action::PushEnergyDelta { seq: 1, delta: -1 }));
    assert!(ack.is_none());
}

// =============================================================
// Polling
// =============================================================

#[test]
fn poll_loop_applies_until_torn_down() {
    let adapter = adapter(seeded_store(32));
    let ticks = Cell::new(0);
    let mut applied = Vec::new();
    block_on(poll_loop(
        &adapter,
        || {
            ticks.set(ticks.get() + 1);
            if ticks.get() == 3 {
                adapter.liveness().kill();
            }
            std::future::ready(())
        },
        |snapshot| applied.push(snapshot.balance),
    ));
    assert_eq!(applied, vec![32, 32, 32]);
    assert_eq!(ticks.get(), 3);
}

#[test]
fn poll_loop_picks_up_remote_changes() {
    let adapter = adapter(seeded_store(32));
    let ticks = Cell::new(0);
    let mut applied = Vec::new();
    block_on(poll_loop(
        &adapter,
        || {
            ticks.set(ticks.get() + 1);
            adapter.store().insert(team(), sample_board(), 32 - ticks.get());
            if ticks.get() == 2 {
                adapter.liveness().kill();
            }
            std::future::ready(())
        },
        |snapshot| applied.push(snapshot.balance),
    ));
    assert_eq!(applied, vec![32, 31]);
}

#[test]
fn poll_loop_never_runs_when_already_dead() {
    let adapter = adapter(seeded_store(32));
    adapter.liveness().kill();
    let mut applied = 0;
    block_on(poll_loop(&adapter, || std::future::ready(()), |_| applied += 1));
    assert_eq!(applied, 0);
}

#[test]
fn poll_loop_survives_fetch_failures() {
    let store = seeded_store(32);
    store.set_fail_fetches(true);
    let adapter = adapter(store);
    let ticks = Cell::new(0);
    let mut applied = 0;
    block_on(poll_loop(
        &adapter,
        || {
            ticks.set(ticks.get() + 1);
            if ticks.get() == 1 {
                adapter.store().set_fail_fetches(false);
            } else {
                adapter.liveness().kill();
            }
            std::future::ready(())
        },
        |_| applied += 1,
    ));
    assert_eq!(applied, 1);
}
