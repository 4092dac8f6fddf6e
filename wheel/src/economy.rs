//! Energy economy: the team balance and the set of active markers.
//!
//! A marker is keyed by `ringId-tileId`. Toggling a tile either activates it
//! (spend its cost) or deactivates it (refund the cost). The set is rebuilt
//! from the tiles' `energypoint` flags on every load and kept in lockstep
//! with them on every toggle, so the two never disagree.
//!
//! Rejected clicks are ordinary [`ClickOutcome`] values, not errors.

#[cfg(test)]
#[path = "economy_test.rs"]
mod economy_test;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::board::{BoardConfig, RingId, TileId};
use crate::input::TileRef;

/// Composite key identifying an active marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerKey {
    pub ring_id: RingId,
    pub tile_id: TileId,
}

impl MarkerKey {
    #[must_use]
    pub fn new(ring_id: RingId, tile_id: TileId) -> Self {
        Self { ring_id, tile_id }
    }
}

impl From<TileRef> for MarkerKey {
    fn from(tile: TileRef) -> Self {
        Self::new(tile.ring_id, tile.tile_id)
    }
}

impl fmt::Display for MarkerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.ring_id, self.tile_id)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid marker key {0:?}, expected `ring-tile`")]
pub struct MarkerKeyError(String);

impl FromStr for MarkerKey {
    type Err = MarkerKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ring, tile) = s.split_once('-').ok_or_else(|| MarkerKeyError(s.to_owned()))?;
        match (ring.parse(), tile.parse()) {
            (Ok(ring_id), Ok(tile_id)) => Ok(Self { ring_id, tile_id }),
            _ => Err(MarkerKeyError(s.to_owned())),
        }
    }
}

/// Ordered set of active marker keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveMarkerSet {
    keys: BTreeSet<MarkerKey>,
}

impl ActiveMarkerSet {
    #[must_use]
    pub fn from_board(board: &BoardConfig) -> Self {
        Self { keys: board.marker_keys().into_iter().collect() }
    }

    #[must_use]
    pub fn contains(&self, key: MarkerKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = MarkerKey> + '_ {
        self.keys.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Why a tile click did nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Activation costs more than the current balance.
    InsufficientEnergy { cost: u32, balance: u32 },
    /// The game clock has run out; only refunds are allowed.
    TimeExpired,
    /// Ring title tiles cannot hold markers.
    NotInteractive,
    /// No such ring or tile on the board.
    UnknownTile,
    /// The click arrived during or right after a drag.
    Suppressed,
    /// The view is read-only.
    ReadOnly,
}

/// Result of a tile click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Activated { key: MarkerKey, cost: u32 },
    Deactivated { key: MarkerKey, refund: u32 },
    Rejected(Rejection),
}

impl ClickOutcome {
    /// Signed balance change this outcome applied, if any.
    #[must_use]
    pub fn energy_delta(&self) -> Option<i64> {
        match self {
            Self::Activated { cost, .. } => Some(-i64::from(*cost)),
            Self::Deactivated { refund, .. } => Some(i64::from(*refund)),
            Self::Rejected(_) => None,
        }
    }

    #[must_use]
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

/// The team's energy balance plus the markers it has placed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Economy {
    balance: u32,
    markers: ActiveMarkerSet,
}

impl Economy {
    #[must_use]
    pub fn new(balance: u32) -> Self {
        Self { balance, markers: ActiveMarkerSet::default() }
    }

    /// Economy for a freshly loaded board: markers restored from tile flags.
    #[must_use]
    pub fn from_board(board: &BoardConfig, balance: u32) -> Self {
        Self { balance, markers: ActiveMarkerSet::from_board(board) }
    }

    #[must_use]
    pub fn balance(&self) -> u32 {
        self.balance
    }

    /// Adopt an authoritative balance from the store.
    pub fn set_balance(&mut self, balance: u32) {
        self.balance = balance;
    }

    #[must_use]
    pub fn markers(&self) -> &ActiveMarkerSet {
        &self.markers
    }

    #[must_use]
    pub fn is_active(&self, key: MarkerKey) -> bool {
        self.markers.contains(key)
    }

    /// Toggle the marker on `tile`, updating the balance, the marker set and
    /// the tile's active flag together.
    pub fn toggle(&mut self, board: &mut BoardConfig, tile: TileRef, time_expired: bool) -> ClickOutcome {
        let key = MarkerKey::from(tile);
        let Some(target) = board.tile_mut(tile.ring_id, tile.tile_id) else {
            return ClickOutcome::Rejected(Rejection::UnknownTile);
        };
        if !target.is_interactive() {
            return ClickOutcome::Rejected(Rejection::NotInteractive);
        }
        let cost = target.energy_value;

        if self.markers.keys.remove(&key) {
            target.energy_point = false;
            self.balance = self.balance.saturating_add(cost);
            return ClickOutcome::Deactivated { key, refund: cost };
        }
        if time_expired {
            return ClickOutcome::Rejected(Rejection::TimeExpired);
        }
        if self.balance < cost {
            return ClickOutcome::Rejected(Rejection::InsufficientEnergy { cost, balance: self.balance });
        }
        self.balance -= cost;
        self.markers.keys.insert(key);
        target.energy_point = true;
        ClickOutcome::Activated { key, cost }
    }
}
