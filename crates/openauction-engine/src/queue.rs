//! Ordered queue of players pending auction.
//!
//! Position is the ordering key. The shuffle is an unbiased Fisher–Yates
//! permutation of every entry except a pinned id, which is restored to the
//! front — the player under the hammer stays first.

use openauction_types::PlayerId;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Ordered, mutable sequence of pending player ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerQueue {
    entries: Vec<PlayerId>,
}

impl PlayerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_players(entries: Vec<PlayerId>) -> Self {
        Self { entries }
    }

    /// Append a player at the back.
    pub fn push_back(&mut self, player_id: PlayerId) {
        self.entries.push(player_id);
    }

    /// Remove a player wherever it sits. Returns whether it was present.
    pub fn remove(&mut self, player_id: PlayerId) -> bool {
        match self.entries.iter().position(|&p| p == player_id) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// The player at the front, without removing it.
    #[must_use]
    pub fn peek_head(&self) -> Option<PlayerId> {
        self.entries.first().copied()
    }

    /// Remove and return the player at the front.
    pub fn pop_head(&mut self) -> Option<PlayerId> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    #[must_use]
    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.entries.contains(&player_id)
    }

    /// Fisher–Yates shuffle of all entries except `pinned`, which — if
    /// present — ends up at position 0.
    pub fn shuffle_excluding<R: Rng + ?Sized>(&mut self, pinned: Option<PlayerId>, rng: &mut R) {
        let pin = pinned.filter(|&p| self.remove(p));
        self.entries.shuffle(rng);
        if let Some(p) = pin {
            self.entries.insert(0, p);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The pending order, front first.
    #[must_use]
    pub fn as_slice(&self) -> &[PlayerId] {
        &self.entries
    }
}
