//! Budget accounting for auction participants.
//!
//! Tracks per-team remaining budgets and won-player lists for one auction.
//! All mutations are atomic: either the full operation succeeds or the
//! participant is unchanged. Budgets move only during settlement and reset,
//! never when a bid is merely placed.

use std::collections::BTreeMap;

use openauction_types::{AuctionError, Participant, PlayerId, Result, TeamId};
use rust_decimal::Decimal;

/// The source of truth for participant budget state within one auction.
///
/// The state machine calls into it during settlement (`record_win`) and
/// administrative reset (`reset_all`).
#[derive(Debug, Clone)]
pub struct BudgetLedger {
    /// Per-team participants, iterated in stable team-id order.
    participants: BTreeMap<TeamId, Participant>,
}

impl BudgetLedger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            participants: BTreeMap::new(),
        }
    }

    /// Register a team with its starting budget.
    ///
    /// # Errors
    /// Returns `TeamAlreadyRegistered` if the team already participates.
    pub fn register(&mut self, team_id: TeamId, budget: Decimal) -> Result<()> {
        if self.participants.contains_key(&team_id) {
            return Err(AuctionError::TeamAlreadyRegistered(team_id));
        }
        self.participants
            .insert(team_id, Participant::new(team_id, budget));
        Ok(())
    }

    /// Remaining budget for a team.
    ///
    /// # Errors
    /// Returns `TeamNotRegistered` if the team never joined.
    pub fn remaining(&self, team_id: TeamId) -> Result<Decimal> {
        self.participants
            .get(&team_id)
            .map(|p| p.remaining_budget)
            .ok_or(AuctionError::TeamNotRegistered(team_id))
    }

    /// Debit a winning amount and record the won player, as one step.
    ///
    /// # Errors
    /// Returns `TeamNotRegistered` for an unknown team, or
    /// `InsufficientBudget` if the debit would drive the budget negative —
    /// in which case nothing changes.
    pub fn record_win(&mut self, team_id: TeamId, player_id: PlayerId, amount: Decimal) -> Result<()> {
        let participant = self
            .participants
            .get_mut(&team_id)
            .ok_or(AuctionError::TeamNotRegistered(team_id))?;

        if participant.remaining_budget < amount {
            return Err(AuctionError::InsufficientBudget {
                needed: amount,
                remaining: participant.remaining_budget,
            });
        }

        participant.remaining_budget -= amount;
        participant.won_players.push(player_id);
        Ok(())
    }

    /// Restore every participant to the initial budget with no wins.
    pub fn reset_all(&mut self, initial_budget: Decimal) {
        for participant in self.participants.values_mut() {
            participant.remaining_budget = initial_budget;
            participant.won_players.clear();
        }
    }

    /// Whether a team is registered.
    #[must_use]
    pub fn is_registered(&self, team_id: TeamId) -> bool {
        self.participants.contains_key(&team_id)
    }

    /// Snapshot of all participants in stable order.
    #[must_use]
    pub fn participants(&self) -> Vec<Participant> {
        self.participants.values().cloned().collect()
    }

    /// Number of registered teams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether no team has registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

impl Default for BudgetLedger {
    fn default() -> Self {
        Self::new()
    }
}
