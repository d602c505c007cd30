//! Participant (team-in-auction) accounting types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PlayerId, TeamId};

/// One participant per (auction, team).
///
/// `remaining_budget` never goes negative; it decreases only when a player
/// is settled as sold to this team, never when a bid is merely placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub team_id: TeamId,
    pub remaining_budget: Decimal,
    pub won_players: Vec<PlayerId>,
}

impl Participant {
    /// A fresh participant with the auction's full budget and no wins.
    #[must_use]
    pub fn new(team_id: TeamId, budget: Decimal) -> Self {
        Self {
            team_id,
            remaining_budget: budget,
            won_players: Vec::new(),
        }
    }

    /// Total amount this participant has spent so far.
    #[must_use]
    pub fn spent(&self, initial_budget: Decimal) -> Decimal {
        initial_budget - self.remaining_budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_participant_has_full_budget() {
        let budget = Decimal::new(100_000, 0);
        let p = Participant::new(TeamId::new(), budget);
        assert_eq!(p.remaining_budget, budget);
        assert!(p.won_players.is_empty());
        assert_eq!(p.spent(budget), Decimal::ZERO);
    }

    #[test]
    fn spent_tracks_debits() {
        let budget = Decimal::new(100_000, 0);
        let mut p = Participant::new(TeamId::new(), budget);
        p.remaining_budget -= Decimal::new(15_000, 0);
        assert_eq!(p.spent(budget), Decimal::new(15_000, 0));
    }
}
