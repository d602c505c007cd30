//! Auction lifecycle types and the read-side snapshot.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AuctionId, Participant, PlayerId, TeamId};

/// Lifecycle status of an auction.
///
/// `Completed` and `Cancelled` are terminal for item settlement; an
/// administrative reset returns an auction to `Upcoming`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuctionStatus {
    Upcoming,
    Live,
    Paused,
    Completed,
    Cancelled,
}

impl AuctionStatus {
    /// Whether item settlement can never occur again in this status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upcoming => write!(f, "UPCOMING"),
            Self::Live => write!(f, "LIVE"),
            Self::Paused => write!(f, "PAUSED"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Snapshot of the highest standing bid on the current player.
///
/// When no bid has been placed yet, `amount` is the player's base price and
/// `team` is `None`. Bidders read this to learn the floor they must beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentBid {
    pub amount: Decimal,
    pub team: Option<TeamId>,
}

impl CurrentBid {
    /// The opening snapshot for a freshly selected player.
    #[must_use]
    pub fn opening(base_price: Decimal) -> Self {
        Self {
            amount: base_price,
            team: None,
        }
    }

    /// Whether any team currently holds the bid.
    #[must_use]
    pub fn has_bidder(&self) -> bool {
        self.team.is_some()
    }
}

/// Read-side projection of one auction's last-committed state.
///
/// Published by the engine after every committed transition; readers consume
/// it without touching the auction's critical section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionSnapshot {
    pub auction_id: AuctionId,
    pub status: AuctionStatus,
    /// Set iff the auction is live and a player is under the hammer.
    pub current_player: Option<PlayerId>,
    pub current_bid: Option<CurrentBid>,
    /// Players remaining in the pending queue, in order.
    pub queue: Vec<PlayerId>,
    pub sold_count: u64,
    pub unsold_count: u64,
    pub participants: Vec<Participant>,
    pub as_of: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display() {
        assert_eq!(format!("{}", AuctionStatus::Upcoming), "UPCOMING");
        assert_eq!(format!("{}", AuctionStatus::Live), "LIVE");
        assert_eq!(format!("{}", AuctionStatus::Cancelled), "CANCELLED");
    }

    #[test]
    fn terminal_statuses() {
        assert!(AuctionStatus::Completed.is_terminal());
        assert!(AuctionStatus::Cancelled.is_terminal());
        assert!(!AuctionStatus::Live.is_terminal());
        assert!(!AuctionStatus::Paused.is_terminal());
        assert!(!AuctionStatus::Upcoming.is_terminal());
    }

    #[test]
    fn opening_snapshot_has_no_bidder() {
        let snap = CurrentBid::opening(Decimal::new(1000, 0));
        assert_eq!(snap.amount, Decimal::new(1000, 0));
        assert!(!snap.has_bidder());
    }

    #[test]
    fn status_serde_roundtrip() {
        let status = AuctionStatus::Paused;
        let json = serde_json::to_string(&status).unwrap();
        let back: AuctionStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(status, back);
    }
}
