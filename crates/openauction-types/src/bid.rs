//! Bid types for the OpenAuction ledger.
//!
//! Bids are append-only: a bid's status changes when it is superseded
//! (→ `Outbid`), settled (→ `Won`), or forfeited by an administrative skip
//! (→ `Withdrawn`), but a bid record is never deleted except by auction reset.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AuctionId, BidId, PlayerId, TeamId};

/// Lifecycle status of a bid.
///
/// For any (auction, player) pair at most one bid is `Active` or `Won`
/// at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BidStatus {
    /// The standing highest bid on the current player.
    Active,
    /// Superseded by a higher bid.
    Outbid,
    /// The player was sold to this bid.
    Won,
    /// Forfeited by an administrative skip.
    Withdrawn,
}

impl std::fmt::Display for BidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Outbid => write!(f, "OUTBID"),
            Self::Won => write!(f, "WON"),
            Self::Withdrawn => write!(f, "WITHDRAWN"),
        }
    }
}

/// One record per bid placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bid {
    pub id: BidId,
    pub auction_id: AuctionId,
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub amount: Decimal,
    pub status: BidStatus,
    /// Strictly increasing per (auction, player), assigned at insert time.
    pub sequence: u64,
    /// The bid this one superseded, forming the outbid chain.
    pub outbid: Option<BidId>,
    pub placed_at: DateTime<Utc>,
}

impl Bid {
    /// Whether this bid still counts toward the item's outcome.
    #[must_use]
    pub fn is_standing(&self) -> bool {
        matches!(self.status, BidStatus::Active | BidStatus::Won)
    }
}

/// Test helpers.
#[cfg(test)]
impl Bid {
    pub fn dummy(team_id: TeamId, amount: Decimal, sequence: u64) -> Self {
        let auction_id = AuctionId::new();
        let player_id = PlayerId::new();
        Self {
            id: BidId::deterministic(auction_id, player_id, sequence),
            auction_id,
            player_id,
            team_id,
            amount,
            status: BidStatus::Active,
            sequence,
            outbid: None,
            placed_at: Utc::now(),
        }
    }
}
