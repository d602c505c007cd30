//! Outbound events published by the engine after each committed transition.
//!
//! Events are emitted exactly once per committed transition, after commit,
//! never before. Consumers (the Notification Gateway) subscribe to a
//! per-auction broadcast channel and never see a transition that was rolled
//! back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AuctionId, CurrentBid, PlayerId, TeamId};

/// Why a player went unsold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnsoldReason {
    /// No bids were placed before settlement.
    NoBids,
    /// An administrator skipped the player, forfeiting any standing bid.
    Skipped,
}

impl std::fmt::Display for UnsoldReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoBids => write!(f, "NO_BIDS"),
            Self::Skipped => write!(f, "SKIPPED"),
        }
    }
}

/// A committed auction transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuctionEvent {
    AuctionStarted {
        first_player: PlayerId,
    },
    AuctionPaused,
    AuctionResumed,
    AuctionEnded,
    AuctionCancelled,
    BidPlaced {
        player: PlayerId,
        team: TeamId,
        amount: Decimal,
        /// The bidder this one outbid, if any.
        outbid_team: Option<TeamId>,
    },
    PlayerSold {
        player: PlayerId,
        team: TeamId,
        amount: Decimal,
    },
    PlayerUnsold {
        player: PlayerId,
        reason: UnsoldReason,
    },
    PlayerChanged {
        player: PlayerId,
        opening_bid: CurrentBid,
    },
    ResetDone,
}

impl AuctionEvent {
    /// Stable event name for logs and client payloads.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AuctionStarted { .. } => "auction_started",
            Self::AuctionPaused => "auction_paused",
            Self::AuctionResumed => "auction_resumed",
            Self::AuctionEnded => "auction_ended",
            Self::AuctionCancelled => "auction_cancelled",
            Self::BidPlaced { .. } => "bid_placed",
            Self::PlayerSold { .. } => "player_sold",
            Self::PlayerUnsold { .. } => "player_unsold",
            Self::PlayerChanged { .. } => "player_changed",
            Self::ResetDone => "reset_done",
        }
    }
}

/// An event stamped with its auction and commit time, as published on the
/// broadcast channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedEvent {
    pub auction_id: AuctionId,
    pub event: AuctionEvent,
    pub committed_at: DateTime<Utc>,
}
