//! Inbound actions consumed by the engine.
//!
//! Callers are already authenticated; every action arrives with a resolved
//! actor identity and is scoped to a single auction id.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AuctionId, PlayerId, TeamId};

/// Administrative control action against one auction.
///
/// Settlement actions (`NextPlayer`, `SkipPlayer`) carry the caller's view of
/// the current player so a stale retry fails with `NotCurrentPlayer` instead
/// of double-settling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum ControlAction {
    Start,
    Pause,
    Resume,
    Stop,
    NextPlayer { expected_current: PlayerId },
    SetPlayer { player: PlayerId },
    SkipPlayer { expected_current: PlayerId },
    Shuffle,
    Reset,
    Cancel,
}

impl ControlAction {
    /// Stable action name for logs and error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Stop => "stop",
            Self::NextPlayer { .. } => "next-player",
            Self::SetPlayer { .. } => "set-player",
            Self::SkipPlayer { .. } => "skip-player",
            Self::Shuffle => "shuffle",
            Self::Reset => "reset",
            Self::Cancel => "cancel",
        }
    }
}

/// A bid placed by a team on the auction's current player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidRequest {
    pub auction_id: AuctionId,
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub amount: Decimal,
}
