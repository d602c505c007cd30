//! Catalog entries read from external collaborators.
//!
//! The engine never owns player or team CRUD; it reads base price and
//! identity from the player catalog, and the gateway reads team metadata
//! for notification payload enrichment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PlayerId, TeamId};

/// Catalog entry for a player (the auctioned item).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub name: String,
    /// The opening floor for bidding on this player.
    pub base_price: Decimal,
}

impl PlayerInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, base_price: Decimal) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            base_price,
        }
    }
}

/// Catalog entry for a team (the bidder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub id: TeamId,
    pub name: String,
    pub logo_url: Option<String>,
}

impl TeamInfo {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TeamId::new(),
            name: name.into(),
            logo_url: None,
        }
    }
}
