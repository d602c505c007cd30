//! Configuration types for OpenAuction engines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for a single auction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionConfig {
    /// Budget granted to every participant when it joins (and on reset).
    pub budget_per_team: Decimal,
    /// Capacity of the per-auction event broadcast channel.
    pub event_channel_capacity: usize,
}

impl AuctionConfig {
    #[must_use]
    pub fn new(budget_per_team: Decimal) -> Self {
        Self {
            budget_per_team,
            event_channel_capacity: constants::DEFAULT_EVENT_CHANNEL_CAPACITY,
        }
    }
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self::new(constants::DEFAULT_BUDGET_PER_TEAM)
    }
}
