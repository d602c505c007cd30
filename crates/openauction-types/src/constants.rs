//! System-wide constants for the OpenAuction engine.

use rust_decimal::Decimal;

/// Default per-team budget when none is configured (whole currency units).
pub const DEFAULT_BUDGET_PER_TEAM: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

/// Default capacity of the per-auction event broadcast channel.
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Maximum participants per auction.
pub const MAX_TEAMS_PER_AUCTION: usize = 64;

/// Maximum players in a single auction queue.
pub const MAX_QUEUE_LENGTH: usize = 10_000;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenAuction";
