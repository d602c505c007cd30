//! Error types for the OpenAuction engine.
//!
//! All errors use the `AU_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Auction lifecycle errors
//! - 2xx: Bid errors
//! - 3xx: Budget errors
//! - 4xx: Queue errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AuctionId, AuctionStatus, PlayerId, TeamId};

/// Central error enum for all OpenAuction operations.
#[derive(Debug, Error)]
pub enum AuctionError {
    // =================================================================
    // Auction Lifecycle Errors (1xx)
    // =================================================================
    /// The requested control action is not valid in the auction's current
    /// status. Names the status the action requires.
    #[error("AU_ERR_100: Precondition failed: {action} requires {required}, auction is {actual}")]
    PreconditionFailed {
        action: &'static str,
        required: &'static str,
        actual: AuctionStatus,
    },

    /// A bid was placed while the auction was not live.
    #[error("AU_ERR_101: Auction is not live (status: {0})")]
    AuctionNotLive(AuctionStatus),

    /// The requested auction does not exist in the registry.
    #[error("AU_ERR_102: Auction not found: {0}")]
    AuctionNotFound(AuctionId),

    /// The bidding team is not registered as a participant of this auction.
    #[error("AU_ERR_103: Team not registered for auction: {0}")]
    TeamNotRegistered(TeamId),

    /// A team attempted to join an auction it already participates in.
    #[error("AU_ERR_104: Team already registered: {0}")]
    TeamAlreadyRegistered(TeamId),

    /// The auction already holds the maximum number of participants.
    #[error("AU_ERR_105: Participant limit reached ({limit} teams)")]
    ParticipantLimitReached { limit: usize },

    // =================================================================
    // Bid Errors (2xx)
    // =================================================================
    /// The bid amount does not beat the current floor (the active bid's
    /// amount, or the player's base price when no bid is active).
    #[error("AU_ERR_200: Bid too low: offered {offered}, minimum {minimum}")]
    BidTooLow { offered: Decimal, minimum: Decimal },

    /// The referenced player is not the auction's current player. Also
    /// returned when a stale settlement retry targets an already-advanced
    /// item (idempotency guard).
    #[error("AU_ERR_201: Not the current player: {requested} (current: {current:?})")]
    NotCurrentPlayer {
        requested: PlayerId,
        current: Option<PlayerId>,
    },

    /// The player is not part of this auction's catalog.
    #[error("AU_ERR_202: Player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// A bid targeted a player whose standing bid was already settled as
    /// won. A settled book only changes through an explicit reset.
    #[error("AU_ERR_203: Player already sold: {0}")]
    PlayerAlreadySold(PlayerId),

    // =================================================================
    // Budget Errors (3xx)
    // =================================================================
    /// The debit would drive the participant's remaining budget negative.
    #[error("AU_ERR_300: Insufficient budget: need {needed}, have {remaining}")]
    InsufficientBudget { needed: Decimal, remaining: Decimal },

    // =================================================================
    // Queue Errors (4xx)
    // =================================================================
    /// The auction cannot start: its player queue is empty.
    #[error("AU_ERR_400: Player queue is empty")]
    EmptyQueue,

    /// The player is not in the pending queue.
    #[error("AU_ERR_401: Player not in queue: {0}")]
    PlayerNotInQueue(PlayerId),

    /// The player catalog is larger than a single auction queue may hold.
    #[error("AU_ERR_402: Queue over capacity: {offered} players, limit {limit}")]
    QueueOverCapacity { offered: usize, limit: usize },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("AU_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("AU_ERR_901: Serialization error: {0}")]
    Serialization(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, AuctionError>;

impl From<serde_json::Error> for AuctionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = AuctionError::AuctionNotFound(AuctionId::new());
        let msg = format!("{err}");
        assert!(msg.starts_with("AU_ERR_102"), "Got: {msg}");
    }

    #[test]
    fn bid_too_low_display() {
        let err = AuctionError::BidTooLow {
            offered: Decimal::new(1000, 0),
            minimum: Decimal::new(1500, 0),
        };
        let msg = format!("{err}");
        assert!(msg.contains("AU_ERR_200"));
        assert!(msg.contains("1000"));
        assert!(msg.contains("1500"));
    }

    #[test]
    fn precondition_failed_display() {
        let err = AuctionError::PreconditionFailed {
            action: "pause",
            required: "LIVE",
            actual: AuctionStatus::Upcoming,
        };
        let msg = format!("{err}");
        assert!(msg.contains("AU_ERR_100"));
        assert!(msg.contains("pause"));
        assert!(msg.contains("LIVE"));
        assert!(msg.contains("UPCOMING"));
    }

    #[test]
    fn all_errors_have_au_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(AuctionError::EmptyQueue),
            Box::new(AuctionError::AuctionNotLive(AuctionStatus::Paused)),
            Box::new(AuctionError::PlayerNotInQueue(PlayerId::new())),
            Box::new(AuctionError::TeamNotRegistered(TeamId::new())),
            Box::new(AuctionError::ParticipantLimitReached { limit: 64 }),
            Box::new(AuctionError::PlayerAlreadySold(PlayerId::new())),
            Box::new(AuctionError::QueueOverCapacity {
                offered: 10_001,
                limit: 10_000,
            }),
            Box::new(AuctionError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("AU_ERR_"),
                "Error missing AU_ERR_ prefix: {msg}"
            );
        }
    }
}
