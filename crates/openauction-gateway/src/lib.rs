//! # openauction-gateway
//!
//! **Notification Gateway**: the external-facing collaborator that fans
//! committed auction events out to bidder clients.
//!
//! The gateway subscribes to an auction's broadcast channel and:
//! 1. Renders each [`openauction_types::CommittedEvent`] into a client
//!    payload, enriched with team name/logo from the [`TeamDirectory`]
//! 2. Appends sold/unsold records to the [`OutcomeLog`], each stamped with a
//!    SHA-256 digest for the audit trail
//!
//! Everything here is best effort and runs outside the engine's commit
//! boundary: a slow or lagging gateway never blocks settlement, and a lost
//! notification never violates an engine invariant.

pub mod notify;
pub mod outcome;

pub use notify::{Notification, NotificationGateway, TeamDirectory};
pub use outcome::{OutcomeLog, OutcomeRecord, PlayerOutcome};
