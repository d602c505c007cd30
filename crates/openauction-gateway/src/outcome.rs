//! Sold/unsold outcome history with digest-stamped records.
//!
//! The outcome log is the append-only history a player's own record links
//! back to. It is written from committed events, outside the engine's
//! transaction boundary: losing a record is a reporting gap, never an
//! engine invariant violation. Each record carries a SHA-256 digest over
//! its serialized payload so downstream stores can detect tampering.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use openauction_types::{
    AuctionEvent, AuctionId, CommittedEvent, PlayerId, Result, TeamId, UnsoldReason,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// How one player's auction appearance resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlayerOutcome {
    Sold { team: TeamId, amount: Decimal },
    Unsold { reason: UnsoldReason },
}

/// One appearance of a player in an auction, with its resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub auction_id: AuctionId,
    pub player_id: PlayerId,
    pub outcome: PlayerOutcome,
    pub settled_at: DateTime<Utc>,
    /// Hex SHA-256 over the serialized record body.
    pub digest: String,
}

impl OutcomeRecord {
    fn build(
        auction_id: AuctionId,
        player_id: PlayerId,
        outcome: PlayerOutcome,
        settled_at: DateTime<Utc>,
    ) -> Result<Self> {
        let digest = Self::digest_of(auction_id, player_id, &outcome, settled_at)?;
        Ok(Self {
            auction_id,
            player_id,
            outcome,
            settled_at,
            digest,
        })
    }

    /// Recompute the digest and compare. False means the record was altered
    /// after it was written.
    pub fn verify(&self) -> Result<bool> {
        let expected =
            Self::digest_of(self.auction_id, self.player_id, &self.outcome, self.settled_at)?;
        Ok(expected == self.digest)
    }

    fn digest_of(
        auction_id: AuctionId,
        player_id: PlayerId,
        outcome: &PlayerOutcome,
        settled_at: DateTime<Utc>,
    ) -> Result<String> {
        let mut hasher = Sha256::new();
        hasher.update(b"openauction:outcome:v1:");
        hasher.update(auction_id.0.as_bytes());
        hasher.update(player_id.0.as_bytes());
        hasher.update(serde_json::to_vec(outcome)?);
        hasher.update(settled_at.timestamp_micros().to_le_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

/// Append-only outcome history, indexed per player.
#[derive(Debug, Clone, Default)]
pub struct OutcomeLog {
    records: Vec<OutcomeRecord>,
    by_player: HashMap<PlayerId, Vec<usize>>,
}

impl OutcomeLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the outcome carried by a committed event, if it carries one.
    /// Non-settlement events are ignored.
    pub fn observe(&mut self, committed: &CommittedEvent) -> Result<()> {
        let (player_id, outcome) = match committed.event {
            AuctionEvent::PlayerSold {
                player,
                team,
                amount,
            } => (player, PlayerOutcome::Sold { team, amount }),
            AuctionEvent::PlayerUnsold { player, reason } => {
                (player, PlayerOutcome::Unsold { reason })
            }
            _ => return Ok(()),
        };

        let record = OutcomeRecord::build(
            committed.auction_id,
            player_id,
            outcome,
            committed.committed_at,
        )?;
        self.by_player
            .entry(player_id)
            .or_default()
            .push(self.records.len());
        self.records.push(record);
        Ok(())
    }

    /// All outcomes for one player, oldest first. A player can appear once
    /// per auction run, and again after a reset re-runs the auction.
    #[must_use]
    pub fn history_for(&self, player_id: PlayerId) -> Vec<&OutcomeRecord> {
        self.by_player
            .get(&player_id)
            .map(|indices| indices.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    /// All records, in append order.
    #[must_use]
    pub fn records(&self) -> &[OutcomeRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn committed(event: AuctionEvent) -> CommittedEvent {
        CommittedEvent {
            auction_id: AuctionId::new(),
            event,
            committed_at: Utc::now(),
        }
    }

    #[test]
    fn sold_event_is_recorded_with_valid_digest() {
        let mut log = OutcomeLog::new();
        let player = PlayerId::new();
        let team = TeamId::new();
        log.observe(&committed(AuctionEvent::PlayerSold {
            player,
            team,
            amount: Decimal::new(1500, 0),
        }))
        .unwrap();

        let history = log.history_for(player);
        assert_eq!(history.len(), 1);
        assert_eq!(
            history[0].outcome,
            PlayerOutcome::Sold {
                team,
                amount: Decimal::new(1500, 0)
            }
        );
        assert!(history[0].verify().unwrap());
    }

    #[test]
    fn unsold_event_keeps_its_reason() {
        let mut log = OutcomeLog::new();
        let player = PlayerId::new();
        log.observe(&committed(AuctionEvent::PlayerUnsold {
            player,
            reason: UnsoldReason::Skipped,
        }))
        .unwrap();

        assert_eq!(
            log.history_for(player)[0].outcome,
            PlayerOutcome::Unsold {
                reason: UnsoldReason::Skipped
            }
        );
    }

    #[test]
    fn non_settlement_events_are_ignored() {
        let mut log = OutcomeLog::new();
        log.observe(&committed(AuctionEvent::AuctionPaused)).unwrap();
        log.observe(&committed(AuctionEvent::ResetDone)).unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn tampered_record_fails_verification() {
        let mut log = OutcomeLog::new();
        let player = PlayerId::new();
        log.observe(&committed(AuctionEvent::PlayerUnsold {
            player,
            reason: UnsoldReason::NoBids,
        }))
        .unwrap();

        let mut record = log.records()[0].clone();
        record.outcome = PlayerOutcome::Sold {
            team: TeamId::new(),
            amount: Decimal::new(9999, 0),
        };
        assert!(!record.verify().unwrap());
    }

    #[test]
    fn history_keeps_append_order_per_player() {
        let mut log = OutcomeLog::new();
        let player = PlayerId::new();
        // Same player settled in two different runs.
        log.observe(&committed(AuctionEvent::PlayerUnsold {
            player,
            reason: UnsoldReason::NoBids,
        }))
        .unwrap();
        log.observe(&committed(AuctionEvent::PlayerSold {
            player,
            team: TeamId::new(),
            amount: Decimal::new(500, 0),
        }))
        .unwrap();

        let history = log.history_for(player);
        assert_eq!(history.len(), 2);
        assert!(matches!(history[0].outcome, PlayerOutcome::Unsold { .. }));
        assert!(matches!(history[1].outcome, PlayerOutcome::Sold { .. }));
    }
}
