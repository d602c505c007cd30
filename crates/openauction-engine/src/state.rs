//! The auction state machine.
//!
//! [`AuctionState`] is the owned aggregate for one auction: it composes the
//! player queue, bid ledger, and budget ledger, and is the only place their
//! state is mutated. Every operation validates the auction's status first,
//! applies all of its effects, and returns the events to publish — the caller
//! (the engine's critical section) publishes them only after the operation
//! returns `Ok`, so a failed operation is never observable.
//!
//! The current player remains in the queue while under the hammer; settlement
//! removes it and selects the new head. A settlement call carries the
//! caller's view of the current player, so a stale retry fails with
//! `NotCurrentPlayer` instead of debiting a budget twice.

use std::collections::HashMap;

use chrono::Utc;
use openauction_types::{
    AuctionConfig, AuctionError, AuctionEvent, AuctionId, AuctionSnapshot, AuctionStatus, Bid,
    CurrentBid, PlayerId, PlayerInfo, Result, TeamId, UnsoldReason, constants,
};
use rand::Rng;
use rust_decimal::Decimal;

use crate::bid_ledger::BidLedger;
use crate::budget::BudgetLedger;
use crate::queue::PlayerQueue;

/// How the current player's settlement resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Sold { team: TeamId, amount: Decimal },
    Unsold { reason: UnsoldReason },
}

/// One auction's aggregate state.
#[derive(Debug, Clone)]
pub struct AuctionState {
    id: AuctionId,
    config: AuctionConfig,
    status: AuctionStatus,
    /// Base price and identity for every player in this auction.
    catalog: HashMap<PlayerId, PlayerInfo>,
    queue: PlayerQueue,
    bids: BidLedger,
    budgets: BudgetLedger,
    current_player: Option<PlayerId>,
    current_bid: Option<CurrentBid>,
    sold_count: u64,
    unsold_count: u64,
}

impl AuctionState {
    /// Create an auction in `Upcoming` with the given players queued in
    /// catalog order.
    #[must_use]
    pub fn new(id: AuctionId, config: AuctionConfig, players: Vec<PlayerInfo>) -> Self {
        let queue = PlayerQueue::from_players(players.iter().map(|p| p.id).collect());
        let catalog = players.into_iter().map(|p| (p.id, p)).collect();
        Self {
            id,
            config,
            status: AuctionStatus::Upcoming,
            catalog,
            queue,
            bids: BidLedger::new(id),
            budgets: BudgetLedger::new(),
            current_player: None,
            current_bid: None,
            sold_count: 0,
            unsold_count: 0,
        }
    }

    // =====================================================================
    // Participants
    // =====================================================================

    /// Register a team with the configured budget.
    ///
    /// # Errors
    /// `PreconditionFailed` in a terminal status, `TeamAlreadyRegistered`
    /// for a duplicate join, `ParticipantLimitReached` when the auction is
    /// full.
    pub fn register_team(&mut self, team_id: TeamId) -> Result<()> {
        if self.status.is_terminal() {
            return Err(self.precondition("register-team", "any non-terminal status"));
        }
        if self.budgets.len() >= constants::MAX_TEAMS_PER_AUCTION {
            return Err(AuctionError::ParticipantLimitReached {
                limit: constants::MAX_TEAMS_PER_AUCTION,
            });
        }
        self.budgets.register(team_id, self.config.budget_per_team)
    }

    // =====================================================================
    // Lifecycle controls
    // =====================================================================

    /// Begin the auction: the queue head goes under the hammer at its base
    /// price.
    pub fn start(&mut self) -> Result<Vec<AuctionEvent>> {
        self.require(AuctionStatus::Upcoming, "start", "UPCOMING")?;
        let first = self.queue.peek_head().ok_or(AuctionError::EmptyQueue)?;
        let opening = self.opening_bid(first)?;

        self.status = AuctionStatus::Live;
        self.current_player = Some(first);
        self.current_bid = Some(opening);
        tracing::info!(auction = %self.id, player = %first, "auction started");
        Ok(vec![AuctionEvent::AuctionStarted { first_player: first }])
    }

    /// Live → Paused. No other side effects.
    pub fn pause(&mut self) -> Result<Vec<AuctionEvent>> {
        self.require(AuctionStatus::Live, "pause", "LIVE")?;
        self.status = AuctionStatus::Paused;
        Ok(vec![AuctionEvent::AuctionPaused])
    }

    /// Paused → Live. No other side effects.
    pub fn resume(&mut self) -> Result<Vec<AuctionEvent>> {
        self.require(AuctionStatus::Paused, "resume", "PAUSED")?;
        self.status = AuctionStatus::Live;
        Ok(vec![AuctionEvent::AuctionResumed])
    }

    /// End the auction. Remaining queued players are left unsettled.
    pub fn stop(&mut self) -> Result<Vec<AuctionEvent>> {
        if !matches!(self.status, AuctionStatus::Live | AuctionStatus::Paused) {
            return Err(self.precondition("stop", "LIVE or PAUSED"));
        }
        self.status = AuctionStatus::Completed;
        self.current_player = None;
        self.current_bid = None;
        tracing::info!(auction = %self.id, "auction stopped");
        Ok(vec![AuctionEvent::AuctionEnded])
    }

    /// Cancel the auction from any non-terminal status.
    pub fn cancel(&mut self) -> Result<Vec<AuctionEvent>> {
        if self.status.is_terminal() {
            return Err(self.precondition("cancel", "any non-terminal status"));
        }
        self.status = AuctionStatus::Cancelled;
        self.current_player = None;
        self.current_bid = None;
        Ok(vec![AuctionEvent::AuctionCancelled])
    }

    // =====================================================================
    // Settlement
    // =====================================================================

    /// Settle the current player and advance to the next.
    ///
    /// `expected_current` is the caller's view of the player under the
    /// hammer; if the auction has already advanced past it, the call fails
    /// with `NotCurrentPlayer` and nothing changes — a timer-driven retry
    /// can never double-settle.
    pub fn advance_to_next(&mut self, expected_current: PlayerId) -> Result<Vec<AuctionEvent>> {
        self.require(AuctionStatus::Live, "next-player", "LIVE")?;
        let current = self.expect_current(expected_current)?;

        let standing = self
            .bids
            .active_bid(current)
            .map(|bid| (bid.team_id, bid.amount));

        let outcome = match standing {
            Some((team, amount)) => {
                // Debit first: if the budget check fails, no bid status or
                // count has changed yet and the error propagates cleanly.
                self.budgets.record_win(team, current, amount)?;
                self.bids.mark_won(current);
                self.sold_count += 1;
                Outcome::Sold { team, amount }
            }
            None => {
                self.unsold_count += 1;
                Outcome::Unsold {
                    reason: UnsoldReason::NoBids,
                }
            }
        };

        self.finish_settlement(current, outcome)
    }

    /// Record the current player as unsold and advance, forfeiting any
    /// standing bid. An administrative skip never produces a sale.
    pub fn skip_current(&mut self, expected_current: PlayerId) -> Result<Vec<AuctionEvent>> {
        self.require(AuctionStatus::Live, "skip-player", "LIVE")?;
        let current = self.expect_current(expected_current)?;

        self.bids.forfeit_active(current);
        self.unsold_count += 1;
        self.finish_settlement(
            current,
            Outcome::Unsold {
                reason: UnsoldReason::Skipped,
            },
        )
    }

    /// Administrative override: put `player` under the hammer without
    /// settling the previous current player or consuming the queue.
    pub fn set_current_player(&mut self, player: PlayerId) -> Result<Vec<AuctionEvent>> {
        self.require(AuctionStatus::Live, "set-player", "LIVE")?;
        if !self.queue.contains(player) {
            return Err(AuctionError::PlayerNotInQueue(player));
        }
        let opening = self.opening_bid(player)?;
        self.current_player = Some(player);
        self.current_bid = Some(opening);
        Ok(vec![AuctionEvent::PlayerChanged {
            player,
            opening_bid: opening,
        }])
    }

    /// Shuffle the pending queue, keeping the current player first.
    pub fn shuffle_queue<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Vec<AuctionEvent>> {
        if self.status.is_terminal() {
            return Err(self.precondition("shuffle", "UPCOMING, LIVE or PAUSED"));
        }
        self.queue.shuffle_excluding(self.current_player, rng);
        Ok(Vec::new())
    }

    /// Administrative reset: purge bids, restore budgets, zero counters,
    /// return to `Upcoming`. Players already settled out of the queue are
    /// not requeued and the surviving queue order is kept.
    pub fn reset(&mut self) -> Result<Vec<AuctionEvent>> {
        if self.status == AuctionStatus::Live {
            return Err(self.precondition("reset", "any status except LIVE"));
        }
        self.current_player = None;
        self.current_bid = None;
        self.sold_count = 0;
        self.unsold_count = 0;
        self.bids.purge();
        self.budgets.reset_all(self.config.budget_per_team);
        self.status = AuctionStatus::Upcoming;
        tracing::info!(auction = %self.id, "auction reset");
        Ok(vec![AuctionEvent::ResetDone])
    }

    // =====================================================================
    // Bidding
    // =====================================================================

    /// Place a bid on the current player.
    ///
    /// The team's budget is checked here but debited only at settlement.
    /// Returns the inserted bid, the updated snapshot, and the event to
    /// publish after commit.
    pub fn place_bid(
        &mut self,
        team_id: TeamId,
        player_id: PlayerId,
        amount: Decimal,
    ) -> Result<(Bid, CurrentBid, AuctionEvent)> {
        if self.status != AuctionStatus::Live {
            return Err(AuctionError::AuctionNotLive(self.status));
        }
        if self.current_player != Some(player_id) {
            return Err(AuctionError::NotCurrentPlayer {
                requested: player_id,
                current: self.current_player,
            });
        }
        if !self.budgets.is_registered(team_id) {
            return Err(AuctionError::TeamNotRegistered(team_id));
        }

        // The floor is the standing bid's amount (must be beaten strictly)
        // or the base price (may be matched) when nobody has bid yet.
        let prior = self.bids.active_bid(player_id).cloned();
        let base_price = self.base_price(player_id)?;
        let too_low = match &prior {
            Some(active) => amount <= active.amount,
            None => amount < base_price,
        };
        if too_low {
            let minimum = prior.as_ref().map_or(base_price, |b| b.amount);
            return Err(AuctionError::BidTooLow {
                offered: amount,
                minimum,
            });
        }

        let remaining = self.budgets.remaining(team_id)?;
        if remaining < amount {
            return Err(AuctionError::InsufficientBudget {
                needed: amount,
                remaining,
            });
        }

        let bid = self.bids.place(player_id, team_id, amount)?;
        let snapshot = CurrentBid {
            amount,
            team: Some(team_id),
        };
        self.current_bid = Some(snapshot);
        tracing::debug!(
            auction = %self.id,
            player = %player_id,
            team = %team_id,
            %amount,
            sequence = bid.sequence,
            "bid placed"
        );
        let event = AuctionEvent::BidPlaced {
            player: player_id,
            team: team_id,
            amount,
            outbid_team: prior.map(|b| b.team_id),
        };
        Ok((bid, snapshot, event))
    }

    // =====================================================================
    // Read side
    // =====================================================================

    #[must_use]
    pub fn id(&self) -> AuctionId {
        self.id
    }

    #[must_use]
    pub fn status(&self) -> AuctionStatus {
        self.status
    }

    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.current_player
    }

    #[must_use]
    pub fn current_bid(&self) -> Option<CurrentBid> {
        self.current_bid
    }

    #[must_use]
    pub fn sold_count(&self) -> u64 {
        self.sold_count
    }

    #[must_use]
    pub fn unsold_count(&self) -> u64 {
        self.unsold_count
    }

    /// The unique standing (active or won) bid for a player.
    #[must_use]
    pub fn highest_bid(&self, player_id: PlayerId) -> Option<&Bid> {
        self.bids.highest(player_id)
    }

    /// Full bid history for a player.
    #[must_use]
    pub fn bid_history(&self, player_id: PlayerId) -> &[Bid] {
        self.bids.bids_for(player_id)
    }

    /// Remaining budget for a team.
    pub fn remaining_budget(&self, team_id: TeamId) -> Result<Decimal> {
        self.budgets.remaining(team_id)
    }

    /// Catalog lookup.
    #[must_use]
    pub fn player(&self, player_id: PlayerId) -> Option<&PlayerInfo> {
        self.catalog.get(&player_id)
    }

    /// Read-side projection of the last-committed state.
    #[must_use]
    pub fn snapshot(&self) -> AuctionSnapshot {
        AuctionSnapshot {
            auction_id: self.id,
            status: self.status,
            current_player: self.current_player,
            current_bid: self.current_bid,
            queue: self.queue.as_slice().to_vec(),
            sold_count: self.sold_count,
            unsold_count: self.unsold_count,
            participants: self.budgets.participants(),
            as_of: Utc::now(),
        }
    }

    // =====================================================================
    // Internals
    // =====================================================================

    /// Steps 3–5 of settlement: dequeue the settled player, select the next
    /// head or complete the auction, and assemble the event list.
    fn finish_settlement(
        &mut self,
        settled: PlayerId,
        outcome: Outcome,
    ) -> Result<Vec<AuctionEvent>> {
        self.queue.remove(settled);

        let mut events = Vec::with_capacity(2);
        match outcome {
            Outcome::Sold { team, amount } => {
                tracing::info!(
                    auction = %self.id,
                    player = %settled,
                    %team,
                    %amount,
                    "player sold"
                );
                events.push(AuctionEvent::PlayerSold {
                    player: settled,
                    team,
                    amount,
                });
            }
            Outcome::Unsold { reason } => {
                tracing::info!(auction = %self.id, player = %settled, %reason, "player unsold");
                events.push(AuctionEvent::PlayerUnsold {
                    player: settled,
                    reason,
                });
            }
        }

        match self.queue.peek_head() {
            Some(next) => {
                let opening = self.opening_bid(next)?;
                self.current_player = Some(next);
                self.current_bid = Some(opening);
                events.push(AuctionEvent::PlayerChanged {
                    player: next,
                    opening_bid: opening,
                });
            }
            None => {
                self.current_player = None;
                self.current_bid = None;
                self.status = AuctionStatus::Completed;
                tracing::info!(auction = %self.id, "queue drained, auction completed");
                events.push(AuctionEvent::AuctionEnded);
            }
        }
        Ok(events)
    }

    fn expect_current(&self, expected: PlayerId) -> Result<PlayerId> {
        match self.current_player {
            Some(current) if current == expected => Ok(current),
            current => Err(AuctionError::NotCurrentPlayer {
                requested: expected,
                current,
            }),
        }
    }

    fn opening_bid(&self, player_id: PlayerId) -> Result<CurrentBid> {
        Ok(CurrentBid::opening(self.base_price(player_id)?))
    }

    fn base_price(&self, player_id: PlayerId) -> Result<Decimal> {
        self.catalog
            .get(&player_id)
            .map(|p| p.base_price)
            .ok_or(AuctionError::PlayerNotFound(player_id))
    }

    fn require(
        &self,
        status: AuctionStatus,
        action: &'static str,
        required: &'static str,
    ) -> Result<()> {
        if self.status == status {
            Ok(())
        } else {
            Err(self.precondition(action, required))
        }
    }

    fn precondition(&self, action: &'static str, required: &'static str) -> AuctionError {
        AuctionError::PreconditionFailed {
            action,
            required,
            actual: self.status,
        }
    }
}
