//! Concurrent multi-auction registry.
//!
//! Each auction lives behind its own `tokio::sync::Mutex` — the per-auction
//! exclusive critical section. Two controls, or a control and a bid, on the
//! same auction never interleave their reads and writes; operations on
//! different auctions proceed fully in parallel.
//!
//! Commit discipline: an operation mutates the state under the lock, and
//! only after it returns `Ok` are its events published on the auction's
//! broadcast channel and the watch snapshot refreshed — still inside the
//! critical section, so subscribers observe transitions in commit order,
//! exactly once each. A failed operation publishes nothing.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use openauction_types::{
    AuctionConfig, AuctionError, AuctionEvent, AuctionId, AuctionSnapshot, Bid, BidRequest,
    CommittedEvent, ControlAction, CurrentBid, PlayerId, PlayerInfo, Result, TeamId, constants,
};
use rust_decimal::Decimal;
use tokio::sync::{Mutex, broadcast, watch};

use crate::state::AuctionState;

/// One registered auction: its state, event channel, and snapshot feed.
pub struct AuctionHandle {
    state: Mutex<AuctionState>,
    events: broadcast::Sender<CommittedEvent>,
    snapshot: watch::Sender<AuctionSnapshot>,
}

/// The engine: routes bids and control actions to per-auction critical
/// sections and publishes committed transitions.
pub struct AuctionEngine {
    auctions: RwLock<HashMap<AuctionId, Arc<AuctionHandle>>>,
}

impl AuctionEngine {
    #[must_use]
    pub fn new() -> Self {
        tracing::info!(
            engine = constants::ENGINE_NAME,
            version = constants::VERSION,
            "engine initialized"
        );
        Self {
            auctions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new auction with its player catalog. Returns its id.
    ///
    /// # Errors
    /// `QueueOverCapacity` when the catalog exceeds the queue limit.
    pub fn create_auction(
        &self,
        config: AuctionConfig,
        players: Vec<PlayerInfo>,
    ) -> Result<AuctionId> {
        if players.len() > constants::MAX_QUEUE_LENGTH {
            return Err(AuctionError::QueueOverCapacity {
                offered: players.len(),
                limit: constants::MAX_QUEUE_LENGTH,
            });
        }
        let auction_id = AuctionId::new();
        let capacity = config.event_channel_capacity;
        let state = AuctionState::new(auction_id, config, players);
        let (events, _) = broadcast::channel(capacity);
        let (snapshot, _) = watch::channel(state.snapshot());

        let handle = Arc::new(AuctionHandle {
            state: Mutex::new(state),
            events,
            snapshot,
        });
        self.auctions
            .write()
            .expect("auction registry lock poisoned")
            .insert(auction_id, handle);
        tracing::info!(auction = %auction_id, "auction registered");
        Ok(auction_id)
    }

    /// Subscribe to an auction's committed events.
    pub fn subscribe(&self, auction_id: AuctionId) -> Result<broadcast::Receiver<CommittedEvent>> {
        Ok(self.handle(auction_id)?.events.subscribe())
    }

    /// Watch an auction's last-committed snapshot. Reads via
    /// [`watch::Receiver::borrow`] never touch the critical section.
    pub fn watch_snapshot(&self, auction_id: AuctionId) -> Result<watch::Receiver<AuctionSnapshot>> {
        Ok(self.handle(auction_id)?.snapshot.subscribe())
    }

    /// The last-committed snapshot of an auction.
    pub fn snapshot(&self, auction_id: AuctionId) -> Result<AuctionSnapshot> {
        Ok(self.handle(auction_id)?.snapshot.borrow().clone())
    }

    /// Join a team to an auction with the configured budget.
    pub async fn register_team(&self, auction_id: AuctionId, team_id: TeamId) -> Result<()> {
        self.with_state(auction_id, |state| {
            state.register_team(team_id)?;
            Ok(((), Vec::new()))
        })
        .await
    }

    /// Apply an administrative control action. Returns the post-commit
    /// snapshot.
    pub async fn apply_control(
        &self,
        auction_id: AuctionId,
        action: ControlAction,
    ) -> Result<AuctionSnapshot> {
        tracing::debug!(auction = %auction_id, action = action.name(), "control action");
        self.with_state(auction_id, move |state| {
            let events = match action {
                ControlAction::Start => state.start()?,
                ControlAction::Pause => state.pause()?,
                ControlAction::Resume => state.resume()?,
                ControlAction::Stop => state.stop()?,
                ControlAction::NextPlayer { expected_current } => {
                    state.advance_to_next(expected_current)?
                }
                ControlAction::SetPlayer { player } => state.set_current_player(player)?,
                ControlAction::SkipPlayer { expected_current } => {
                    state.skip_current(expected_current)?
                }
                ControlAction::Shuffle => state.shuffle_queue(&mut rand::thread_rng())?,
                ControlAction::Reset => state.reset()?,
                ControlAction::Cancel => state.cancel()?,
            };
            Ok((state.snapshot(), events))
        })
        .await
    }

    /// Place a bid on an auction's current player. Returns the inserted bid
    /// and the updated current-bid snapshot.
    pub async fn place_bid(&self, request: BidRequest) -> Result<(Bid, CurrentBid)> {
        self.with_state(request.auction_id, move |state| {
            let (bid, snapshot, event) =
                state.place_bid(request.team_id, request.player_id, request.amount)?;
            Ok(((bid, snapshot), vec![event]))
        })
        .await
    }

    /// Full bid history for a player in an auction.
    pub async fn bid_history(
        &self,
        auction_id: AuctionId,
        player_id: PlayerId,
    ) -> Result<Vec<Bid>> {
        let handle = self.handle(auction_id)?;
        let state = handle.state.lock().await;
        Ok(state.bid_history(player_id).to_vec())
    }

    /// Remaining budget for a team in an auction.
    pub async fn remaining_budget(
        &self,
        auction_id: AuctionId,
        team_id: TeamId,
    ) -> Result<Decimal> {
        let handle = self.handle(auction_id)?;
        let state = handle.state.lock().await;
        state.remaining_budget(team_id)
    }

    /// Number of registered auctions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.auctions
            .read()
            .expect("auction registry lock poisoned")
            .len()
    }

    /// Whether no auction is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =====================================================================
    // Internals
    // =====================================================================

    fn handle(&self, auction_id: AuctionId) -> Result<Arc<AuctionHandle>> {
        self.auctions
            .read()
            .expect("auction registry lock poisoned")
            .get(&auction_id)
            .cloned()
            .ok_or(AuctionError::AuctionNotFound(auction_id))
    }

    /// Run `op` inside the auction's critical section. On `Ok`, publish the
    /// produced events and refresh the snapshot before releasing the lock;
    /// on `Err`, publish nothing.
    async fn with_state<T, F>(&self, auction_id: AuctionId, op: F) -> Result<T>
    where
        F: FnOnce(&mut AuctionState) -> Result<(T, Vec<AuctionEvent>)>,
    {
        let handle = self.handle(auction_id)?;
        let mut state = handle.state.lock().await;
        let (out, events) = op(&mut state)?;

        let committed_at = Utc::now();
        for event in events {
            // No subscribers is fine; the send result only signals that.
            let _ = handle.events.send(CommittedEvent {
                auction_id,
                event,
                committed_at,
            });
        }
        handle.snapshot.send_replace(state.snapshot());
        Ok(out)
    }
}

impl Default for AuctionEngine {
    fn default() -> Self {
        Self::new()
    }
}
