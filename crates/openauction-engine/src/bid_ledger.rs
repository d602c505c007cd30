//! Append-only bid ledger with the outbid chain.
//!
//! One ledger per auction, one book per player. The single-active invariant
//! is enforced structurally at insert time: placing a bid marks the previous
//! active bid `Outbid` and links it as the new bid's predecessor in the same
//! step, so there is no window where two bids are simultaneously active and
//! `highest` is an index lookup rather than a scan.

use std::collections::HashMap;

use chrono::Utc;
use openauction_types::{AuctionError, AuctionId, Bid, BidId, BidStatus, PlayerId, Result, TeamId};
use rust_decimal::Decimal;

/// Per-player bid book.
#[derive(Debug, Clone, Default)]
struct PlayerBook {
    /// Append-only history in sequence order.
    bids: Vec<Bid>,
    /// Index of the unique Active or Won bid, if any.
    standing: Option<usize>,
    /// Next sequence number, strictly increasing per player.
    next_seq: u64,
}

/// The bid history for one auction.
#[derive(Debug, Clone)]
pub struct BidLedger {
    auction_id: AuctionId,
    books: HashMap<PlayerId, PlayerBook>,
}

impl BidLedger {
    #[must_use]
    pub fn new(auction_id: AuctionId) -> Self {
        Self {
            auction_id,
            books: HashMap::new(),
        }
    }

    /// Insert a new active bid, superseding the previous active bid if one
    /// exists. Assigns the next sequence number and derives the bid id from
    /// the ledger position. Amount validation happens in the state machine
    /// before this is called.
    ///
    /// # Errors
    /// `PlayerAlreadySold` when the standing bid was settled as won; a
    /// settled book accepts no further bids until a reset purges it.
    pub fn place(&mut self, player_id: PlayerId, team_id: TeamId, amount: Decimal) -> Result<Bid> {
        let auction_id = self.auction_id;
        let book = self.books.entry(player_id).or_default();

        let predecessor = match book.standing.map(|idx| &mut book.bids[idx]) {
            Some(prior) if prior.status == BidStatus::Won => {
                return Err(AuctionError::PlayerAlreadySold(player_id));
            }
            Some(prior) => {
                prior.status = BidStatus::Outbid;
                Some(prior.id)
            }
            None => None,
        };

        let sequence = book.next_seq;
        book.next_seq += 1;

        let bid = Bid {
            id: BidId::deterministic(auction_id, player_id, sequence),
            auction_id,
            player_id,
            team_id,
            amount,
            status: BidStatus::Active,
            sequence,
            outbid: predecessor,
            placed_at: Utc::now(),
        };
        book.bids.push(bid.clone());
        book.standing = Some(book.bids.len() - 1);
        Ok(bid)
    }

    /// The unique Active bid for a player, if one is standing.
    #[must_use]
    pub fn active_bid(&self, player_id: PlayerId) -> Option<&Bid> {
        self.standing_bid(player_id)
            .filter(|b| b.status == BidStatus::Active)
    }

    /// The unique Active or Won bid for a player. Settlement reads this;
    /// it is an index lookup, consistent with the insert-time invariant.
    #[must_use]
    pub fn highest(&self, player_id: PlayerId) -> Option<&Bid> {
        self.standing_bid(player_id)
    }

    /// Settle the active bid as won. Returns the settled bid, or `None`
    /// when no bid is active (the unsold path).
    pub fn mark_won(&mut self, player_id: PlayerId) -> Option<Bid> {
        let book = self.books.get_mut(&player_id)?;
        let idx = book.standing?;
        let bid = &mut book.bids[idx];
        if bid.status != BidStatus::Active {
            return None;
        }
        bid.status = BidStatus::Won;
        Some(bid.clone())
    }

    /// Forfeit the active bid (administrative skip). Returns the withdrawn
    /// bid, or `None` when no bid was active.
    pub fn forfeit_active(&mut self, player_id: PlayerId) -> Option<Bid> {
        let book = self.books.get_mut(&player_id)?;
        let idx = book.standing.take()?;
        let bid = &mut book.bids[idx];
        if bid.status != BidStatus::Active {
            book.standing = Some(idx);
            return None;
        }
        bid.status = BidStatus::Withdrawn;
        Some(bid.clone())
    }

    /// Full bid history for a player, in sequence order.
    #[must_use]
    pub fn bids_for(&self, player_id: PlayerId) -> &[Bid] {
        self.books
            .get(&player_id)
            .map_or(&[], |book| book.bids.as_slice())
    }

    /// Purge every bid in this auction. Only an explicit reset calls this.
    pub fn purge(&mut self) {
        self.books.clear();
    }

    /// Total number of bids across all players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.values().map(|b| b.bids.len()).sum()
    }

    /// Whether no bids have been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.values().all(|b| b.bids.is_empty())
    }

    fn standing_bid(&self, player_id: PlayerId) -> Option<&Bid> {
        let book = self.books.get(&player_id)?;
        book.standing.map(|idx| &book.bids[idx])
    }
}
