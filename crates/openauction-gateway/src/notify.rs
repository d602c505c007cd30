//! Event rendering and fan-out to bidder clients.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use openauction_types::{AuctionEvent, AuctionId, CommittedEvent, PlayerId, TeamId, TeamInfo};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};

/// Team metadata used to enrich notification payloads.
///
/// Populated from the team catalog, an external collaborator; a team the
/// directory does not know is delivered without enrichment rather than
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    teams: HashMap<TeamId, TeamInfo>,
}

impl TeamDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            teams: HashMap::new(),
        }
    }

    pub fn insert(&mut self, team: TeamInfo) {
        self.teams.insert(team.id, team);
    }

    #[must_use]
    pub fn get(&self, team_id: TeamId) -> Option<&TeamInfo> {
        self.teams.get(&team_id)
    }
}

/// A client-facing notification payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub auction_id: AuctionId,
    /// Stable event name, e.g. `player_sold`.
    pub kind: String,
    pub player: Option<PlayerId>,
    pub amount: Option<Decimal>,
    /// The team the event concerns, enriched when the directory knows it.
    pub team: Option<TeamInfo>,
    pub committed_at: DateTime<Utc>,
}

/// Renders committed events into notifications and pumps them to a sink.
#[derive(Debug, Clone, Default)]
pub struct NotificationGateway {
    directory: TeamDirectory,
}

impl NotificationGateway {
    #[must_use]
    pub fn new(directory: TeamDirectory) -> Self {
        Self { directory }
    }

    /// Render one committed event into its client payload.
    #[must_use]
    pub fn render(&self, committed: &CommittedEvent) -> Notification {
        let (player, amount, team_id) = match &committed.event {
            AuctionEvent::AuctionStarted { first_player } => (Some(*first_player), None, None),
            AuctionEvent::BidPlaced {
                player,
                team,
                amount,
                ..
            }
            | AuctionEvent::PlayerSold {
                player,
                team,
                amount,
            } => (Some(*player), Some(*amount), Some(*team)),
            AuctionEvent::PlayerUnsold { player, .. } => (Some(*player), None, None),
            AuctionEvent::PlayerChanged {
                player,
                opening_bid,
            } => (Some(*player), Some(opening_bid.amount), None),
            AuctionEvent::AuctionPaused
            | AuctionEvent::AuctionResumed
            | AuctionEvent::AuctionEnded
            | AuctionEvent::AuctionCancelled
            | AuctionEvent::ResetDone => (None, None, None),
        };

        let team = team_id.map(|id| {
            self.directory.get(id).cloned().unwrap_or(TeamInfo {
                id,
                name: String::new(),
                logo_url: None,
            })
        });

        Notification {
            auction_id: committed.auction_id,
            kind: committed.event.name().to_string(),
            player,
            amount,
            team,
            committed_at: committed.committed_at,
        }
    }

    /// Pump events from an engine subscription into a notification sink
    /// until the channel closes. A lagged receiver skips the missed events
    /// and keeps going; clients resynchronize from the snapshot feed.
    pub async fn run(
        &self,
        mut events: broadcast::Receiver<CommittedEvent>,
        sink: mpsc::Sender<Notification>,
    ) {
        loop {
            match events.recv().await {
                Ok(committed) => {
                    if sink.send(self.render(&committed)).await.is_err() {
                        return;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "notification gateway lagged, skipping");
                }
                Err(broadcast::error::RecvError::Closed) => return,
            }
        }
    }
}
