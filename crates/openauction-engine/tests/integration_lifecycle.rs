//! Integration test: full auction lifecycle
//!
//! UPCOMING → LIVE → settlement per player → COMPLETED, plus the
//! administrative paths (skip, set-player, shuffle, reset) driven through
//! the engine API exactly as a route handler would drive them.

use openauction_engine::AuctionEngine;
use openauction_types::*;
use rust_decimal::Decimal;

fn dec(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

fn catalog(prices: &[i64]) -> Vec<PlayerInfo> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| PlayerInfo::new(format!("Player {i}"), dec(p)))
        .collect()
}

async fn live_auction(
    engine: &AuctionEngine,
    prices: &[i64],
    team_count: usize,
) -> (AuctionId, Vec<PlayerId>, Vec<TeamId>) {
    let players = catalog(prices);
    let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    let auction_id = engine.create_auction(AuctionConfig::new(dec(100_000)), players).unwrap();

    let teams: Vec<TeamId> = (0..team_count).map(|_| TeamId::new()).collect();
    for &team in &teams {
        engine.register_team(auction_id, team).await.unwrap();
    }
    engine
        .apply_control(auction_id, ControlAction::Start)
        .await
        .unwrap();
    (auction_id, ids, teams)
}

#[tokio::test]
async fn full_auction_run() {
    // =====================================================================
    // SETUP: three players, two competing teams
    // =====================================================================
    let engine = AuctionEngine::new();
    let (auction_id, players, teams) = live_auction(&engine, &[1000, 2000, 500], 2).await;
    let mut rx = engine.subscribe(auction_id).unwrap();

    // =====================================================================
    // PLAYER 1: a bidding war, sold to the higher team
    // =====================================================================
    for (team, amount) in [
        (teams[0], 1000),
        (teams[1], 1200),
        (teams[0], 1800),
    ] {
        engine
            .place_bid(BidRequest {
                auction_id,
                player_id: players[0],
                team_id: team,
                amount: dec(amount),
            })
            .await
            .unwrap();
    }
    let snap = engine
        .apply_control(
            auction_id,
            ControlAction::NextPlayer {
                expected_current: players[0],
            },
        )
        .await
        .unwrap();
    assert_eq!(snap.sold_count, 1);
    assert_eq!(snap.current_player, Some(players[1]));
    assert_eq!(
        engine
            .remaining_budget(auction_id, teams[0])
            .await
            .unwrap(),
        dec(98_200)
    );
    assert_eq!(
        engine
            .remaining_budget(auction_id, teams[1])
            .await
            .unwrap(),
        dec(100_000)
    );

    // The outbid chain is fully linked.
    let history = engine.bid_history(auction_id, players[0]).await.unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].status, BidStatus::Outbid);
    assert_eq!(history[1].status, BidStatus::Outbid);
    assert_eq!(history[2].status, BidStatus::Won);
    assert_eq!(history[1].outbid, Some(history[0].id));
    assert_eq!(history[2].outbid, Some(history[1].id));

    // =====================================================================
    // PLAYER 2: no bids, goes unsold
    // =====================================================================
    let snap = engine
        .apply_control(
            auction_id,
            ControlAction::NextPlayer {
                expected_current: players[1],
            },
        )
        .await
        .unwrap();
    assert_eq!(snap.unsold_count, 1);
    assert_eq!(snap.current_player, Some(players[2]));

    // =====================================================================
    // PLAYER 3: last settlement completes the auction
    // =====================================================================
    engine
        .place_bid(BidRequest {
            auction_id,
            player_id: players[2],
            team_id: teams[1],
            amount: dec(500),
        })
        .await
        .unwrap();
    let snap = engine
        .apply_control(
            auction_id,
            ControlAction::NextPlayer {
                expected_current: players[2],
            },
        )
        .await
        .unwrap();
    assert_eq!(snap.status, AuctionStatus::Completed);
    assert_eq!(snap.current_player, None);
    assert_eq!(snap.sold_count, 2);
    assert_eq!(snap.unsold_count, 1);

    // Winner lists match the settlements.
    let winner = snap
        .participants
        .iter()
        .find(|p| p.team_id == teams[0])
        .unwrap();
    assert_eq!(winner.won_players, vec![players[0]]);

    // =====================================================================
    // EVENTS: exactly one per committed transition, in commit order
    // =====================================================================
    let mut names = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        assert_eq!(ev.auction_id, auction_id);
        names.push(ev.event.name().to_string());
    }
    assert_eq!(
        names,
        vec![
            "bid_placed",
            "bid_placed",
            "bid_placed",
            "player_sold",
            "player_changed",
            "player_unsold",
            "player_changed",
            "bid_placed",
            "player_sold",
            "auction_ended",
        ]
    );
}

#[tokio::test]
async fn skip_forfeits_and_advances() {
    let engine = AuctionEngine::new();
    let (auction_id, players, teams) = live_auction(&engine, &[1000, 500], 1).await;

    engine
        .place_bid(BidRequest {
            auction_id,
            player_id: players[0],
            team_id: teams[0],
            amount: dec(9000),
        })
        .await
        .unwrap();

    let snap = engine
        .apply_control(
            auction_id,
            ControlAction::SkipPlayer {
                expected_current: players[0],
            },
        )
        .await
        .unwrap();
    assert_eq!(snap.unsold_count, 1);
    assert_eq!(snap.sold_count, 0);
    assert_eq!(snap.current_player, Some(players[1]));

    // The forfeited bid cost nothing.
    assert_eq!(
        engine
            .remaining_budget(auction_id, teams[0])
            .await
            .unwrap(),
        dec(100_000)
    );
    let history = engine.bid_history(auction_id, players[0]).await.unwrap();
    assert_eq!(history[0].status, BidStatus::Withdrawn);
}

#[tokio::test]
async fn set_player_override_then_settle() {
    let engine = AuctionEngine::new();
    let (auction_id, players, teams) = live_auction(&engine, &[1000, 500, 750], 1).await;

    // Jump the third player to the front without settling the first.
    let snap = engine
        .apply_control(
            auction_id,
            ControlAction::SetPlayer { player: players[2] },
        )
        .await
        .unwrap();
    assert_eq!(snap.current_player, Some(players[2]));
    assert_eq!(snap.current_bid.unwrap().amount, dec(750));
    assert_eq!(snap.queue.len(), 3);

    engine
        .place_bid(BidRequest {
            auction_id,
            player_id: players[2],
            team_id: teams[0],
            amount: dec(800),
        })
        .await
        .unwrap();
    let snap = engine
        .apply_control(
            auction_id,
            ControlAction::NextPlayer {
                expected_current: players[2],
            },
        )
        .await
        .unwrap();
    assert_eq!(snap.sold_count, 1);
    // The override target was dequeued; the untouched head is current again.
    assert_eq!(snap.current_player, Some(players[0]));
    assert_eq!(snap.queue.len(), 2);
}

#[tokio::test]
async fn shuffle_preserves_multiset_and_pin() {
    let engine = AuctionEngine::new();
    let (auction_id, players, _) = live_auction(&engine, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10], 0).await;

    let before = engine.snapshot(auction_id).unwrap().queue;
    engine
        .apply_control(auction_id, ControlAction::Shuffle)
        .await
        .unwrap();
    let after = engine.snapshot(auction_id).unwrap().queue;

    assert_eq!(after[0], players[0], "current player must stay first");
    let mut sorted_before = before;
    let mut sorted_after = after;
    sorted_before.sort();
    sorted_after.sort();
    assert_eq!(sorted_before, sorted_after);
}

#[tokio::test]
async fn reset_restores_budgets_and_purges_bids() {
    let engine = AuctionEngine::new();
    let (auction_id, players, teams) = live_auction(&engine, &[1000, 500], 2).await;

    engine
        .place_bid(BidRequest {
            auction_id,
            player_id: players[0],
            team_id: teams[0],
            amount: dec(4000),
        })
        .await
        .unwrap();
    engine
        .apply_control(
            auction_id,
            ControlAction::NextPlayer {
                expected_current: players[0],
            },
        )
        .await
        .unwrap();
    engine
        .apply_control(auction_id, ControlAction::Stop)
        .await
        .unwrap();

    let snap = engine
        .apply_control(auction_id, ControlAction::Reset)
        .await
        .unwrap();
    assert_eq!(snap.status, AuctionStatus::Upcoming);
    assert_eq!(snap.sold_count, 0);
    assert_eq!(snap.unsold_count, 0);
    for p in &snap.participants {
        assert_eq!(p.remaining_budget, dec(100_000));
        assert!(p.won_players.is_empty());
    }
    assert!(
        engine
            .bid_history(auction_id, players[0])
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn stop_leaves_remaining_players_unsettled() {
    let engine = AuctionEngine::new();
    let (auction_id, _, _) = live_auction(&engine, &[1000, 500, 750], 0).await;

    engine
        .apply_control(auction_id, ControlAction::Pause)
        .await
        .unwrap();
    let snap = engine
        .apply_control(auction_id, ControlAction::Stop)
        .await
        .unwrap();
    assert_eq!(snap.status, AuctionStatus::Completed);
    assert_eq!(snap.queue.len(), 3);
    assert_eq!(snap.sold_count + snap.unsold_count, 0);
}
