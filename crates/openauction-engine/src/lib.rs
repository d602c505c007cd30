//! # openauction-engine
//!
//! **The auction state machine and bid ledger for OpenAuction.**
//!
//! This crate is the invariant core of the system. It tracks auction
//! lifecycle (upcoming → live ⇄ paused → completed), advances the player
//! queue, resolves the highest bid for the player under the hammer, settles
//! sold/unsold outcomes, and debits team budgets — all under concurrent
//! access from many bidders and administrative controls.
//!
//! - **Single-writer per auction**: every mutation runs inside a per-auction
//!   exclusive critical section; auctions proceed in parallel with each other
//! - **Atomic settlement**: settle → dequeue → select next is one unit;
//!   partial application is never observable
//! - **Idempotent-safe advance**: a stale retry fails with `NotCurrentPlayer`
//!   instead of double-debiting a budget
//! - **Post-commit events**: every committed transition is published exactly
//!   once, after commit, never before

pub mod bid_ledger;
pub mod budget;
pub mod engine;
pub mod queue;
pub mod state;

pub use bid_ledger::BidLedger;
pub use budget::BudgetLedger;
pub use engine::{AuctionEngine, AuctionHandle};
pub use queue::PlayerQueue;
pub use state::{AuctionState, Outcome};
