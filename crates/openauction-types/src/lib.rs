//! # openauction-types
//!
//! Shared types, errors, and configuration for the **OpenAuction** engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AuctionId`], [`PlayerId`], [`TeamId`], [`BidId`]
//! - **Auction model**: [`AuctionStatus`], [`CurrentBid`], [`AuctionSnapshot`]
//! - **Bid model**: [`Bid`], [`BidStatus`]
//! - **Participant model**: [`Participant`]
//! - **Catalog entries**: [`PlayerInfo`], [`TeamInfo`]
//! - **Inbound actions**: [`ControlAction`], [`BidRequest`]
//! - **Outbound events**: [`AuctionEvent`], [`UnsoldReason`]
//! - **Configuration**: [`AuctionConfig`]
//! - **Errors**: [`AuctionError`] with `AU_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod action;
pub mod auction;
pub mod bid;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod participant;
pub mod player;

// Re-export all primary types at crate root for ergonomic imports:
//   use openauction_types::{Bid, BidStatus, AuctionEvent, ...};

pub use action::*;
pub use auction::*;
pub use bid::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use participant::*;
pub use player::*;

// Constants are accessed via `openauction_types::constants::FOO`
// (not re-exported to avoid name collisions).
