//! # Domain Module
//!
//! Business logic for the points tracker.
//!
//! This module encapsulates the core rules of the point/reward program:
//! how events earn points, how balances derive from the ledger, how prizes
//! are redeemed, and how leaderboards are ordered. It operates independently
//! of any UI framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **store**: shared in-memory state and the persistence commit boundary
//! - **member_service / prize_service / config_service**: entity management
//! - **ledger_service**: appends, totals, deletions, filtered listings
//! - **ranking_service**: leaderboards with deterministic tie-breaking
//! - **redemption_service**: prize redemption and reversal
//! - **points**: pure point rule evaluation for meeting events
//! - **snapshot_service**: whole-state export and validated import
//!
//! ## Core Concepts
//!
//! - **Ledger**: append-mostly sequence of point-affecting entries, the sole
//!   source of truth for balances
//! - **Balance**: earned minus redeemed, always derived, never stored
//! - **Redemption**: points exchanged for a prize, recorded as a
//!   negative-point entry alongside a stock decrement

pub mod commands;
pub mod config_service;
pub mod errors;
pub mod ledger_service;
pub mod member_service;
pub mod models;
pub mod points;
pub mod prize_service;
pub mod ranking_service;
pub mod redemption_service;
pub mod snapshot_service;
pub mod store;

pub use config_service::ConfigService;
pub use errors::{DomainError, Result};
pub use ledger_service::{LedgerService, MemberTotals};
pub use member_service::MemberService;
pub use prize_service::PrizeService;
pub use ranking_service::{RankEntry, RankingService};
pub use redemption_service::{Redemption, RedemptionService};
pub use snapshot_service::SnapshotService;
pub use store::Store;
