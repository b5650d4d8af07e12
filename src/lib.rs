//! # points-tracker
//!
//! Local-first scorekeeping for a youth-club point and reward program.
//!
//! The crate tracks members, records point-affecting events (meetings,
//! activities, inductions, manual adjustments, prize redemptions), and
//! computes rankings and balances from an append-mostly transaction ledger.
//! All state persists as a single JSON snapshot on disk; there is no server
//! and no concurrency. The presentation layer is an external collaborator
//! that calls the domain services and only ever hands in raw input values.
//!
//! ## Architecture
//!
//! ```text
//! Presentation (excluded)
//!     ↓
//! Domain Layer (services, commands, models)
//!     ↓
//! Store (in-memory state + commit boundary)
//!     ↓
//! Storage Layer (snapshot persistence)
//! ```

pub mod domain;
pub mod storage;

use log::info;
use std::path::Path;

use crate::domain::{
    ConfigService, LedgerService, MemberService, PrizeService, RankingService, RedemptionService,
    Result, SnapshotService, Store,
};
use crate::storage::{JsonFileStorage, SnapshotStorage};

/// The assembled application: every domain service wired to one shared
/// store. Construct one per data file (or per test).
#[derive(Clone)]
pub struct App {
    pub members: MemberService,
    pub prizes: PrizeService,
    pub config: ConfigService,
    pub ledger: LedgerService,
    pub ranking: RankingService,
    pub redemptions: RedemptionService,
    pub snapshots: SnapshotService,
}

impl App {
    /// Wire all services over the given storage backend.
    pub fn initialize(storage: Box<dyn SnapshotStorage>) -> Result<Self> {
        let store = Store::open(storage)?;

        info!("Setting up domain services");
        Ok(Self {
            members: MemberService::new(store.clone()),
            prizes: PrizeService::new(store.clone()),
            config: ConfigService::new(store.clone()),
            ledger: LedgerService::new(store.clone()),
            ranking: RankingService::new(store.clone()),
            redemptions: RedemptionService::new(store.clone()),
            snapshots: SnapshotService::new(store),
        })
    }

    /// Open an application over a JSON snapshot file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::initialize(Box::new(JsonFileStorage::new(path)))
    }
}
