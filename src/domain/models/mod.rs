//! Domain models for the points tracker.

pub mod config;
pub mod member;
pub mod prize;
pub mod transaction;

pub use config::{Config, PointWeights};
pub use member::Member;
pub use prize::{Prize, Season};
pub use transaction::{Transaction, TransactionKind};
