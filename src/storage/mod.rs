//! # Storage Module
//!
//! Handles persistence of the application state snapshot.
//!
//! The whole state is persisted as a single snapshot document after every
//! successful mutation, mirroring the original per-browser storage model.
//! The implementation can be swapped (JSON file, test double, platform
//! storage shim) without affecting the domain layer.
//!
//! ## Key Responsibilities
//!
//! - **Snapshot Persistence**: Writing the full state document to disk
//! - **Snapshot Retrieval**: Loading a previously persisted state
//! - **Storage Abstraction**: One trait, interchangeable backends
//! - **Write Safety**: Atomic temp-file-then-rename writes

pub mod json_file;
pub mod snapshot;
pub mod traits;

pub use json_file::JsonFileStorage;
pub use snapshot::{Meta, Snapshot};
pub use traits::SnapshotStorage;
