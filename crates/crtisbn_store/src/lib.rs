//! # crtisbn Store
//!
//! Durable ledger of issued identifiers for crtisbn.
//!
//! This crate provides the lowest-level persistence abstraction for the
//! identifier engine. Snapshot backends are **opaque byte stores** - they
//! do not interpret the ledger they hold.
//!
//! ## Design Principles
//!
//! - Backends hold one snapshot (load, persist); the ledger owns the format
//! - A single logical writer is assumed; there is no internal cross-process
//!   locking
//! - Every mutation is persisted synchronously before it becomes visible
//!   to later reads
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral ledgers
//! - [`FileBackend`] - For persistent storage using an atomic file replace
//!
//! ## Example
//!
//! ```rust
//! use crtisbn_store::{IdentifierStore, InMemoryBackend, Ledger};
//!
//! let mut ledger = Ledger::open(InMemoryBackend::new());
//! ledger.commit(16, "9783160000021", "978316", 0).unwrap();
//! assert!(ledger.contains("9783160000021"));
//! assert_eq!(ledger.next_offset("978316"), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod ledger;
mod memory;
mod record;

pub use backend::SnapshotBackend;
pub use error::{StoreError, StoreResult};
pub use file::FileBackend;
pub use ledger::{IdentifierStore, Ledger, OFFSET_CYCLE};
pub use memory::InMemoryBackend;
pub use record::LedgerRecord;
