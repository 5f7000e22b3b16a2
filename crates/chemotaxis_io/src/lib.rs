//! # Chemotaxis IO
//!
//! Persistence for simulation runs: snapshot logs in JSON Lines form,
//! optionally gzip-compressed, and the error type shared by them.

pub mod error;
pub mod snapshot_log;

pub use error::{IoError, Result};
pub use snapshot_log::{read_snapshots, SnapshotLog};
