//! Multi-account timeline aggregation.
//!
//! An [`AggregationGroup`] pages many accounts, each on its own backend, as
//! one timeline. Every advance fans out one task per account, keeps the
//! previous page of any account that failed and merges the fresh batches
//! newest first.

mod config;
pub use config::*;

mod error;
pub use error::*;

mod merge;
pub use merge::*;

mod group;
pub use group::*;

mod threadpool;
