//! Data Structures Module
//!
//! This module contains the snapshot handed to the matching engine:
//! every known member mapped to their current collection.

pub mod snapshot;

pub use snapshot::Snapshot;
