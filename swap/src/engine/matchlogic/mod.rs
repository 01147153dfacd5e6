//! Match Logic Module
//!
//! This module implements the pairwise comparison between the subject of a
//! report and one counterparty: what flows each way and whether the pair
//! forms a perfect (two-way) exchange.

pub mod matcher;

pub use matcher::Matcher;
