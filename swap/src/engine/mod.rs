//! Swap Engine Module
//!
//! This module contains the core components of the exchange matching system:
//! - `data`: The snapshot of every member's collection
//! - `entry`: Member, collection and match record definitions
//! - `input`: Parsing of free-text item numbers
//! - `matchengine`: Report generation entry point
//! - `matchlogic`: Pairwise intersection logic

pub mod data;
pub mod entry;
pub mod input;
pub mod matchengine;
pub mod matchlogic;
