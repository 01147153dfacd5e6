//! Sticker swap: record what club members need and hold in double, then
//! work out who can trade with whom.

pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod service;
pub mod store;

pub use engine::data::Snapshot;
pub use engine::entry::{Collection, GiveMatch, ItemId, Member, PerfectMatch, ReceiveMatch};
pub use engine::matchengine::{generate_report, Report};
pub use error::{Result, SwapError};
