//! Collection Store Module
//!
//! Persistence of members and their collections. The matching engine only
//! ever sees the [`Snapshot`] produced by [`CollectionStore::get_all_data`].

use async_trait::async_trait;

use crate::engine::data::Snapshot;
use crate::engine::entry::{Collection, Member};
use crate::error::Result;

pub mod sqlite;

pub use sqlite::SqliteStore;

#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Registers a member; a no-op if they already exist
    async fn add_member(&self, member: &Member) -> Result<()>;

    async fn list_members(&self) -> Result<Vec<Member>>;

    /// Current collection of a member, empty if nothing was saved
    async fn get_collection(&self, member: &Member) -> Result<Collection>;

    /// Replaces the member's needs and duplicates wholesale
    ///
    /// Either both sets are replaced or nothing changes.
    async fn save_collection(&self, member: &Member, collection: &Collection) -> Result<()>;

    /// Every known member with their collection, including empty ones
    async fn get_all_data(&self) -> Result<Snapshot>;
}
