use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A numbered collectible
pub type ItemId = u64;

/// Largest item number the store can hold (an SQLite INTEGER)
pub const MAX_ITEM_ID: ItemId = i64::MAX as ItemId;

/// What a member is missing and what they hold in surplus
///
/// Nothing prevents the same item from appearing on both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub needs: BTreeSet<ItemId>,
    #[serde(default)]
    pub duplicates: BTreeSet<ItemId>,
}

impl Collection {
    pub fn new<N, D>(needs: N, duplicates: D) -> Self
    where
        N: IntoIterator<Item = ItemId>,
        D: IntoIterator<Item = ItemId>,
    {
        Self {
            needs: needs.into_iter().collect(),
            duplicates: duplicates.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needs.is_empty() && self.duplicates.is_empty()
    }
}
