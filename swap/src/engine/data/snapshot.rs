use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

use crate::engine::entry::{Collection, Member};

/// Every known member's collection at one point in time
///
/// Members are kept ordered by name, which is the counterparty order
/// reports are produced in. Deserializing fails when two keys normalize to
/// the same member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    members: BTreeMap<Member, Collection>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self {
            members: BTreeMap::new(),
        }
    }

    /// Sets a member's collection, replacing any previous one
    pub fn insert(&mut self, member: Member, collection: Collection) -> Option<Collection> {
        self.members.insert(member, collection)
    }

    /// Mutable access to a member's collection, adding the member if absent
    pub fn collection_mut(&mut self, member: Member) -> &mut Collection {
        self.members.entry(member).or_default()
    }

    pub fn get(&self, member: &Member) -> Option<&Collection> {
        self.members.get(member)
    }

    /// Returns the member's collection, or an empty one for unknown members
    pub fn collection_of(&self, member: &Member) -> Collection {
        self.members.get(member).cloned().unwrap_or_default()
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Member, &Collection)> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FromIterator<(Member, Collection)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (Member, Collection)>>(iter: T) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

struct SnapshotVisitor;

impl<'de> Visitor<'de> for SnapshotVisitor {
    type Value = Snapshot;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of member names to collections")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Snapshot, A::Error> {
        let mut members = BTreeMap::new();
        while let Some((member, collection)) = access.next_entry::<Member, Collection>()? {
            match members.entry(member) {
                Entry::Vacant(slot) => {
                    slot.insert(collection);
                }
                Entry::Occupied(slot) => {
                    return Err(de::Error::custom(format!(
                        "member {} is listed more than once",
                        slot.key()
                    )));
                }
            }
        }
        Ok(Snapshot { members })
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SnapshotVisitor)
    }
}
