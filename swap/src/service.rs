//! Swap service implementation
//!
//! This module ties the collection store to the matching engine. Every
//! operation names the member it acts for explicitly.

use std::path::Path;

use crate::engine::data::Snapshot;
use crate::engine::entry::{Collection, Member};
use crate::engine::input::parse_numbers_detailed;
use crate::engine::matchengine::{generate_report, Report};
use crate::error::Result;
use crate::store::CollectionStore;

/// Result of saving a member's collection from raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub member: Member,
    pub collection: Collection,
    /// Tokens dropped from the needs text
    pub rejected_needs: Vec<String>,
    /// Tokens dropped from the duplicates text
    pub rejected_duplicates: Vec<String>,
}

pub struct SwapService<S> {
    store: S,
}

impl<S: CollectionStore> SwapService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Normalizes the name and makes sure the member exists
    pub async fn register(&self, name: &str) -> Result<Member> {
        let member = Member::new(name)?;
        self.store.add_member(&member).await?;
        Ok(member)
    }

    pub async fn collection(&self, name: &str) -> Result<(Member, Collection)> {
        let member = self.register(name).await?;
        let collection = self.store.get_collection(&member).await?;
        Ok((member, collection))
    }

    /// Saves a member's needs and duplicates from free text
    ///
    /// # Arguments
    /// * `name` - Member name, normalized before use
    /// * `needs` - New needs text; `None` keeps the saved needs
    /// * `duplicates` - New duplicates text; `None` keeps the saved duplicates
    ///
    /// # Returns
    /// The collection as saved and any tokens that were not item numbers
    pub async fn update(
        &self,
        name: &str,
        needs: Option<&str>,
        duplicates: Option<&str>,
    ) -> Result<UpdateOutcome> {
        let (member, mut collection) = self.collection(name).await?;

        let mut rejected_needs = Vec::new();
        if let Some(text) = needs {
            let parsed = parse_numbers_detailed(text);
            collection.needs = parsed.items;
            rejected_needs = parsed.rejected;
        }
        let mut rejected_duplicates = Vec::new();
        if let Some(text) = duplicates {
            let parsed = parse_numbers_detailed(text);
            collection.duplicates = parsed.items;
            rejected_duplicates = parsed.rejected;
        }

        for token in rejected_needs.iter().chain(&rejected_duplicates) {
            log::warn!("ignoring {:?} for {}: not an item number", token, member);
        }

        self.store.save_collection(&member, &collection).await?;
        log::info!(
            "collection saved for {}: {} needs, {} duplicates",
            member,
            collection.needs.len(),
            collection.duplicates.len()
        );

        Ok(UpdateOutcome {
            member,
            collection,
            rejected_needs,
            rejected_duplicates,
        })
    }

    /// Generates the exchange report for a member from a fresh snapshot
    pub async fn report(&self, name: &str) -> Result<Report> {
        let member = self.register(name).await?;
        let snapshot = self.store.get_all_data().await?;
        let report = generate_report(&member, &snapshot);
        log::info!(
            "report for {} over {} members: {} perfect, {} receive, {} give",
            member,
            snapshot.len(),
            report.perfect_matches.len(),
            report.one_way_receive.len(),
            report.one_way_give.len()
        );
        Ok(report)
    }

    pub async fn members(&self) -> Result<Vec<Member>> {
        self.store.list_members().await
    }

    pub async fn export(&self) -> Result<Snapshot> {
        self.store.get_all_data().await
    }

    /// Writes the full snapshot to a JSON file
    pub async fn export_to_file<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let snapshot = self.export().await?;
        std::fs::write(path.as_ref(), serde_json::to_vec_pretty(&snapshot)?)?;
        log::info!(
            "exported {} members to {}",
            snapshot.len(),
            path.as_ref().display()
        );
        Ok(snapshot.len())
    }

    /// Replaces the collection of every member listed in the snapshot
    ///
    /// Members absent from the snapshot are left alone.
    pub async fn import(&self, snapshot: &Snapshot) -> Result<usize> {
        for (member, collection) in snapshot.iter() {
            self.store.save_collection(member, collection).await?;
        }
        log::info!("imported {} members", snapshot.len());
        Ok(snapshot.len())
    }

    pub async fn import_from_file<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let contents = std::fs::read(path.as_ref())?;
        let snapshot: Snapshot = serde_json::from_slice(&contents)?;
        self.import(&snapshot).await
    }
}
