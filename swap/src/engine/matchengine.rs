//! Match Engine Module
//!
//! This module turns a snapshot of every member's collection into the
//! exchange report for one member. It is a pure computation: nothing is
//! read or written outside the snapshot passed in.

use serde::{Deserialize, Serialize};

use super::data::Snapshot;
use super::entry::{GiveMatch, Member, PerfectMatch, ReceiveMatch};
use super::matchlogic::Matcher;

/// Exchange opportunities for one member
///
/// A counterparty listed under `perfect_matches` is also listed in both
/// one-way sections, since each section is computed independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// The member the report was generated for
    pub subject: Member,
    /// Counterparties with items flowing both ways
    pub perfect_matches: Vec<PerfectMatch>,
    /// Counterparties holding duplicates the subject needs
    pub one_way_receive: Vec<ReceiveMatch>,
    /// Counterparties needing duplicates the subject holds
    pub one_way_give: Vec<GiveMatch>,
}

impl Report {
    /// True when no exchange of any kind was found
    pub fn is_empty(&self) -> bool {
        self.perfect_matches.is_empty()
            && self.one_way_receive.is_empty()
            && self.one_way_give.is_empty()
    }
}

/// Generates the exchange report for `subject` from a full snapshot
///
/// # Arguments
/// * `subject` - Member the report is for; unknown members are treated as
///   having empty needs and duplicates
/// * `snapshot` - Every member's current collection
///
/// # Returns
/// Perfect matches, one-way receive and one-way give sections, each in
/// snapshot order and never containing `subject` itself
pub fn generate_report(subject: &Member, snapshot: &Snapshot) -> Report {
    let own = snapshot.collection_of(subject);
    let matcher = Matcher::new(&own);

    let counterparties = move || {
        snapshot
            .iter()
            .filter(move |(member, _)| *member != subject)
    };

    let perfect_matches: Vec<PerfectMatch> = counterparties()
        .filter_map(|(member, other)| matcher.perfect_match(member, other))
        .collect();
    let one_way_receive: Vec<ReceiveMatch> = counterparties()
        .filter_map(|(member, other)| matcher.receive_match(member, other))
        .collect();
    let one_way_give: Vec<GiveMatch> = counterparties()
        .filter_map(|(member, other)| matcher.give_match(member, other))
        .collect();

    log::debug!(
        "report for {}: {} perfect, {} receive, {} give",
        subject,
        perfect_matches.len(),
        one_way_receive.len(),
        one_way_give.len()
    );

    Report {
        subject: subject.clone(),
        perfect_matches,
        one_way_receive,
        one_way_give,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::entry::Collection;

    fn member(name: &str) -> Member {
        Member::new(name).unwrap()
    }

    fn snapshot(entries: &[(&str, &[u64], &[u64])]) -> Snapshot {
        entries
            .iter()
            .map(|(name, needs, dups)| {
                (
                    member(name),
                    Collection::new(needs.iter().copied(), dups.iter().copied()),
                )
            })
            .collect()
    }

    #[test]
    fn test_two_way_exchange() {
        let snapshot = snapshot(&[("Alice", &[1, 2], &[3]), ("Bob", &[3], &[1])]);
        let report = generate_report(&member("Alice"), &snapshot);

        assert_eq!(
            report.perfect_matches,
            vec![PerfectMatch {
                counterparty: member("Bob"),
                give: vec![3],
                receive: vec![1],
            }]
        );
        assert_eq!(
            report.one_way_receive,
            vec![ReceiveMatch {
                counterparty: member("Bob"),
                receive: vec![1],
            }]
        );
        assert_eq!(
            report.one_way_give,
            vec![GiveMatch {
                counterparty: member("Bob"),
                give: vec![3],
            }]
        );
    }

    #[test]
    fn test_receive_only() {
        let snapshot = snapshot(&[("Alice", &[1], &[]), ("Bob", &[], &[1])]);
        let report = generate_report(&member("Alice"), &snapshot);

        assert!(report.perfect_matches.is_empty());
        assert_eq!(report.one_way_receive.len(), 1);
        assert_eq!(report.one_way_receive[0].counterparty, member("Bob"));
        assert_eq!(report.one_way_receive[0].receive, vec![1]);
        assert!(report.one_way_give.is_empty());
        assert!(!report.is_empty());
    }

    #[test]
    fn test_no_self_pairing() {
        let snapshot = snapshot(&[("Alice", &[1, 2], &[1, 2])]);
        let report = generate_report(&member("Alice"), &snapshot);
        assert!(report.is_empty());
    }

    #[test]
    fn test_unknown_subject_is_empty_collection() {
        let snapshot = snapshot(&[("Alice", &[1], &[2]), ("Bob", &[2], &[1])]);
        let report = generate_report(&member("Zoe"), &snapshot);
        assert!(report.is_empty());
        assert_eq!(report.subject, member("Zoe"));
    }

    #[test]
    fn test_overlapping_needs_and_duplicates_kept() {
        let snapshot = snapshot(&[("Alice", &[5], &[5]), ("Bob", &[5], &[5])]);
        let report = generate_report(&member("Alice"), &snapshot);
        assert_eq!(report.perfect_matches.len(), 1);
        assert_eq!(report.perfect_matches[0].give, vec![5]);
        assert_eq!(report.perfect_matches[0].receive, vec![5]);
    }

    #[test]
    fn test_counterparties_in_name_order() {
        let snapshot = snapshot(&[
            ("Carol", &[], &[1]),
            ("Alice", &[1], &[]),
            ("Bob", &[], &[1]),
        ]);
        let report = generate_report(&member("Alice"), &snapshot);
        let names: Vec<&str> = report
            .one_way_receive
            .iter()
            .map(|m| m.counterparty.name())
            .collect();
        assert_eq!(names, vec!["Bob", "Carol"]);
    }
}
