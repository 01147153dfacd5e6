//! Plain-text rendering of collections and reports for the terminal.

use std::fmt;

use crate::engine::entry::{Collection, Member};
use crate::engine::input::format_numbers;
use crate::engine::matchengine::Report;

struct CollectionView<'a> {
    member: &'a Member,
    collection: &'a Collection,
}

impl fmt::Display for CollectionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Collection of {}", self.member)?;
        writeln!(
            f,
            "Looking for ({}): {}",
            self.collection.needs.len(),
            format_numbers(&self.collection.needs)
        )?;
        writeln!(
            f,
            "Duplicates ({}): {}",
            self.collection.duplicates.len(),
            format_numbers(&self.collection.duplicates)
        )
    }
}

struct ReportView<'a>(&'a Report);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "Exchange report for {}", report.subject)?;

        writeln!(f, "\nPerfect exchanges")?;
        if report.perfect_matches.is_empty() {
            writeln!(f, "  No perfect exchange found for now.")?;
        }
        for m in &report.perfect_matches {
            writeln!(
                f,
                "  {} can give you: {} / you can give them: {}",
                m.counterparty,
                format_numbers(&m.receive),
                format_numbers(&m.give)
            )?;
        }

        writeln!(f, "\nYou can receive")?;
        if report.one_way_receive.is_empty() {
            writeln!(f, "  Nobody has what you are missing yet.")?;
        }
        for m in &report.one_way_receive {
            writeln!(
                f,
                "  {} has duplicates of: {}",
                m.counterparty,
                format_numbers(&m.receive)
            )?;
        }

        writeln!(f, "\nYou can help")?;
        if report.one_way_give.is_empty() {
            writeln!(f, "  None of your duplicates are wanted yet.")?;
        }
        for m in &report.one_way_give {
            writeln!(
                f,
                "  {} is looking for: {}",
                m.counterparty,
                format_numbers(&m.give)
            )?;
        }
        Ok(())
    }
}

pub fn render_collection(member: &Member, collection: &Collection) -> String {
    CollectionView { member, collection }.to_string()
}

pub fn render_report(report: &Report) -> String {
    ReportView(report).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::data::Snapshot;
    use crate::engine::matchengine::generate_report;

    #[test]
    fn test_render_collection() {
        let member = Member::new("alice").unwrap();
        let text = render_collection(&member, &Collection::new([10, 4], []));
        assert!(text.contains("Collection of Alice"));
        assert!(text.contains("Looking for (2): 4, 10"));
        assert!(text.contains("Duplicates (0): "));
    }

    #[test]
    fn test_render_report_sections() {
        let alice = Member::new("alice").unwrap();
        let bob = Member::new("bob").unwrap();
        let snapshot: Snapshot = [
            (alice.clone(), Collection::new([1, 2], [3])),
            (bob, Collection::new([3], [1])),
        ]
        .into_iter()
        .collect();

        let text = render_report(&generate_report(&alice, &snapshot));
        assert!(text.contains("Bob can give you: 1 / you can give them: 3"));
        assert!(text.contains("Bob has duplicates of: 1"));
        assert!(text.contains("Bob is looking for: 3"));
    }

    #[test]
    fn test_render_empty_report() {
        let alice = Member::new("alice").unwrap();
        let text = render_report(&generate_report(&alice, &Snapshot::new()));
        assert!(text.contains("No perfect exchange found for now."));
        assert!(text.contains("Nobody has what you are missing yet."));
        assert!(text.contains("None of your duplicates are wanted yet."));
    }
}
