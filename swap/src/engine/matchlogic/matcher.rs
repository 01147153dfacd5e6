use crate::engine::entry::{Collection, GiveMatch, ItemId, Member, PerfectMatch, ReceiveMatch};

/// Compares one subject collection against counterparties
#[derive(Debug, Clone)]
pub struct Matcher<'a> {
    subject: &'a Collection,
}

impl<'a> Matcher<'a> {
    pub fn new(subject: &'a Collection) -> Self {
        Self { subject }
    }

    /// Subject duplicates the counterparty needs, ascending
    pub fn give_to(&self, other: &Collection) -> Vec<ItemId> {
        self.subject
            .duplicates
            .intersection(&other.needs)
            .copied()
            .collect()
    }

    /// Counterparty duplicates the subject needs, ascending
    pub fn receive_from(&self, other: &Collection) -> Vec<ItemId> {
        other
            .duplicates
            .intersection(&self.subject.needs)
            .copied()
            .collect()
    }

    /// Two-way exchange, only when both directions carry at least one item
    pub fn perfect_match(&self, member: &Member, other: &Collection) -> Option<PerfectMatch> {
        let give = self.give_to(other);
        let receive = self.receive_from(other);
        if give.is_empty() || receive.is_empty() {
            return None;
        }
        Some(PerfectMatch {
            counterparty: member.clone(),
            give,
            receive,
        })
    }

    pub fn receive_match(&self, member: &Member, other: &Collection) -> Option<ReceiveMatch> {
        let receive = self.receive_from(other);
        if receive.is_empty() {
            return None;
        }
        Some(ReceiveMatch {
            counterparty: member.clone(),
            receive,
        })
    }

    pub fn give_match(&self, member: &Member, other: &Collection) -> Option<GiveMatch> {
        let give = self.give_to(other);
        if give.is_empty() {
            return None;
        }
        Some(GiveMatch {
            counterparty: member.clone(),
            give,
        })
    }
}
