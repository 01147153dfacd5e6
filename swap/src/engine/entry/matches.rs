//! Match Records
//!
//! The three record shapes a report is made of. Item lists are always
//! sorted ascending without repeats.

use serde::{Deserialize, Serialize};

use super::{ItemId, Member};

/// A counterparty both able to give to and receive from the subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerfectMatch {
    pub counterparty: Member,
    /// Items the subject can hand over
    pub give: Vec<ItemId>,
    /// Items the subject can get back
    pub receive: Vec<ItemId>,
}

/// A counterparty holding duplicates the subject needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveMatch {
    pub counterparty: Member,
    pub receive: Vec<ItemId>,
}

/// A counterparty needing duplicates the subject holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiveMatch {
    pub counterparty: Member,
    pub give: Vec<ItemId>,
}
