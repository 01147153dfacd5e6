//! Member Identity
//!
//! Members are keyed by their display name, normalized so that the same
//! person typing `" alice "` or `"ALICE"` lands on the same record.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SwapError;

/// A club member, identified by a normalized display name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Member(String);

impl Member {
    /// Normalizes a raw name into a member identifier
    ///
    /// Leading and trailing whitespace is removed, inner whitespace runs
    /// collapse to a single space and each alphabetic run is title-cased.
    ///
    /// # Returns
    /// * `Ok(Member)` - The normalized member
    /// * `Err(SwapError::EmptyMemberName)` - If nothing but whitespace was given
    pub fn new(raw: &str) -> Result<Self, SwapError> {
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            return Err(SwapError::EmptyMemberName);
        }
        Ok(Member(title_case(&collapsed)))
    }

    /// Wraps a name read back from storage, which was normalized on save
    pub(crate) fn from_stored(name: String) -> Self {
        Member(name)
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Upper-cases the first character of each alphabetic run and lower-cases
/// the rest, including any extra characters the upper-casing produced, so
/// that applying it twice changes nothing (`"ßa"` gives `"Ssa"`).
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if !c.is_alphabetic() {
            out.push(c);
            continue;
        }
        let mut upper = c.to_uppercase();
        if let Some(head) = upper.next() {
            out.push(head);
        }
        let mut rest: String = upper.collect();
        while let Some(&next) = chars.peek() {
            if !next.is_alphabetic() {
                break;
            }
            rest.push(next);
            chars.next();
        }
        out.push_str(&rest.to_lowercase());
    }
    out
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Member {
    type Error = SwapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Member::new(&value)
    }
}

impl From<Member> for String {
    fn from(member: Member) -> Self {
        member.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_normalization() {
        assert_eq!(Member::new("  alice ").unwrap().name(), "Alice");
        assert_eq!(Member::new("BOB").unwrap().name(), "Bob");
        assert_eq!(Member::new("jean-luc").unwrap().name(), "Jean-Luc");
        assert_eq!(Member::new("anne   marie").unwrap().name(), "Anne Marie");
        assert_eq!(Member::new("élodie").unwrap().name(), "Élodie");
    }

    #[test]
    fn test_member_normalization_is_stable() {
        for raw in ["ßa", "ﬁona", "straße", "jean-luc", "  o'neil  smith ", "İlker", "ǆenan"] {
            let member = Member::new(raw).unwrap();
            assert_eq!(Member::new(member.name()).unwrap(), member, "input {:?}", raw);
        }
        assert_eq!(Member::new("ßa").unwrap().name(), "Ssa");
        assert_eq!(Member::new("ﬁona").unwrap().name(), "Fiona");
    }

    #[test]
    fn test_member_same_key_for_variants() {
        assert_eq!(Member::new("alice").unwrap(), Member::new(" ALICE ").unwrap());
    }

    #[test]
    fn test_member_empty_rejected() {
        assert!(matches!(Member::new(""), Err(SwapError::EmptyMemberName)));
        assert!(matches!(Member::new(" \t\n"), Err(SwapError::EmptyMemberName)));
    }

    #[test]
    fn test_member_serde_normalizes() {
        let member: Member = serde_json::from_str("\"  charlie \"").unwrap();
        assert_eq!(member.name(), "Charlie");
        assert_eq!(serde_json::to_string(&member).unwrap(), "\"Charlie\"");
        assert!(serde_json::from_str::<Member>("\"  \"").is_err());
    }
}
