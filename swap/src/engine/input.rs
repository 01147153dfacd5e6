//! Item Number Input
//!
//! Members type their numbers as free text such as `"4, 10, 55"` or
//! `"4 10 55"`. Tokens that are not plain non-negative integers are
//! dropped rather than reported as errors.

use std::collections::BTreeSet;

use super::entry::{ItemId, MAX_ITEM_ID};

/// Outcome of parsing free text, keeping what was thrown away
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedNumbers {
    pub items: BTreeSet<ItemId>,
    /// Discarded tokens, in input order
    pub rejected: Vec<String>,
}

/// Parses free text into a set of item numbers, silently skipping bad tokens
pub fn parse_numbers(text: &str) -> BTreeSet<ItemId> {
    parse_numbers_detailed(text).items
}

/// Parses free text into item numbers and the tokens that were skipped
///
/// A token is kept only when it is made of ASCII digits and is at most
/// [`MAX_ITEM_ID`]; signs, decimals, words and larger numbers are rejected.
pub fn parse_numbers_detailed(text: &str) -> ParsedNumbers {
    let mut parsed = ParsedNumbers::default();
    for token in text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let number = if token.bytes().all(|b| b.is_ascii_digit()) {
            token.parse::<ItemId>().ok().filter(|n| *n <= MAX_ITEM_ID)
        } else {
            None
        };
        match number {
            Some(n) => {
                parsed.items.insert(n);
            }
            None => parsed.rejected.push(token.to_string()),
        }
    }
    parsed
}

/// Formats item numbers the way they are shown back to a member: `"1, 2, 3"`
pub fn format_numbers<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a ItemId>,
{
    items
        .into_iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
