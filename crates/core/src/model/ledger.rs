use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::OptionLetter;

/// Answers chosen so far, keyed by 0-based question index.
///
/// Holds at most one letter per index. Entries are only inserted or
/// overwritten; writing one index never touches another. Serializes as the
/// `{ "0": "A", ... }` map the scoring endpoint expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerLedger {
    entries: BTreeMap<usize, OptionLetter>,
}

impl AnswerLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `letter` for `index`, returning the letter it replaced.
    pub fn set(&mut self, index: usize, letter: OptionLetter) -> Option<OptionLetter> {
        self.entries.insert(index, letter)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<OptionLetter> {
        self.entries.get(&index).copied()
    }

    /// Number of distinct answered indices.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, OptionLetter)> + '_ {
        self.entries.iter().map(|(index, letter)| (*index, *letter))
    }
}
