use std::collections::{BTreeMap, BTreeSet};

use derive_more::Deref;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

/// Where a count-key landed among a diagram's sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Tsify, Serialize, Deserialize)]
#[serde(tag = "kind", content = "set")]
pub enum Placement {
    None,
    Single(usize),
    Overlap,
}

/// Sets each distinct count-key belongs to.
///
/// Keys whose rows fall in no set are still present, with an empty set list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deref, Tsify, Serialize, Deserialize)]
pub struct Membership(BTreeMap<String, BTreeSet<usize>>);

impl Membership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a row: `key` exists, and belongs to each of `sets`.
    pub fn insert<I: IntoIterator<Item = usize>>(&mut self, key: &str, sets: I) {
        let entry = self.0.entry(key.to_string()).or_default();
        entry.extend(sets);
    }

    /// Number of keys belonging to every set in `sets` (and possibly others).
    pub fn count_common(&self, sets: &[usize]) -> usize {
        self.0
            .values()
            .filter(|member_of| sets.iter().all(|set| member_of.contains(set)))
            .count()
    }

    /// Unknown keys are in no set.
    pub fn classify(&self, key: &str) -> Placement {
        match self.0.get(key) {
            None => Placement::None,
            Some(sets) => match sets.len() {
                0 => Placement::None,
                1 => sets.iter().next().map_or(Placement::None, |&set| Placement::Single(set)),
                _ => Placement::Overlap,
            },
        }
    }
}
