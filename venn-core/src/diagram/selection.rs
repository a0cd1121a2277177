use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{error::LayoutError, membership::Placement};

/// Categories assigned to each set of a selectable Venn diagram.
///
/// A row belongs to set `s` iff its category is among `categories(s)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Tsify, Serialize, Deserialize)]
pub struct Selection {
    sets: Vec<Vec<String>>,
}

impl Selection {
    pub fn new(sets: Vec<Vec<String>>) -> Self {
        Selection { sets }
    }

    /// One category per set: set `s` starts with the `s`-th distinct category, or nothing if
    /// there are fewer categories than sets.
    pub fn first_categories(categories: &[String], num_sets: usize) -> Self {
        let sets = (0..num_sets)
            .map(|idx| categories.get(idx).cloned().into_iter().collect())
            .collect();
        Selection { sets }
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    fn check(&self, set: usize) -> Result<(), LayoutError> {
        if set < self.sets.len() {
            Ok(())
        } else {
            Err(LayoutError::SetIndex { index: set, sets: self.sets.len() })
        }
    }

    pub fn categories(&self, set: usize) -> &[String] {
        self.sets.get(set).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, set: usize, category: &str) -> bool {
        self.categories(set).iter().any(|c| c == category)
    }

    pub fn sets_of<'a>(&'a self, category: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.sets
            .iter()
            .enumerate()
            .filter(move |(_, categories)| categories.iter().any(|c| c == category))
            .map(|(idx, _)| idx)
    }

    pub fn in_any(&self, category: &str) -> bool {
        self.sets_of(category).next().is_some()
    }

    /// Returns false if `category` was already selected for `set`.
    pub fn add(&mut self, set: usize, category: &str) -> Result<bool, LayoutError> {
        self.check(set)?;
        if self.contains(set, category) {
            return Ok(false);
        }
        self.sets[set].push(category.to_string());
        Ok(true)
    }

    /// Returns false if `category` was not selected for `set`.
    pub fn remove(&mut self, set: usize, category: &str) -> Result<bool, LayoutError> {
        self.check(set)?;
        let categories = &mut self.sets[set];
        match categories.iter().position(|c| c == category) {
            Some(pos) => {
                categories.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Which rows a selectable Venn diagram lets through to the other diagrams.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Tsify, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterMode {
    /// Rows whose category is in any set
    #[default]
    All,
    /// Rows in some set whose count-key sits in at least two sets
    Overlapping,
    /// Rows in some set whose count-key sits in at most one set
    NonOverlapping,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [FilterMode::All, FilterMode::Overlapping, FilterMode::NonOverlapping];

    pub fn label(&self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Overlapping => "overlapping",
            FilterMode::NonOverlapping => "non-overlapping",
        }
    }

    /// Whether a row passes, given whether its category is selected at all and where its
    /// count-key landed.
    pub fn admits(&self, selected: bool, placement: Placement) -> bool {
        if !selected {
            return false;
        }
        match self {
            FilterMode::All => true,
            FilterMode::Overlapping => placement == Placement::Overlap,
            FilterMode::NonOverlapping => placement != Placement::Overlap,
        }
    }
}

impl Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_categories() {
        let selection = Selection::first_categories(&strings(&["a", "b"]), 3);
        assert_eq!(selection, Selection::new(vec![strings(&["a"]), strings(&["b"]), vec![]]));
        assert_eq!(selection.sets_of("b").collect::<Vec<_>>(), vec![1]);
        assert!(!selection.in_any("c"));
    }

    #[test]
    fn add_remove() {
        let mut selection = Selection::first_categories(&strings(&["a", "b", "c"]), 3);
        assert!(selection.add(0, "c").unwrap());
        assert!(!selection.add(0, "c").unwrap());
        assert_eq!(selection.sets_of("c").collect::<Vec<_>>(), vec![0, 2]);
        assert!(selection.remove(2, "c").unwrap());
        assert!(!selection.remove(2, "c").unwrap());
        assert_eq!(selection.categories(0), &strings(&["a", "c"])[..]);
        assert_eq!(selection.add(3, "a"), Err(LayoutError::SetIndex { index: 3, sets: 3 }));
    }

    #[test]
    fn filter_modes() {
        use Placement::*;
        assert!(FilterMode::All.admits(true, None));
        assert!(!FilterMode::All.admits(false, Overlap));
        assert!(FilterMode::Overlapping.admits(true, Overlap));
        assert!(!FilterMode::Overlapping.admits(true, Single(0)));
        assert!(FilterMode::NonOverlapping.admits(true, Single(2)));
        assert!(FilterMode::NonOverlapping.admits(true, None));
        assert!(!FilterMode::NonOverlapping.admits(true, Overlap));
    }

    #[test]
    fn serde_labels() {
        let mode: FilterMode = serde_json::from_str("\"non-overlapping\"").unwrap();
        assert_eq!(mode, FilterMode::NonOverlapping);
        assert_eq!(mode.to_string(), "non-overlapping");
    }
}
