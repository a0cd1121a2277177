pub mod membership;

use itertools::Itertools;
use log::debug;
use serde::Serialize;
use tsify::Tsify;

use crate::{diagram::selection::Selection, error::LayoutError};
use membership::Membership;

/// Distinct count-keys per set (diagonal) and per pair of sets (above the diagonal).
///
/// Both counts are inclusive: `get(i, i)` counts keys in set `i` whatever else they belong to,
/// and `get(i, j)` counts keys in both `i` and `j`, triple overlaps included. Only the upper
/// triangle is stored; row `i` holds `get(i, i)..get(i, n - 1)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Tsify, Serialize)]
pub struct ContingencyTable {
    rows: Vec<Vec<usize>>,
}

fn check_lengths(categories: usize, keys: usize) -> Result<(), LayoutError> {
    if categories != keys {
        return Err(LayoutError::InputShape { categories, keys });
    }
    Ok(())
}

impl ContingencyTable {
    /// Accepts either a square matrix (lower triangle ignored) or upper-triangular rows.
    pub fn from_rows(rows: Vec<Vec<usize>>) -> Result<Self, LayoutError> {
        let n = rows.len();
        let square = rows.iter().all(|row| row.len() == n);
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                if square {
                    Ok(row[i..].to_vec())
                } else if row.len() == n - i {
                    Ok(row)
                } else {
                    Err(LayoutError::TableShape { row: i, expected: n - i, found: row.len() })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ContingencyTable { rows })
    }

    pub fn from_membership(membership: &Membership, num_sets: usize) -> Self {
        let rows = (0..num_sets)
            .map(|i| (i..num_sets).map(|j| membership.count_common(&[i, j])).collect())
            .collect();
        let table = ContingencyTable { rows };
        debug!("contingency table over {} keys: {:?}", membership.len(), table.rows);
        table
    }

    /// Selectable-set variant: a row belongs to set `s` iff its category is in `selection`'s set `s`.
    pub fn from_selection<C: AsRef<str>, K: AsRef<str>>(
        categories: &[C],
        keys: &[K],
        selection: &Selection,
    ) -> Result<(Self, Membership), LayoutError> {
        check_lengths(categories.len(), keys.len())?;
        let mut membership = Membership::new();
        for (category, key) in categories.iter().zip(keys) {
            membership.insert(key.as_ref(), selection.sets_of(category.as_ref()));
        }
        let table = Self::from_membership(&membership, selection.len());
        Ok((table, membership))
    }

    /// One set per distinct category, in order of first appearance.
    pub fn from_categories<C: AsRef<str>, K: AsRef<str>>(
        categories: &[C],
        keys: &[K],
    ) -> Result<(Self, Vec<String>, Membership), LayoutError> {
        check_lengths(categories.len(), keys.len())?;
        let names: Vec<String> = categories
            .iter()
            .map(|c| c.as_ref())
            .unique()
            .map(String::from)
            .collect();
        let mut membership = Membership::new();
        for (category, key) in categories.iter().zip(keys) {
            let set = names.iter().position(|name| name == category.as_ref());
            membership.insert(key.as_ref(), set);
        }
        let table = Self::from_membership(&membership, names.len());
        Ok((table, names, membership))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    /// Symmetric lookup.
    pub fn get(&self, i: usize, j: usize) -> usize {
        let (i, j) = if i <= j { (i, j) } else { (j, i) };
        self.rows[i][j - i]
    }

    /// Keys in set `i`.
    pub fn count(&self, i: usize) -> usize {
        self.get(i, i)
    }

    /// All `(i, j)` with `i < j`.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> {
        (0..self.len()).tuple_combinations()
    }

    /// Sum of set `i`'s pairwise overlaps with every other set.
    pub fn overlap_sum(&self, i: usize) -> usize {
        (0..self.len()).filter(|&j| j != i).map(|j| self.get(i, j)).sum()
    }
}
