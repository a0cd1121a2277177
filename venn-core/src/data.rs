//! Tabular data collaborator: column access plus row filters registered by diagrams.

use std::{collections::BTreeMap, fmt};

use log::debug;
use serde_json::{Map, Value};

use crate::{error::LayoutError, events::DiagramId};

/// Read access to one row's cells.
pub trait Cells {
    fn cell(&self, column: &str) -> Option<&str>;
}

pub type RowFilter = Box<dyn Fn(&dyn Cells) -> bool>;

pub trait DataSource {
    fn column_values(&self, name: &str) -> Result<Vec<String>, LayoutError>;
    /// Column values of the rows that pass every registered filter not excepting `self_id`.
    fn filtered_column_values(&self, self_id: DiagramId, name: &str) -> Result<Vec<String>, LayoutError>;
    fn pick_up_cells(&self, name: &str, rows: &[usize]) -> Result<Vec<String>, LayoutError>;
    /// Replace `owner`'s filter. The filter is skipped when a diagram in `exceptions` reads.
    fn register_filter(&mut self, owner: DiagramId, predicate: RowFilter, exceptions: Vec<DiagramId>);
}

struct Registered {
    predicate: RowFilter,
    exceptions: Vec<DiagramId>,
}

/// In-memory column store of string cells.
#[derive(Default)]
pub struct Frame {
    columns: Vec<(String, Vec<String>)>,
    height: usize,
    filters: BTreeMap<DiagramId, Registered>,
}

struct FrameRow<'a> {
    frame: &'a Frame,
    idx: usize,
}

impl Cells for FrameRow<'_> {
    fn cell(&self, column: &str) -> Option<&str> {
        self.frame.column(column).ok().map(|values| values[self.idx].as_str())
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        v => v.to_string(),
    }
}

impl Frame {
    pub fn from_columns(columns: Vec<(String, Vec<String>)>) -> Result<Self, LayoutError> {
        let height = columns.first().map_or(0, |(_, values)| values.len());
        for (name, values) in &columns {
            if values.len() != height {
                return Err(LayoutError::ColumnLength { column: name.clone(), expected: height, found: values.len() });
            }
        }
        Ok(Frame { columns, height, filters: BTreeMap::new() })
    }

    /// Rows as JSON objects; a row lacking a column gets an empty cell there.
    pub fn from_rows(rows: &[Map<String, Value>]) -> Self {
        let mut names: Vec<String> = Vec::new();
        for row in rows {
            for name in row.keys() {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }
        let columns = names
            .into_iter()
            .map(|name| {
                let values = rows.iter().map(|row| row.get(&name).map(cell_text).unwrap_or_default()).collect();
                (name, values)
            })
            .collect();
        Frame { columns, height: rows.len(), filters: BTreeMap::new() }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    fn column(&self, name: &str) -> Result<&[String], LayoutError> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
            .ok_or_else(|| LayoutError::MissingColumn(name.to_string()))
    }

    /// Indices of rows visible to `reader`.
    pub fn filtered_rows(&self, reader: DiagramId) -> Vec<usize> {
        let active: Vec<&Registered> = self
            .filters
            .values()
            .filter(|f| !f.exceptions.contains(&reader))
            .collect();
        (0..self.height)
            .filter(|&idx| {
                let row = FrameRow { frame: self, idx };
                active.iter().all(|f| (f.predicate)(&row))
            })
            .collect()
    }

    pub fn remove_filter(&mut self, owner: DiagramId) {
        self.filters.remove(&owner);
    }
}

impl DataSource for Frame {
    fn column_values(&self, name: &str) -> Result<Vec<String>, LayoutError> {
        Ok(self.column(name)?.to_vec())
    }

    fn filtered_column_values(&self, self_id: DiagramId, name: &str) -> Result<Vec<String>, LayoutError> {
        let rows = self.filtered_rows(self_id);
        self.pick_up_cells(name, &rows)
    }

    fn pick_up_cells(&self, name: &str, rows: &[usize]) -> Result<Vec<String>, LayoutError> {
        let values = self.column(name)?;
        Ok(rows.iter().filter_map(|&idx| values.get(idx).cloned()).collect())
    }

    fn register_filter(&mut self, owner: DiagramId, predicate: RowFilter, exceptions: Vec<DiagramId>) {
        debug!("{} registered a row filter (exceptions: {:?})", owner, exceptions);
        self.filters.insert(owner, Registered { predicate, exceptions });
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("columns", &self.column_names().collect::<Vec<_>>())
            .field("height", &self.height)
            .field("filters", &self.filters.keys().collect::<Vec<_>>())
            .finish()
    }
}
