#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Category and count-key columns differ in length: {categories} categories, {keys} keys")]
    InputShape {
        categories: usize,
        keys: usize,
    },

    #[error("Contingency table row {row} has {found} entries, expected {expected}")]
    TableShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Non-finite {what}: {value}")]
    NumericDomain {
        what: &'static str,
        value: f64,
    },

    #[error("Column {column:?} has {found} rows, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Missing column: {0:?}")]
    MissingColumn(String),

    #[error("Set index {index} out of range for {sets} sets")]
    SetIndex {
        index: usize,
        sets: usize,
    },

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

impl LayoutError {
    /// Fail with [`LayoutError::NumericDomain`] unless `value` is finite.
    pub fn check_finite(what: &'static str, value: f64) -> Result<f64, LayoutError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(LayoutError::NumericDomain { what, value })
        }
    }
}
