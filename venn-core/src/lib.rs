#[cfg_attr(not(test), allow(unused_imports))]
#[macro_use]
extern crate approx;

// Organized modules
pub mod diagram;
pub mod geometry;
pub mod layout;
pub mod optimization;
pub mod table;

// Collaborator seams
pub mod data;
pub mod events;
pub mod render;

pub mod error;

pub use geometry::circle;
pub use geometry::r2;

pub use optimization::loss;
pub use optimization::simplex;

pub use layout::placement;
pub use layout::viewport;

pub use table::membership;

// Re-export key types for external use
pub use data::{Cells, DataSource, Frame, RowFilter};
pub use diagram::{Appearance, Interactive, MultipleVenn, MultipleVennOptions, Venn, VennOptions};
pub use diagram::legend::{LegendAction, LegendEntry, LegendGroup, ToggleState};
pub use diagram::selection::{FilterMode, Selection};
pub use error::LayoutError;
pub use events::{DiagramId, Notification, Notifier, RedrawScheduler};
pub use layout::{CirclePosition, LabelPosition, VennLayout};
pub use membership::{Membership, Placement};
pub use r2::R2;
pub use render::{ElementId, Style, Surface, TextStyle};
pub use simplex::{Minimum, Simplex, SimplexConfig};
pub use table::ContingencyTable;
pub use viewport::Viewport;

/// Parse a log level string into LevelFilter.
pub fn parse_log_level(level: Option<&str>) -> Result<log::LevelFilter, LayoutError> {
    match level {
        Some("error") => Ok(log::LevelFilter::Error),
        Some("warn") => Ok(log::LevelFilter::Warn),
        Some("info") | Some("") | None => Ok(log::LevelFilter::Info),
        Some("debug") => Ok(log::LevelFilter::Debug),
        Some("trace") => Ok(log::LevelFilter::Trace),
        Some(level) => Err(LayoutError::InvalidLogLevel(level.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_levels() {
        assert_eq!(parse_log_level(None).unwrap(), log::LevelFilter::Info);
        assert_eq!(parse_log_level(Some("")).unwrap(), log::LevelFilter::Info);
        assert_eq!(parse_log_level(Some("trace")).unwrap(), log::LevelFilter::Trace);
        assert!(matches!(
            parse_log_level(Some("loud")),
            Err(LayoutError::InvalidLogLevel(level)) if level == "loud"
        ));
    }
}
