use serde::{Deserialize, Serialize};
use tsify::Tsify;

use super::selection::FilterMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Tsify, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleState {
    On,
    Off,
}

impl From<bool> for ToggleState {
    fn from(on: bool) -> Self {
        if on { ToggleState::On } else { ToggleState::Off }
    }
}

/// What toggling a legend entry does to its diagram.
#[derive(Clone, Debug, PartialEq, Eq, Tsify, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LegendAction {
    /// Add `category` to (on) or remove it from (off) set `set`
    Category { set: usize, category: String },
    /// Make this the current filter mode; turning a mode off does nothing
    FilterMode { mode: FilterMode },
}

#[derive(Clone, Debug, PartialEq, Tsify, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    /// `None` for header and static entries
    pub state: Option<ToggleState>,
    pub action: Option<LegendAction>,
}

impl LegendEntry {
    pub fn header(label: &str, color: &str) -> Self {
        LegendEntry { label: label.to_string(), color: color.to_string(), state: None, action: None }
    }

    pub fn toggle(label: &str, state: ToggleState, action: LegendAction) -> Self {
        LegendEntry { label: label.to_string(), color: "black".to_string(), state: Some(state), action: Some(action) }
    }
}

#[derive(Clone, Debug, PartialEq, Tsify, Serialize, Deserialize)]
pub struct LegendGroup {
    pub entries: Vec<LegendEntry>,
    /// At most one toggle on at a time
    pub radio: bool,
}

impl LegendGroup {
    pub fn toggles(&self) -> impl Iterator<Item = &LegendEntry> {
        self.entries.iter().filter(|e| e.action.is_some())
    }

    pub fn active_labels(&self) -> Vec<&str> {
        self.toggles()
            .filter(|e| e.state == Some(ToggleState::On))
            .map(|e| e.label.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_shape() {
        let action = LegendAction::FilterMode { mode: FilterMode::NonOverlapping };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json, serde_json::json!({"type": "filter_mode", "mode": "non-overlapping"}));
        let action: LegendAction = serde_json::from_str(r#"{"type": "category", "set": 1, "category": "dog"}"#).unwrap();
        assert_eq!(action, LegendAction::Category { set: 1, category: "dog".to_string() });
    }

    #[test]
    fn active_labels() {
        let group = LegendGroup {
            entries: vec![
                LegendEntry::header("VENN1", "#1f77b4"),
                LegendEntry::toggle("cat", ToggleState::On, LegendAction::Category { set: 0, category: "cat".to_string() }),
                LegendEntry::toggle("dog", ToggleState::Off, LegendAction::Category { set: 0, category: "dog".to_string() }),
            ],
            radio: false,
        };
        assert_eq!(group.toggles().count(), 2);
        assert_eq!(group.active_labels(), vec!["cat"]);
    }
}
