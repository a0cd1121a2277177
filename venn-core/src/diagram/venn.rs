//! Selectable-set Venn diagram: each of `k` circles is a user-chosen group of categories, and
//! the diagram filters the rows other diagrams see.

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use super::{
    draw_layout,
    legend::{LegendAction, LegendEntry, LegendGroup, ToggleState},
    selection::{FilterMode, Selection},
    Appearance, Interactive,
};
use crate::{
    data::{Cells, DataSource, RowFilter},
    error::LayoutError,
    events::{DiagramId, Notifier},
    layout::{layout_with_config, VennLayout},
    membership::{Membership, Placement},
    render::Surface,
    simplex::SimplexConfig,
    table::ContingencyTable,
};

#[derive(Clone, Debug, PartialEq, Tsify, Serialize, Deserialize)]
#[serde(default)]
pub struct VennOptions {
    /// Column holding each row's category
    pub category: String,
    /// Column holding each row's count-key; sets count distinct keys
    pub count: String,
    #[serde(flatten)]
    pub appearance: Appearance,
    /// One name per set; also fixes the number of sets
    pub area_names: Vec<String>,
    /// Add a radio legend group for the filter mode
    pub filter_control: bool,
    pub simplex: SimplexConfig,
}

impl Default for VennOptions {
    fn default() -> Self {
        VennOptions {
            category: String::new(),
            count: String::new(),
            appearance: Appearance::default(),
            area_names: ["VENN1", "VENN2", "VENN3"].map(String::from).to_vec(),
            filter_control: false,
            simplex: SimplexConfig::default(),
        }
    }
}

#[derive(Debug)]
pub struct Venn {
    id: DiagramId,
    options: VennOptions,
    /// Distinct categories of the unfiltered column, offered as legend toggles
    categories: Vec<String>,
    selection: Selection,
    filter_mode: FilterMode,
    table: ContingencyTable,
    membership: Membership,
    layout: VennLayout,
    notifier: Notifier,
}

impl Venn {
    /// Start with the first `area_names.len()` categories, one per set, and publish the
    /// resulting row filter.
    pub fn new<S: DataSource>(
        id: DiagramId,
        options: VennOptions,
        source: &mut S,
        notifier: Notifier,
    ) -> Result<Self, LayoutError> {
        let categories: Vec<String> = source.column_values(&options.category)?.into_iter().unique().collect();
        let selection = Selection::first_categories(&categories, options.area_names.len());
        let mut venn = Venn {
            id,
            options,
            categories,
            selection,
            filter_mode: FilterMode::default(),
            table: ContingencyTable::default(),
            membership: Membership::new(),
            layout: VennLayout::default(),
            notifier,
        };
        venn.refresh(source)?;
        Ok(venn)
    }

    pub fn id(&self) -> DiagramId {
        self.id
    }

    pub fn options(&self) -> &VennOptions {
        &self.options
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    pub fn table(&self) -> &ContingencyTable {
        &self.table
    }

    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    pub fn layout(&self) -> &VennLayout {
        &self.layout
    }

    /// Replace the selection and filter mode wholesale, e.g. from a saved chart description.
    pub fn configure<S: DataSource>(
        &mut self,
        selection: Selection,
        filter_mode: FilterMode,
        source: &mut S,
    ) -> Result<(), LayoutError> {
        let sets = self.options.area_names.len();
        if selection.len() != sets {
            return Err(LayoutError::SetIndex { index: selection.len(), sets });
        }
        self.selection = selection;
        self.filter_mode = filter_mode;
        self.refresh(source)
    }

    /// Recompute table, membership and layout from the rows every other diagram lets through.
    pub fn update<S: DataSource>(&mut self, source: &S) -> Result<(), LayoutError> {
        let categories = source.filtered_column_values(self.id, &self.options.category)?;
        let keys = source.filtered_column_values(self.id, &self.options.count)?;
        let (table, membership) = ContingencyTable::from_selection(&categories, &keys, &self.selection)?;
        self.layout = layout_with_config(&table, &self.options.simplex)?;
        debug!("{}: {} rows, table {:?}", self.id, categories.len(), table.rows());
        self.table = table;
        self.membership = membership;
        Ok(())
    }

    /// Publish this diagram's row filter (not applied to itself) and post a redraw notification.
    pub fn tell_update<S: DataSource>(&self, source: &mut S) {
        let category = self.options.category.clone();
        let count = self.options.count.clone();
        let selection = self.selection.clone();
        let membership = self.membership.clone();
        let mode = self.filter_mode;
        let predicate: RowFilter = Box::new(move |row: &dyn Cells| {
            let selected = row.cell(&category).is_some_and(|c| selection.in_any(c));
            let placement = row.cell(&count).map_or(Placement::None, |key| membership.classify(key));
            mode.admits(selected, placement)
        });
        source.register_filter(self.id, predicate, vec![self.id]);
        self.notifier.notify(self.id);
    }

    fn refresh<S: DataSource>(&mut self, source: &mut S) -> Result<(), LayoutError> {
        self.update(source)?;
        self.tell_update(source);
        Ok(())
    }

    /// One group per set (area name, then a toggle per category), plus the filter-mode radio
    /// group when `filter_control` is set.
    pub fn legend(&self) -> Vec<LegendGroup> {
        let mut groups: Vec<LegendGroup> = self
            .options
            .area_names
            .iter()
            .enumerate()
            .map(|(set, name)| {
                let mut entries = vec![LegendEntry::header(name, &self.options.appearance.fill(set))];
                for category in &self.categories {
                    let action = LegendAction::Category { set, category: category.clone() };
                    entries.push(LegendEntry::toggle(category, self.current_state(&action), action));
                }
                LegendGroup { entries, radio: false }
            })
            .collect();
        if self.options.filter_control {
            let mut entries = vec![LegendEntry::header("Filter", "gray")];
            for mode in FilterMode::ALL {
                let action = LegendAction::FilterMode { mode };
                entries.push(LegendEntry::toggle(mode.label(), self.current_state(&action), action));
            }
            groups.push(LegendGroup { entries, radio: true });
        }
        groups
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) {
        draw_layout(&self.layout, &self.options.appearance, surface);
    }
}

impl Interactive for Venn {
    fn activate<S: DataSource>(&mut self, action: &LegendAction, source: &mut S) -> Result<(), LayoutError> {
        match action {
            LegendAction::Category { set, category } => {
                self.selection.add(*set, category)?;
            }
            LegendAction::FilterMode { mode } => {
                self.filter_mode = *mode;
            }
        }
        self.refresh(source)
    }

    fn deactivate<S: DataSource>(&mut self, action: &LegendAction, source: &mut S) -> Result<(), LayoutError> {
        match action {
            LegendAction::Category { set, category } => {
                self.selection.remove(*set, category)?;
                self.refresh(source)
            }
            LegendAction::FilterMode { .. } => Ok(()),
        }
    }

    fn current_state(&self, action: &LegendAction) -> ToggleState {
        match action {
            LegendAction::Category { set, category } => self.selection.contains(*set, category).into(),
            LegendAction::FilterMode { mode } => (self.filter_mode == *mode).into(),
        }
    }
}
