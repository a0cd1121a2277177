//! Venn diagram with one circle per distinct category.

use log::debug;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use super::{
    draw_layout,
    legend::{LegendEntry, LegendGroup},
    Appearance,
};
use crate::{
    data::DataSource,
    error::LayoutError,
    events::DiagramId,
    layout::{layout_with_config, VennLayout},
    membership::Membership,
    render::Surface,
    simplex::SimplexConfig,
    table::ContingencyTable,
};

#[derive(Clone, Debug, Default, PartialEq, Tsify, Serialize, Deserialize)]
#[serde(default)]
pub struct MultipleVennOptions {
    pub category: String,
    pub count: String,
    #[serde(flatten)]
    pub appearance: Appearance,
    pub simplex: SimplexConfig,
}

#[derive(Clone, Debug)]
pub struct MultipleVenn {
    id: DiagramId,
    options: MultipleVennOptions,
    names: Vec<String>,
    table: ContingencyTable,
    membership: Membership,
    layout: VennLayout,
}

impl MultipleVenn {
    /// Lay out every row of `source`, ignoring other diagrams' filters.
    pub fn new<S: DataSource>(id: DiagramId, options: MultipleVennOptions, source: &S) -> Result<Self, LayoutError> {
        let categories = source.column_values(&options.category)?;
        let keys = source.column_values(&options.count)?;
        let mut venn = MultipleVenn {
            id,
            options,
            names: vec![],
            table: ContingencyTable::default(),
            membership: Membership::new(),
            layout: VennLayout::default(),
        };
        venn.rebuild(&categories, &keys)?;
        Ok(venn)
    }

    fn rebuild(&mut self, categories: &[String], keys: &[String]) -> Result<(), LayoutError> {
        let (table, names, membership) = ContingencyTable::from_categories(categories, keys)?;
        self.layout = layout_with_config(&table, &self.options.simplex)?;
        debug!("{}: sets {:?}, table {:?}", self.id, names, table.rows());
        self.table = table;
        self.names = names;
        self.membership = membership;
        Ok(())
    }

    /// Re-lay out from just the rows at `rows` (e.g. a brushed selection in another diagram).
    pub fn select_rows<S: DataSource>(&mut self, source: &S, rows: &[usize]) -> Result<(), LayoutError> {
        let categories = source.pick_up_cells(&self.options.category, rows)?;
        let keys = source.pick_up_cells(&self.options.count, rows)?;
        self.rebuild(&categories, &keys)
    }

    pub fn id(&self) -> DiagramId {
        self.id
    }

    pub fn options(&self) -> &MultipleVennOptions {
        &self.options
    }

    /// Category of each set, by set index
    pub fn names(&self) -> &[String] {
        &self.names
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

    /// One static entry per set.
    pub fn legend(&self) -> LegendGroup {
        let entries = self
            .names
            .iter()
            .enumerate()
            .map(|(set, name)| LegendEntry::header(name, &self.options.appearance.fill(set)))
            .collect();
        LegendGroup { entries, radio: false }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) {
        draw_layout(&self.layout, &self.options.appearance, surface);
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::{data::Frame, diagram::testing::Recording, Cells};

    fn options() -> MultipleVennOptions {
        MultipleVennOptions { category: "pet".to_string(), count: "owner".to_string(), ..MultipleVennOptions::default() }
    }

    #[test]
    fn one_set_per_category() {
        let frame = Frame::load_csv("testdata/pets.csv").unwrap();
        let venn = MultipleVenn::new(DiagramId(3), options(), &frame).unwrap();
        assert_eq!(venn.names(), &["cat", "dog", "fish", "bird"].map(String::from));
        assert_eq!(venn.table().rows(), &[vec![4, 2, 1, 1], vec![4, 2, 0], vec![3, 0], vec![2]]);
        assert_eq!(venn.layout().circles.len(), 4);
        assert_eq!(venn.layout().labels.len(), 10);
        assert!(venn.layout().loss.is_finite());
    }

    #[test]
    fn ignores_filters() {
        let mut frame = Frame::load_csv("testdata/pets.csv").unwrap();
        frame.register_filter(DiagramId(0), Box::new(|row: &dyn Cells| row.cell("pet") == Some("cat")), vec![]);
        let venn = MultipleVenn::new(DiagramId(3), options(), &frame).unwrap();
        assert_eq!(venn.names().len(), 4);
    }

    #[test]
    fn select_rows() {
        let frame = Frame::load_csv("testdata/pets.csv").unwrap();
        let mut venn = MultipleVenn::new(DiagramId(3), options(), &frame).unwrap();
        // ann/cat, ann/dog, bob/cat
        venn.select_rows(&frame, &[0, 1, 2]).unwrap();
        assert_eq!(venn.names(), &["cat", "dog"].map(String::from));
        let values: Vec<usize> = venn.layout().labels.iter().map(|l| l.value).collect();
        assert_eq!(values, vec![2, 1, 1]);

        venn.select_rows(&frame, &[]).unwrap();
        assert!(venn.names().is_empty());
        assert!(venn.layout().circles.is_empty());
    }

    #[test]
    fn legend_and_draw() {
        let frame = Frame::load_csv("testdata/pets.csv").unwrap();
        let venn = MultipleVenn::new(DiagramId(3), options(), &frame).unwrap();
        let legend = venn.legend();
        assert_eq!(legend.entries.len(), 4);
        assert_eq!(legend.entries[3].label, "bird");
        assert_eq!(legend.toggles().count(), 0);

        let mut surface = Recording::default();
        venn.draw(&mut surface);
        assert_eq!(surface.circles.len(), 4);
        assert_eq!(surface.texts.len(), 10);
        assert_eq!(surface.circles[2].3.fill, crate::render::COLORS[2]);
    }

    #[test]
    fn missing_column() {
        let frame = Frame::load_csv("testdata/pets.csv").unwrap();
        let options = MultipleVennOptions { count: "household".to_string(), ..options() };
        let err = MultipleVenn::new(DiagramId(3), options, &frame).unwrap_err();
        assert_eq!(err, LayoutError::MissingColumn("household".to_string()));
    }
}
