//! Chart-level state: which sets a diagram shows, its styling options, and its legend.

pub mod legend;
pub mod multiple;
pub mod selection;
pub mod venn;

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    data::DataSource,
    error::LayoutError,
    layout::VennLayout,
    render::{pick_color, Style, Surface, TextStyle},
    viewport::{PaneRange, Viewport},
};
use legend::{LegendAction, ToggleState};

pub use multiple::{MultipleVenn, MultipleVennOptions};
pub use venn::{Venn, VennOptions};

/// A diagram whose legend entries toggle its state.
pub trait Interactive {
    fn activate<S: DataSource>(&mut self, action: &LegendAction, source: &mut S) -> Result<(), LayoutError>;
    fn deactivate<S: DataSource>(&mut self, action: &LegendAction, source: &mut S) -> Result<(), LayoutError>;
    fn current_state(&self, action: &LegendAction) -> ToggleState;
}

/// Stroke, fill and hover settings shared by both diagram kinds.
#[derive(Clone, Debug, PartialEq, Tsify, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub color: Option<Vec<String>>,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub opacity: f64,
    pub hover: bool,
}

impl Default for Appearance {
    fn default() -> Self {
        Appearance {
            color: None,
            stroke_color: "#000".to_string(),
            stroke_width: 1.,
            opacity: 0.7,
            hover: false,
        }
    }
}

impl Appearance {
    pub fn fill(&self, idx: usize) -> String {
        pick_color(self.color.as_deref(), idx)
    }

    pub fn style(&self, idx: usize) -> Style {
        Style {
            fill: self.fill(idx),
            stroke: self.stroke_color.clone(),
            stroke_width: self.stroke_width,
            opacity: self.opacity,
        }
    }
}

/// Fit `layout` to `surface` (+y up) and draw its circles, then its count labels.
pub(crate) fn draw_layout<S: Surface>(layout: &VennLayout, appearance: &Appearance, surface: &mut S) {
    let (width, height) = surface.size();
    let viewport = Viewport::fit(layout, &PaneRange::flipped(width, height));
    for circle in &layout.circles {
        let style = appearance.style(circle.set);
        let element = surface.draw_circle(viewport.x(circle.x), viewport.y(circle.y), viewport.r(circle.r), &style);
        if appearance.hover {
            let enter = style.with_fill(crate::render::darker(&style.fill, 1.));
            surface.on_hover(element, enter, style);
        }
    }
    let text = TextStyle::default();
    for label in &layout.labels {
        surface.draw_text(viewport.x(label.x), viewport.y(label.y), &label.value.to_string(), &text);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appearance_defaults() {
        let appearance: Appearance = serde_json::from_str(r#"{"opacity": 0.5}"#).unwrap();
        assert_eq!(appearance.stroke_color, "#000");
        assert_eq!(appearance.stroke_width, 1.);
        assert_eq!(appearance.opacity, 0.5);
        assert!(!appearance.hover);
        assert_eq!(appearance.fill(0), crate::render::COLORS[0]);
    }
}
