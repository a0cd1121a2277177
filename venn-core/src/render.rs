//! Drawing collaborator: diagrams emit circles and text onto a [`Surface`].

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tsify::Tsify;

/// Default fill palette (d3 "category20")
pub const COLORS: &[&str] = &[
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c",
    "#98df8a", "#d62728", "#ff9896", "#9467bd", "#c5b0d5",
    "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f",
    "#c7c7c7", "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Tsify, Serialize, Deserialize)]
pub struct ElementId(pub usize);

impl Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "el{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Tsify, Serialize, Deserialize)]
pub struct Style {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    /// Fill opacity
    pub opacity: f64,
}

impl Style {
    pub fn with_fill(&self, fill: String) -> Self {
        Style { fill, ..self.clone() }
    }
}

#[derive(Clone, Debug, PartialEq, Tsify, Serialize, Deserialize)]
pub struct TextStyle {
    pub fill: String,
    pub font_size: f64,
    pub anchor: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle { fill: "#000".to_string(), font_size: 12., anchor: "middle".to_string() }
    }
}

pub trait Surface {
    /// `(width, height)` in pixels
    fn size(&self) -> (f64, f64);
    fn draw_circle(&mut self, x: f64, y: f64, r: f64, style: &Style) -> ElementId;
    fn draw_text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle);
    /// Swap `element`'s style to `enter` while hovered, back to `exit` afterwards.
    fn on_hover(&mut self, element: ElementId, enter: Style, exit: Style);
}

fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut rgb = [0; 3];
            for (idx, c) in hex.chars().enumerate() {
                let v = channel(&c.to_string())?;
                rgb[idx] = v * 17;
            }
            Some(rgb)
        }
        6 => Some([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?]),
        _ => None,
    }
}

/// Darken a `#rgb`/`#rrggbb` color by `0.7^k`. Other color syntaxes are returned unchanged.
pub fn darker(color: &str, k: f64) -> String {
    match parse_hex(color) {
        Some(rgb) => {
            let factor = 0.7f64.powf(k);
            let [r, g, b] = rgb.map(|c| (c as f64 * factor).round().clamp(0., 255.) as u8);
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        }
        None => color.to_string(),
    }
}

/// Color for the `idx`-th key of a diagram: the user's colors cycle if given, else the default
/// palette.
pub fn pick_color(colors: Option<&[String]>, idx: usize) -> String {
    match colors {
        Some(colors) if !colors.is_empty() => colors[idx % colors.len()].clone(),
        _ => COLORS[idx % COLORS.len()].to_string(),
    }
}
