//! SVG rendering of diagrams.

use venn_core::render::{ElementId, Style, Surface, TextStyle};

/// Escape text for use in SVG content and attribute values.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// [`Surface`] accumulating an SVG document; hover highlights become CSS rules.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    elements: Vec<String>,
    rules: Vec<String>,
    circles: usize,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        SvgSurface { width, height, elements: vec![], rules: vec![], circles: 0 }
    }

    pub fn finish(&self) -> String {
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = self.width,
            h = self.height,
        );
        if !self.rules.is_empty() {
            svg.push_str("  <style>\n");
            for rule in &self.rules {
                svg.push_str(&format!("    {}\n", rule));
            }
            svg.push_str("  </style>\n");
        }
        svg.push_str(&format!("  <rect width=\"{}\" height=\"{}\" fill=\"white\"/>\n", self.width, self.height));
        for element in &self.elements {
            svg.push_str(&format!("  {}\n", element));
        }
        svg.push_str("</svg>\n");
        svg
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn draw_circle(&mut self, x: f64, y: f64, r: f64, style: &Style) -> ElementId {
        let id = ElementId(self.circles);
        self.circles += 1;
        self.elements.push(format!(
            r#"<circle id="{}" cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}"/>"#,
            id, x, y, r, escape(&style.fill), style.opacity, escape(&style.stroke), style.stroke_width,
        ));
        id
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle) {
        self.elements.push(format!(
            r#"<text x="{}" y="{}" font-size="{}" text-anchor="{}" fill="{}">{}</text>"#,
            x, y, style.font_size, escape(&style.anchor), escape(&style.fill), escape(text),
        ));
    }

    fn on_hover(&mut self, element: ElementId, enter: Style, exit: Style) {
        self.rules.push(format!("#{} {{ fill: {}; transition: fill 0.2s; }}", element, exit.fill));
        self.rules.push(format!("#{}:hover {{ fill: {}; }}", element, enter.fill));
    }
}
