//! JSON chart descriptions: the data rows plus which diagram to build from them.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use log::info;
use serde::Deserialize;
use serde_json::{Map, Value};

use venn_core::{
    events, DiagramId, FilterMode, Frame, MultipleVenn, MultipleVennOptions, Selection, Venn, VennLayout, VennOptions,
};

use crate::render::SvgSurface;

#[derive(Debug, Clone, Deserialize)]
pub struct Description {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    pub data: Vec<Map<String, Value>>,
    pub diagram: DiagramSpec,
}

fn default_width() -> f64 {
    500.
}

fn default_height() -> f64 {
    500.
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagramSpec {
    Venn {
        #[serde(flatten)]
        options: VennOptions,
        /// Categories per set; defaults to the first distinct categories, one per set
        #[serde(default)]
        selection: Option<Vec<Vec<String>>>,
        #[serde(default)]
        filter_mode: FilterMode,
    },
    MultipleVenn {
        #[serde(flatten)]
        options: MultipleVennOptions,
    },
}

/// A laid-out diagram and its SVG rendering.
#[derive(Debug, Clone)]
pub struct Output {
    pub layout: VennLayout,
    pub svg: String,
}

/// Load a description (supports .json and .json.gz).
pub fn load(path: &Path) -> Result<Description> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);
    let description = if path.extension().is_some_and(|e| e == "gz") {
        serde_json::from_reader(GzDecoder::new(reader))
    } else {
        serde_json::from_reader(reader)
    };
    description.with_context(|| format!("parsing {}", path.display()))
}

/// Output file stem: `a/b.json.gz` → `b`.
pub fn stem(path: &Path) -> String {
    let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    name.strip_suffix(".json").unwrap_or(name).to_string()
}

impl Description {
    pub fn render(&self) -> Result<Output> {
        let mut frame = Frame::from_rows(&self.data);
        let mut surface = SvgSurface::new(self.width, self.height);
        let layout = match &self.diagram {
            DiagramSpec::Venn { options, selection, filter_mode } => {
                let (notifier, _scheduler) = events::channel();
                let mut venn = Venn::new(DiagramId(0), options.clone(), &mut frame, notifier)?;
                if selection.is_some() || *filter_mode != FilterMode::All {
                    let selection = match selection {
                        Some(sets) => Selection::new(sets.clone()),
                        None => venn.selection().clone(),
                    };
                    venn.configure(selection, *filter_mode, &mut frame)?;
                }
                venn.draw(&mut surface);
                venn.layout().clone()
            }
            DiagramSpec::MultipleVenn { options } => {
                let venn = MultipleVenn::new(DiagramId(0), options.clone(), &frame)?;
                venn.draw(&mut surface);
                venn.layout().clone()
            }
        };
        info!(
            "{} circles, loss {:e} after {} iterations (converged: {})",
            layout.circles.len(), layout.loss, layout.iterations, layout.converged,
        );
        Ok(Output { layout, svg: surface.finish() })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::{write::GzEncoder, Compression};
    use serde_json::json;

    use super::*;

    fn pets() -> Value {
        let rows = [
            ("ann", "cat"), ("ann", "dog"), ("bob", "cat"), ("cy", "dog"),
            ("cy", "fish"), ("dee", "fish"), ("eve", "cat"), ("eve", "fish"),
        ];
        Value::Array(rows.iter().map(|(owner, pet)| json!({"owner": owner, "pet": pet})).collect())
    }

    fn venn(extra: Value) -> Description {
        let mut diagram = json!({"type": "venn", "category": "pet", "count": "owner"});
        if let (Some(diagram), Value::Object(extra)) = (diagram.as_object_mut(), extra) {
            diagram.extend(extra);
        }
        serde_json::from_value(json!({"width": 300, "height": 200, "data": pets(), "diagram": diagram})).unwrap()
    }

    #[test]
    fn parse() {
        let description = venn(json!({"hover": true, "filter_mode": "overlapping", "area_names": ["A", "B"]}));
        assert_eq!((description.width, description.height), (300., 200.));
        assert_eq!(description.data.len(), 8);
        match description.diagram {
            DiagramSpec::Venn { options, selection, filter_mode } => {
                assert!(options.appearance.hover);
                assert_eq!(options.category, "pet");
                assert_eq!(options.area_names, vec!["A", "B"]);
                assert_eq!(selection, None);
                assert_eq!(filter_mode, FilterMode::Overlapping);
            }
            d => panic!("expected a venn diagram, got {:?}", d),
        }
    }

    #[test]
    fn render_venn() {
        let output = venn(json!({"hover": true})).render().unwrap();
        assert_eq!(output.layout.circles.len(), 3);
        let values: Vec<usize> = output.layout.labels.iter().map(|l| l.value).collect();
        // cat {ann, bob, eve}, dog {ann, cy}, fish {cy, dee, eve}
        assert_eq!(values, vec![3, 1, 1, 2, 1, 3]);
        assert_eq!(output.svg.matches("<circle").count(), 3);
        assert!(output.svg.contains(":hover"));
    }

    #[test]
    fn explicit_selection() {
        let output = venn(json!({"selection": [["cat", "dog"], ["fish"], []]})).render().unwrap();
        let values: Vec<usize> = output.layout.labels.iter().map(|l| l.value).collect();
        assert_eq!(values, vec![4, 2, 0, 3, 0, 0]);

        let err = venn(json!({"selection": [["cat"]]})).render().unwrap_err();
        assert!(err.to_string().contains("out of range"), "{}", err);
    }

    #[test]
    fn render_multiple_venn() {
        let description: Description = serde_json::from_value(json!({
            "data": pets(),
            "diagram": {"type": "multiple_venn", "category": "pet", "count": "owner", "color": ["#ff0000"]},
        }))
        .unwrap();
        assert_eq!(description.width, 500.);
        let output = description.render().unwrap();
        assert_eq!(output.layout.circles.len(), 3);
        assert_eq!(output.svg.matches("fill=\"#ff0000\"").count(), 3);
    }

    #[test]
    fn load_gzipped() {
        let dir = tempfile::tempdir().unwrap();
        let body = json!({"data": pets(), "diagram": {"type": "multiple_venn", "category": "pet", "count": "owner"}});

        let plain = dir.path().join("pets.json");
        std::fs::write(&plain, body.to_string()).unwrap();
        let gz = dir.path().join("pets.json.gz");
        let mut encoder = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        encoder.write_all(body.to_string().as_bytes()).unwrap();
        encoder.finish().unwrap();

        for path in [&plain, &gz] {
            let description = load(path).unwrap();
            assert_eq!(description.data.len(), 8);
            assert_eq!(stem(path), "pets");
        }
        assert!(load(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn stems() {
        assert_eq!(stem(Path::new("a/b.json.gz")), "b");
        assert_eq!(stem(Path::new("b.json")), "b");
        assert_eq!(stem(Path::new("chart")), "chart");
    }
}
