//! Fitting a layout into a pane's pixel range.

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use super::VennLayout;

#[derive(Clone, Copy, Debug, PartialEq, Tsify, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn apply(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (v - d0) * (r1 - r0) / (d1 - d0)
    }
}

/// Pixel extent of a pane; either bound may be the larger one (e.g. a flipped y axis).
#[derive(Clone, Copy, Debug, PartialEq, Tsify, Serialize, Deserialize)]
pub struct PaneRange {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl PaneRange {
    /// `width × height` pane with `+y` pointing up.
    pub fn flipped(width: f64, height: f64) -> Self {
        PaneRange { x: (0., width), y: (height, 0.) }
    }
    fn width(&self) -> f64 {
        (self.x.1 - self.x.0).abs()
    }
    fn height(&self) -> f64 {
        (self.y.1 - self.y.0).abs()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Tsify, Serialize, Deserialize)]
pub struct Viewport {
    pub x: LinearScale,
    pub y: LinearScale,
    /// Layout units per pixel
    pub scale: f64,
}

impl Viewport {
    /// Scale uniformly so the circles' bounding box fills the tighter axis, padding the other
    /// axis symmetrically so circles stay round.
    pub fn fit(layout: &VennLayout, range: &PaneRange) -> Self {
        let (mut x0, mut x1, mut y0, mut y1) = layout.circles.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            |(x0, x1, y0, y1), c| (x0.min(c.x - c.r), x1.max(c.x + c.r), y0.min(c.y - c.r), y1.max(c.y + c.r)),
        );
        if layout.circles.is_empty() {
            (x0, x1, y0, y1) = (0., 0., 0., 0.);
        }
        if x1 - x0 <= 0. {
            x0 -= 0.5;
            x1 += 0.5;
        }
        if y1 - y0 <= 0. {
            y0 -= 0.5;
            y1 += 0.5;
        }
        let (d_w, d_h) = (x1 - x0, y1 - y0);
        let (r_w, r_h) = (range.width(), range.height());
        let scale = if r_w / r_h > d_w / d_h {
            let scale = d_h / r_h;
            let pad = (scale * r_w - d_w) / 2.;
            x0 -= pad;
            x1 += pad;
            scale
        } else {
            let scale = d_w / r_w;
            let pad = (scale * r_h - d_h) / 2.;
            y0 -= pad;
            y1 += pad;
            scale
        };
        Viewport {
            x: LinearScale { domain: (x0, x1), range: range.x },
            y: LinearScale { domain: (y0, y1), range: range.y },
            scale,
        }
    }

    pub fn x(&self, v: f64) -> f64 {
        self.x.apply(v)
    }

    pub fn y(&self, v: f64) -> f64 {
        self.y.apply(v)
    }

    pub fn r(&self, v: f64) -> f64 {
        v / self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CirclePosition;

    fn layout(circles: &[(f64, f64, f64)]) -> VennLayout {
        VennLayout {
            circles: circles
                .iter()
                .enumerate()
                .map(|(set, &(x, y, r))| CirclePosition { x, y, r, set })
                .collect(),
            ..VennLayout::default()
        }
    }

    #[test]
    fn wide_layout_in_square_pane() {
        // Bounding box [-1, 3] × [-1, 1]
        let viewport = Viewport::fit(&layout(&[(0., 0., 1.), (2., 0., 1.)]), &PaneRange { x: (0., 400.), y: (0., 400.) });
        assert_relative_eq!(viewport.scale, 0.01);
        assert_relative_eq!(viewport.x(-1.), 0.);
        assert_relative_eq!(viewport.x(3.), 400.);
        assert_relative_eq!(viewport.y(0.), 200.);
        assert_relative_eq!(viewport.y(-2.), 0.);
        assert_relative_eq!(viewport.r(1.), 100.);
    }

    #[test]
    fn tall_layout_in_wide_pane() {
        // Bounding box [-1, 1] × [-1, 1], pane 600 × 300 with y flipped
        let viewport = Viewport::fit(&layout(&[(0., 0., 1.)]), &PaneRange::flipped(600., 300.));
        assert_relative_eq!(viewport.scale, 2. / 300.);
        assert_relative_eq!(viewport.x(0.), 300.);
        assert_relative_eq!(viewport.y(1.), 0.);
        assert_relative_eq!(viewport.y(-1.), 300.);
        assert_relative_eq!(viewport.r(1.), 150.);
    }

    #[test]
    fn degenerate_layouts() {
        let range = PaneRange::flipped(100., 100.);
        for viewport in [Viewport::fit(&layout(&[]), &range), Viewport::fit(&layout(&[(2., 3., 0.)]), &range)] {
            assert!(viewport.scale.is_finite() && viewport.scale > 0.);
            assert!(viewport.x(0.).is_finite());
        }
    }
}
