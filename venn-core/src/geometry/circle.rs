use std::{f64::consts::PI, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::r2::R2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub c: R2<f64>,
    pub r: f64,
}

impl Circle {
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Circle { c: R2 { x, y }, r }
    }
    pub fn area(&self) -> f64 {
        PI * self.r * self.r
    }
    /// Area of the lens shared by two circles.
    ///
    /// Each circle contributes the circular segment cut off by the common chord:
    /// `a²θ − ½a²·sin 2θ`, where `θ` is the half-angle the chord subtends at that circle's
    /// center (law of cosines). The acos argument is clamped to `[-1, 1]`, so containment
    /// (`d ≤ |r1 − r2|`) degrades to the smaller circle's full area instead of NaN.
    pub fn intersection_area(&self, o: &Circle) -> f64 {
        let (r1, r2) = (self.r, o.r);
        if r1 <= 0. || r2 <= 0. {
            return 0.;
        }
        let d = self.c.distance(&o.c);
        if d >= r1 + r2 {
            return 0.;
        }
        if d == 0. {
            let r = r1.min(r2);
            return PI * r * r;
        }
        [(r1, r2), (r2, r1)]
            .into_iter()
            .map(|(b, a)| {
                let cos = ((a * a - b * b + d * d) / (2. * a * d)).clamp(-1., 1.);
                let theta = cos.acos();
                a * a * theta - 0.5 * a * a * (2. * theta).sin()
            })
            .sum()
    }
}

impl Display for Circle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "C({:.3}, {:.3}, {:.3})", self.c.x, self.c.y, self.r)
    }
}
