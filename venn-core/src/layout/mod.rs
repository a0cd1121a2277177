pub mod placement;
pub mod viewport;

use log::debug;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    error::LayoutError,
    loss::OverlapLoss,
    r2::R2,
    simplex::{Minimum, Simplex, SimplexConfig},
    table::ContingencyTable,
};

#[derive(Clone, Debug, PartialEq, Tsify, Serialize, Deserialize)]
pub struct CirclePosition {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub set: usize,
}

impl CirclePosition {
    pub fn center(&self) -> R2<f64> {
        R2 { x: self.x, y: self.y }
    }
}

/// Count label: at a set's center (one set) or at the midpoint of two centers (a pair).
#[derive(Clone, Debug, PartialEq, Tsify, Serialize, Deserialize)]
pub struct LabelPosition {
    pub x: f64,
    pub y: f64,
    pub value: usize,
    pub sets: Vec<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Tsify, Serialize, Deserialize)]
pub struct VennLayout {
    pub circles: Vec<CirclePosition>,
    pub labels: Vec<LabelPosition>,
    /// Overlap loss at the returned placement
    pub loss: f64,
    pub iterations: usize,
    /// False if the optimizer hit its iteration cap; the placement is then best-effort.
    pub converged: bool,
}

/// Place one circle per set so that pairwise lens areas approximate the table's overlaps.
pub fn layout(table: &ContingencyTable) -> Result<VennLayout, LayoutError> {
    layout_with_config(table, &SimplexConfig::default())
}

pub fn layout_with_config(table: &ContingencyTable, config: &SimplexConfig) -> Result<VennLayout, LayoutError> {
    let objective = OverlapLoss::from_table(table);
    for &r in objective.radii() {
        LayoutError::check_finite("radius", r)?;
    }
    let centers = placement::initial_centers(table, objective.radii());
    let seed = placement::flatten(&centers);
    let seed_loss = objective.loss(&seed);
    debug!("layout of {} sets, seed loss {:e}", table.len(), seed_loss);

    let Minimum { point, value, iterations, converged } = if table.len() < 2 {
        Minimum { point: seed, value: seed_loss, iterations: 0, converged: true }
    } else {
        Simplex::with_config(&seed, |p: &[f64]| objective.loss(p), config.clone()).minimize()
    };
    for &v in &point {
        LayoutError::check_finite("center coordinate", v)?;
    }
    let loss = LayoutError::check_finite("loss", value)?;

    let centers = placement::unflatten(&point);
    let circles = centers
        .iter()
        .zip(objective.radii())
        .enumerate()
        .map(|(set, (c, &r))| CirclePosition { x: c.x, y: c.y, r, set })
        .collect();
    let mut labels = Vec::with_capacity(table.len() * (table.len() + 1) / 2);
    for (i, ci) in centers.iter().enumerate() {
        labels.push(LabelPosition { x: ci.x, y: ci.y, value: table.count(i), sets: vec![i] });
        for (j, cj) in centers.iter().enumerate().skip(i + 1) {
            let mid = ci.midpoint(cj);
            labels.push(LabelPosition { x: mid.x, y: mid.y, value: table.get(i, j), sets: vec![i, j] });
        }
    }
    debug!("layout loss {:e} after {} iterations (converged: {})", loss, iterations, converged);
    Ok(VennLayout { circles, labels, loss, iterations, converged })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn table(rows: Vec<Vec<usize>>) -> ContingencyTable {
        ContingencyTable::from_rows(rows).unwrap()
    }

    fn distance(layout: &VennLayout, i: usize, j: usize) -> f64 {
        layout.circles[i].center().distance(&layout.circles[j].center())
    }

    fn seed_loss(t: &ContingencyTable) -> f64 {
        let objective = OverlapLoss::from_table(t);
        let seed = placement::flatten(&placement::initial_centers(t, objective.radii()));
        objective.loss(&seed)
    }

    #[test]
    fn one_overlapping_pair() {
        let t = table(vec![vec![10, 3, 0], vec![10, 0], vec![10]]);
        let layout = layout(&t).unwrap();
        assert!(layout.converged);
        assert!(layout.iterations <= 2000);
        let circles = &layout.circles;
        let r = circles[0].r;
        assert_relative_eq!(r, (10. / (2. * std::f64::consts::PI)).sqrt());
        assert!(distance(&layout, 0, 1) < circles[0].r + circles[1].r);
        assert!(distance(&layout, 0, 2) >= (circles[0].r + circles[2].r) * (1. - 1e-3));
        assert!(distance(&layout, 1, 2) >= (circles[1].r + circles[2].r) * (1. - 1e-3));
        let lens = crate::circle::Circle::new(circles[0].x, circles[0].y, r)
            .intersection_area(&crate::circle::Circle::new(circles[1].x, circles[1].y, circles[1].r));
        assert_relative_eq!(lens, 3., max_relative = 1e-3);
        assert!(layout.loss <= seed_loss(&t));
    }

    #[test]
    fn disjoint_sets() {
        let t = table(vec![vec![10, 0, 0], vec![10, 0], vec![10]]);
        let layout = layout(&t).unwrap();
        assert!(layout.loss <= seed_loss(&t));
        for (i, j) in t.pairs() {
            let min = layout.circles[i].r + layout.circles[j].r;
            assert!(distance(&layout, i, j) >= min - 1e-2, "circles {} and {} overlap", i, j);
        }
    }

    #[test]
    fn three_way_overlaps() {
        let t = table(vec![vec![9, 3, 2], vec![7, 1], vec![5]]);
        let layout = layout(&t).unwrap();
        assert!(layout.converged);
        assert!(layout.loss < 1e-6);
        for circle in &layout.circles {
            assert!(circle.x.is_finite() && circle.y.is_finite());
        }
    }

    #[test]
    fn labels() {
        let t = table(vec![vec![10, 3, 0], vec![10, 0], vec![10]]);
        let layout = layout(&t).unwrap();
        let values: Vec<(Vec<usize>, usize)> = layout.labels.iter().map(|l| (l.sets.clone(), l.value)).collect();
        assert_eq!(
            values,
            vec![
                (vec![0], 10), (vec![0, 1], 3), (vec![0, 2], 0),
                (vec![1], 10), (vec![1, 2], 0),
                (vec![2], 10),
            ]
        );
        let c = &layout.circles;
        let mid = &layout.labels[1];
        assert_relative_eq!(mid.x, (c[0].x + c[1].x) / 2.);
        assert_relative_eq!(mid.y, (c[0].y + c[1].y) / 2.);
        assert_eq!((layout.labels[3].x, layout.labels[3].y), (c[1].x, c[1].y));
    }

    #[test]
    fn single_set() {
        let layout = layout(&table(vec![vec![4]])).unwrap();
        assert_eq!(layout.iterations, 0);
        assert!(layout.converged);
        assert_eq!(layout.circles.len(), 1);
        assert_eq!(layout.circles[0].center(), R2::origin());
        assert_eq!(layout.labels, vec![LabelPosition { x: 0., y: 0., value: 4, sets: vec![0] }]);
    }

    #[test]
    fn empty_table() {
        let layout = layout(&table(vec![])).unwrap();
        assert!(layout.circles.is_empty());
        assert!(layout.labels.is_empty());
    }

    #[test]
    fn iteration_cap_is_not_an_error() {
        let t = table(vec![vec![9, 3, 2], vec![7, 1], vec![5]]);
        let config = SimplexConfig { max_iterations: 3, ..SimplexConfig::default() };
        let layout = layout_with_config(&t, &config).unwrap();
        assert_eq!(layout.iterations, 3);
        assert!(!layout.converged);
        assert_eq!(layout.circles.len(), 3);
    }

    #[test]
    fn empty_set_among_others() {
        let t = table(vec![vec![6, 2, 0], vec![4, 0], vec![0]]);
        let layout = layout(&t).unwrap();
        assert_eq!(layout.circles[2].r, 0.);
        assert!(layout.loss.is_finite());
    }
}
