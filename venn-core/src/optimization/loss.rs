use std::collections::BTreeMap;

use itertools::Itertools;

use crate::{circle::Circle, table::ContingencyTable, placement};

/// Squared error between target pairwise overlaps and the lens areas of a candidate placement.
///
/// Parameters are flattened circle centers `(x0, y0, x1, y1, …)`; radii stay fixed.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlapLoss {
    radii: Vec<f64>,
    targets: BTreeMap<(usize, usize), f64>,
}

impl OverlapLoss {
    pub fn new(radii: Vec<f64>, targets: BTreeMap<(usize, usize), f64>) -> Self {
        OverlapLoss { radii, targets }
    }

    pub fn from_table(table: &ContingencyTable) -> Self {
        let targets = table
            .pairs()
            .map(|(i, j)| ((i, j), table.get(i, j) as f64))
            .collect();
        OverlapLoss::new(placement::radii(table), targets)
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Target overlap for `i < j`; pairs without an entry are meant to be disjoint.
    pub fn target(&self, i: usize, j: usize) -> f64 {
        self.targets.get(&(i, j)).copied().unwrap_or(0.)
    }

    pub fn circles(&self, params: &[f64]) -> Vec<Circle> {
        params
            .chunks_exact(2)
            .zip(self.radii.iter())
            .map(|(xy, &r)| Circle::new(xy[0], xy[1], r))
            .collect()
    }

    pub fn loss(&self, params: &[f64]) -> f64 {
        let circles = self.circles(params);
        (0..circles.len())
            .tuple_combinations()
            .map(|(i, j)| {
                let actual = circles[i].intersection_area(&circles[j]);
                (self.target(i, j) - actual).powi(2)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    fn three(targets: [f64; 3]) -> OverlapLoss {
        let [ab, ac, bc] = targets;
        OverlapLoss::new(
            vec![1., 1., 1.],
            BTreeMap::from([((0, 1), ab), ((0, 2), ac), ((1, 2), bc)]),
        )
    }

    #[test]
    fn exact_placement_has_zero_loss() {
        let lens = 2. * PI / 3. - 3f64.sqrt() / 2.;
        let loss = three([lens, 0., 0.]);
        let params = [0., 0., 1., 0., 10., 10.];
        assert_abs_diff_eq!(loss.loss(&params), 0., epsilon = 1e-20);
    }

    #[test]
    fn disjoint_targets() {
        let loss = three([0., 0., 0.]);
        assert_eq!(loss.loss(&[0., 0., 5., 0., 0., 5.]), 0.);
        // Concentric pair contributes (π·1²)²
        assert_relative_eq!(loss.loss(&[0., 0., 0., 0., 0., 5.]), PI * PI, epsilon = 1e-12);
    }

    #[test]
    fn missing_targets_are_zero() {
        let loss = OverlapLoss::new(vec![1., 2.], BTreeMap::new());
        assert_eq!(loss.target(0, 1), 0.);
        assert_eq!(loss.loss(&[0., 0., 4., 0.]), 0.);
    }

    #[test]
    fn non_negative() {
        let mut rng = StdRng::seed_from_u64(7);
        let loss = OverlapLoss::new(
            vec![1.3, 0.2, 2.1, 0.],
            BTreeMap::from([((0, 1), 0.1), ((0, 2), 2.), ((1, 2), 0.), ((2, 3), 1.)]),
        );
        for _ in 0..1000 {
            let params: Vec<f64> = (0..8).map(|_| rng.gen_range(-5. ..5.)).collect();
            let value = loss.loss(&params);
            assert!(value.is_finite() && value >= 0., "loss {} at {:?}", value, params);
        }
    }
}
