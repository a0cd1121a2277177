//! Seed configuration for the overlap optimizer.

use std::f64::consts::PI;

use crate::{r2::R2, table::ContingencyTable};

/// Radius per set: `sqrt(count / 2π)`.
pub fn radii(table: &ContingencyTable) -> Vec<f64> {
    (0..table.len())
        .map(|i| (table.count(i) as f64 / (2. * PI)).sqrt())
        .collect()
}

/// Set with the largest total pairwise overlap; the first one wins ties.
pub fn center_index(table: &ContingencyTable) -> Option<usize> {
    (0..table.len()).fold(None, |best: Option<(usize, usize)>, i| {
        let sum = table.overlap_sum(i);
        match best {
            Some((_, best_sum)) if best_sum >= sum => best,
            _ => Some((i, sum)),
        }
    }).map(|(i, _)| i)
}

/// The most-overlapping set sits at the origin; the others fan out from it at angles
/// `k·π / (1.5·(n − 1))`, at distance `r_center + r_k / 2`.
pub fn initial_centers(table: &ContingencyTable, radii: &[f64]) -> Vec<R2<f64>> {
    let n = table.len();
    let Some(center) = center_index(table) else {
        return vec![];
    };
    let interval = if n > 1 { PI / (1.5 * (n - 1) as f64) } else { 0. };
    let mut theta = 0.;
    (0..n)
        .map(|i| {
            if i == center {
                R2::origin()
            } else {
                let p = R2::polar(radii[center] + radii[i] / 2., theta);
                theta += interval;
                p
            }
        })
        .collect()
}

/// Flatten centers into `(x0, y0, x1, y1, …)`.
pub fn flatten(centers: &[R2<f64>]) -> Vec<f64> {
    centers.iter().flat_map(|c| [c.x, c.y]).collect()
}

pub fn unflatten(params: &[f64]) -> Vec<R2<f64>> {
    params.chunks_exact(2).map(|xy| R2 { x: xy[0], y: xy[1] }).collect()
}
