//! Derivative-free downhill simplex (Nelder–Mead style) minimization.
//!
//! The working state is `n + 1` vertices in `n`-dimensional parameter space. Each step reflects
//! the worst vertex through the centroid of the others, then expands, contracts, or shrinks the
//! whole simplex toward the best vertex. The iteration budget belongs to each [`Simplex`] value,
//! so concurrent or back-to-back runs never share a counter.

use log::{debug, trace, warn};
use nalgebra::DVector;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

/// Configuration for simplex minimization.
#[derive(Clone, Debug, PartialEq, Tsify, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplexConfig {
    /// Offset along each axis for the initial simplex vertices (default: 1.0)
    pub step: f64,
    /// Contraction factor toward the reflected point (default: 0.7)
    pub contraction: f64,
    /// Expansion factor past the reflected point (default: 1.5)
    pub expansion: f64,
    /// Stop once the summed squared loss spread across vertices drops below this (default: 1e-20)
    pub tolerance: f64,
    /// Maximum simplex steps per run (default: 2000)
    pub max_iterations: usize,
}

impl Default for SimplexConfig {
    fn default() -> Self {
        SimplexConfig {
            step: 1.0,
            contraction: 0.7,
            expansion: 1.5,
            tolerance: 1e-20,
            max_iterations: 2000,
        }
    }
}

/// Result of a minimization run.
#[derive(Clone, Debug, PartialEq, Tsify, Serialize, Deserialize)]
pub struct Minimum {
    pub point: Vec<f64>,
    pub value: f64,
    pub iterations: usize,
    /// False if the run stopped at `max_iterations`; `point` is then best-effort.
    pub converged: bool,
}

pub struct Simplex<F> {
    config: SimplexConfig,
    objective: F,
    vertices: Vec<DVector<f64>>,
    iterations: usize,
}

impl<F: Fn(&[f64]) -> f64> Simplex<F> {
    pub fn new(initial: &[f64], objective: F) -> Self {
        Self::with_config(initial, objective, SimplexConfig::default())
    }

    pub fn with_config(initial: &[f64], objective: F, config: SimplexConfig) -> Self {
        let origin = DVector::from_column_slice(initial);
        let mut vertices = Vec::with_capacity(initial.len() + 1);
        vertices.push(origin.clone());
        for idx in 0..initial.len() {
            let mut vertex = origin.clone();
            vertex[idx] += config.step;
            vertices.push(vertex);
        }
        Simplex { config, objective, vertices, iterations: 0 }
    }

    pub fn vertices(&self) -> &[DVector<f64>] {
        &self.vertices
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    fn eval(&self, v: &DVector<f64>) -> f64 {
        (self.objective)(v.as_slice())
    }

    /// Perform one simplex step; returns true once the vertices' losses have collapsed.
    pub fn step(&mut self) -> bool {
        if self.vertices.len() < 2 {
            return true;
        }
        self.iterations += 1;
        let objective = &self.objective;
        self.vertices.sort_by_cached_key(|v| OrderedFloat(objective(v.as_slice())));

        let n = self.vertices.len();
        let dim = n - 1;
        let best = self.vertices[0].clone();
        let worst = self.vertices[n - 1].clone();
        let f_best = self.eval(&best);
        let f_worst = self.eval(&worst);
        let f_second = self.eval(&self.vertices[n - 2]);

        let centroid = self.vertices[..n - 1]
            .iter()
            .fold(DVector::<f64>::zeros(dim), |acc, v| acc + v)
            / (n - 1) as f64;
        let reflected = &centroid * 2. - &worst;
        let f_reflected = self.eval(&reflected);

        let l1 = self.config.contraction;
        let l2 = self.config.expansion;
        let replacement = if f_reflected >= f_worst {
            &worst * (1. - l1) + &reflected * l1
        } else if f_reflected < (f_best + (l2 - 1.) * f_worst) / l2 {
            let expanded = &reflected * l2 - &worst * (l2 - 1.);
            if self.eval(&expanded) <= f_reflected { expanded } else { reflected }
        } else {
            reflected
        };
        let f_replacement = self.eval(&replacement);
        self.vertices[n - 1] = replacement;

        if f_replacement >= f_second {
            for vertex in self.vertices.iter_mut() {
                *vertex = (&*vertex + &best) * 0.5;
            }
        }

        let spread: f64 = self
            .vertices
            .iter()
            .map(|v| (self.eval(v) - f_best).powi(2))
            .sum();
        trace!("simplex step {}: best {:e}, replaced {:e}, spread {:e}", self.iterations, f_best, f_replacement, spread);
        spread < self.config.tolerance
    }

    /// Step until converged or out of iterations.
    ///
    /// Returns the most recently replaced vertex (the last one in sorted order), matching the
    /// point the convergence check was evaluated against.
    pub fn minimize(mut self) -> Minimum {
        if self.vertices.len() < 2 {
            let value = self.eval(&self.vertices[0]);
            return Minimum { point: self.vertices[0].as_slice().to_vec(), value, iterations: 0, converged: true };
        }
        let converged = loop {
            if self.step() {
                break true;
            }
            if self.iterations >= self.config.max_iterations {
                break false;
            }
        };
        let point = self.vertices[self.vertices.len() - 1].as_slice().to_vec();
        let value = (self.objective)(&point);
        if converged {
            debug!("simplex converged after {} iterations, loss {:e}", self.iterations, value);
        } else {
            warn!("simplex stopped at iteration cap {}, loss {:e}", self.iterations, value);
        }
        Minimum { point, value, iterations: self.iterations, converged }
    }
}

/// Minimize `objective` from `initial` with the default configuration.
pub fn minimize<F: Fn(&[f64]) -> f64>(initial: &[f64], objective: F) -> Vec<f64> {
    Simplex::new(initial, objective).minimize().point
}
