//! Range queries built on top of the bounded search.

use pn_core::{Real, VertexId};
use rayon::prelude::*;
use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;

/// Settings for the iterative radius refinement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefineConfig {
    /// Upper bound on the number of successful path searches.
    pub max_iterations: usize,
    /// How far below the current bound the next search radius is set.
    pub step: Real,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            step: 0.01,
        }
    }
}

impl RefineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_step(mut self, step: Real) -> Self {
        self.step = step;
        self
    }

    pub fn validate(&self) -> GraphResult<()> {
        if self.max_iterations == 0 {
            return Err(GraphError::InvalidConfig {
                what: "max_iterations must be at least 1",
            });
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(GraphError::InvalidConfig {
                what: "step must be finite and positive",
            });
        }
        Ok(())
    }
}

/// Outcome of `Graph::minimum_sufficient_radius_detailed`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusEstimate {
    /// The bound, never below the straight-line start/end distance.
    pub radius: Real,
    /// The path the refinement settled on.
    pub path: Vec<VertexId>,
    /// Number of successful path searches performed.
    pub iterations: usize,
}

impl Graph {
    /// Emergency range: the distance from `v` to the farthest vertex in the
    /// graph, connected or not. Zero when `v` is alone.
    pub fn max_eccentricity(&self, v: VertexId) -> GraphResult<Real> {
        let origin = self.position(v)?;
        let farthest = self
            .vertices
            .par_iter()
            .filter_map(Option::as_ref)
            .map(|w| origin.distance(&w.position))
            .reduce(|| 0.0, Real::max);
        Ok(farthest)
    }

    /// Smallest radio range found for travelling from `start` to `end`, using
    /// the default refinement settings.
    pub fn minimum_sufficient_radius(&self, start: VertexId, end: VertexId) -> GraphResult<Real> {
        self.minimum_sufficient_radius_with(start, end, &RefineConfig::default())
    }

    pub fn minimum_sufficient_radius_with(
        &self,
        start: VertexId,
        end: VertexId,
        config: &RefineConfig,
    ) -> GraphResult<Real> {
        self.minimum_sufficient_radius_detailed(start, end, config)
            .map(|estimate| estimate.radius)
    }

    /// Iteratively tighten the radius needed to get from `start` to `end`.
    ///
    /// The cost of a path is the largest distance from `start` to any vertex
    /// on it. Each round searches again just below the current cost and keeps
    /// the new path if one exists. This is a heuristic: BFS picks the first
    /// path it discovers at each radius, so the result can be a local optimum.
    ///
    /// Fails with `NoPath` if `start` and `end` are not connected at all.
    #[tracing::instrument(level = "debug", skip(self, config))]
    pub fn minimum_sufficient_radius_detailed(
        &self,
        start: VertexId,
        end: VertexId,
        config: &RefineConfig,
    ) -> GraphResult<RadiusEstimate> {
        config.validate()?;
        let floor = self.distance(start, end)?;

        let mut radius = Real::INFINITY;
        let mut best: Option<(Real, Vec<VertexId>)> = None;
        let mut iterations = 0;

        while iterations < config.max_iterations {
            let Some(path) = self.find_path(start, end, radius)? else {
                break;
            };
            iterations += 1;
            let cost = self.path_cost(start, &path, floor)?;
            debug!(iteration = iterations, cost, hops = path.len() - 1, "refined path");
            radius = cost - config.step;
            best = Some((cost, path));
        }

        let (radius, path) = best.ok_or(GraphError::NoPath { start, end })?;
        Ok(RadiusEstimate {
            radius,
            path,
            iterations,
        })
    }

    /// Largest distance from `start` to a vertex of `path`, at least `floor`.
    fn path_cost(&self, start: VertexId, path: &[VertexId], floor: Real) -> GraphResult<Real> {
        let mut worst = floor;
        for &v in path {
            worst = worst.max(self.distance(start, v)?);
        }
        Ok(worst)
    }
}
