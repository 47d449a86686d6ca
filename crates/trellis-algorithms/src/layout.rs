//! Force-directed layout
//!
//! Fruchterman–Reingold spring layout. Edges pull their endpoints together,
//! every pair of nodes pushes apart, and a temperature caps how far a node may
//! move per iteration.

use crate::common::{GraphAccess, GraphView, NodeIndex};
use crate::error::{checked_weight, AlgorithmError, AlgorithmResult};
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Closest two nodes are allowed to get when computing forces
const MIN_DISTANCE: f64 = 0.01;

/// Spring layout configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpringLayoutConfig {
    /// Optimal distance between nodes, `1 / sqrt(n)` when unset
    pub k: Option<f64>,
    /// Exponent `p` of the repulsive force `k^2 / d^(p - 1)`
    pub repulsive_exponent: f64,
    /// Grow or shrink the step size with progress instead of cooling linearly
    pub adaptive_cooling: bool,
    /// Maximum number of iterations
    pub num_iter: usize,
    /// Stop once the mean node displacement drops below this
    pub tol: f64,
    /// Rescale so the largest coordinate magnitude equals this
    pub scale: Option<f64>,
    /// Translate the final layout to this center
    pub center: Option<[f64; 2]>,
    /// Seed for the random initial positions
    pub seed: Option<u64>,
    /// Starting positions, random for nodes not listed
    #[cfg_attr(feature = "serde", serde(skip))]
    pub initial_positions: HashMap<NodeIndex, [f64; 2]>,
    /// Nodes that keep their initial position
    #[cfg_attr(feature = "serde", serde(skip))]
    pub fixed: HashSet<NodeIndex>,
}

impl Default for SpringLayoutConfig {
    fn default() -> Self {
        Self {
            k: None,
            repulsive_exponent: 2.0,
            adaptive_cooling: true,
            num_iter: 50,
            tol: 1e-6,
            scale: Some(1.0),
            center: None,
            seed: None,
            initial_positions: HashMap::new(),
            fixed: HashSet::new(),
        }
    }
}

/// Spring layout with every edge pulling equally
pub fn spring_layout<G: GraphAccess>(
    graph: &G,
    config: &SpringLayoutConfig,
) -> AlgorithmResult<IndexMap<NodeIndex, [f64; 2]>> {
    spring_layout_with(graph, config, |_| Ok(1.0))
}

/// Spring layout where `weight_fn` scales the attraction along each edge.
///
/// Edge direction is ignored. With fixed nodes the layout is neither rescaled
/// nor recentered, so they stay exactly where they were placed.
pub fn spring_layout_with<G, F, E>(
    graph: &G,
    config: &SpringLayoutConfig,
    mut weight_fn: F,
) -> Result<IndexMap<NodeIndex, [f64; 2]>, E>
where
    G: GraphAccess,
    F: FnMut(&G::EdgeWeight) -> Result<f64, E>,
    E: From<AlgorithmError>,
{
    validate(graph, config)?;

    // An infinite pull turns every force into NaN
    let view = GraphView::from_graph_weighted(graph, true, |w| -> Result<f64, E> {
        let weight = checked_weight(weight_fn(w)?)?;
        if weight.is_infinite() {
            return Err(AlgorithmError::InvalidArgument("layout edge weight must be finite".to_string()).into());
        }
        Ok(weight)
    })?;
    let n = view.node_count;
    if n == 0 {
        return Ok(IndexMap::new());
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut pos: Vec<[f64; 2]> = view
        .index_to_node
        .iter()
        .map(|node| match config.initial_positions.get(node) {
            Some(&p) => p,
            None => [rng.gen::<f64>(), rng.gen::<f64>()],
        })
        .collect();
    let fixed: Vec<bool> = view.index_to_node.iter().map(|node| config.fixed.contains(node)).collect();

    let k = config.k.unwrap_or_else(|| 1.0 / (n as f64).sqrt());
    let mut temperature = initial_temperature(&pos);
    let cooling_step = temperature / (config.num_iter as f64 + 1.0);
    let mut progress = 0;
    let mut last_energy = f64::INFINITY;

    for iteration in 0..config.num_iter {
        let displacement: Vec<[f64; 2]> = (0..n)
            .into_par_iter()
            .map(|i| if fixed[i] { [0.0, 0.0] } else { node_force(&view, &pos, i, k, config.repulsive_exponent) })
            .collect();

        let mut energy = 0.0;
        let mut moved = 0.0;
        for (i, [dx, dy]) in displacement.into_iter().enumerate() {
            let length = (dx * dx + dy * dy).sqrt();
            if length == 0.0 {
                continue;
            }
            energy += length * length;
            let step = length.min(temperature);
            pos[i][0] += dx / length * step;
            pos[i][1] += dy / length * step;
            moved += step;
        }

        if config.adaptive_cooling {
            if energy < last_energy {
                progress += 1;
                if progress >= 5 {
                    progress = 0;
                    temperature /= 0.9;
                }
            } else {
                progress = 0;
                temperature *= 0.9;
            }
            last_energy = energy;
        } else {
            temperature = (temperature - cooling_step).max(cooling_step);
        }

        if moved / (n as f64) < config.tol {
            debug!("Spring layout converged after {} iterations", iteration + 1);
            break;
        }
    }

    if config.fixed.is_empty() {
        if let Some(scale) = config.scale {
            rescale(&mut pos, scale);
        }
        if let Some([cx, cy]) = config.center {
            for p in pos.iter_mut() {
                p[0] += cx;
                p[1] += cy;
            }
        }
    }

    Ok(view.index_to_node.iter().copied().zip(pos).collect())
}

fn validate<G: GraphAccess>(graph: &G, config: &SpringLayoutConfig) -> AlgorithmResult<()> {
    if let Some(k) = config.k {
        if !(k > 0.0 && k.is_finite()) {
            return Err(AlgorithmError::InvalidArgument(format!("k must be positive, got {}", k)));
        }
    }
    if !config.repulsive_exponent.is_finite() {
        return Err(AlgorithmError::InvalidArgument("repulsive_exponent must be finite".to_string()));
    }
    for (&node, p) in &config.initial_positions {
        if !graph.contains_node(node) {
            return Err(AlgorithmError::NodeNotFound(node));
        }
        if !(p[0].is_finite() && p[1].is_finite()) {
            return Err(AlgorithmError::InvalidArgument(format!("initial position of {} is not finite", node)));
        }
    }
    for &node in &config.fixed {
        if !graph.contains_node(node) {
            return Err(AlgorithmError::NodeNotFound(node));
        }
        if !config.initial_positions.contains_key(&node) {
            return Err(AlgorithmError::InvalidArgument(format!("fixed node {} has no initial position", node)));
        }
    }
    Ok(())
}

/// A tenth of the widest bounding box side
fn initial_temperature(pos: &[[f64; 2]]) -> f64 {
    let extent = |axis: usize| {
        let (lo, hi) = pos
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p[axis]), hi.max(p[axis])));
        hi - lo
    };
    let width = extent(0).max(extent(1));
    if width > 0.0 {
        0.1 * width
    } else {
        0.1
    }
}

/// Net force on node `i`
fn node_force(view: &GraphView, pos: &[[f64; 2]], i: usize, k: f64, exponent: f64) -> [f64; 2] {
    let mut force = [0.0, 0.0];
    let k2 = k * k;

    for (j, other) in pos.iter().enumerate() {
        if j == i {
            continue;
        }
        let (ux, uy, d) = direction(pos[i], *other, i < j);
        let repulsion = k2 / d.powf(exponent - 1.0);
        force[0] += ux * repulsion;
        force[1] += uy * repulsion;
    }

    let weights = view.weights(i);
    for (slot, &j) in view.successors(i).iter().enumerate() {
        if j == i {
            continue;
        }
        let weight = weights.map(|w| w[slot]).unwrap_or(1.0);
        let (ux, uy, d) = direction(pos[i], pos[j], i < j);
        let attraction = weight * d * d / k;
        force[0] -= ux * attraction;
        force[1] -= uy * attraction;
    }

    force
}

/// Unit vector from `to` towards `from` and the clipped distance between them
fn direction(from: [f64; 2], to: [f64; 2], first: bool) -> (f64, f64, f64) {
    let dx = from[0] - to[0];
    let dy = from[1] - to[1];
    let norm = (dx * dx + dy * dy).sqrt();
    if norm == 0.0 {
        // Coincident nodes get pushed apart along the x axis
        let sign = if first { -1.0 } else { 1.0 };
        return (sign, 0.0, MIN_DISTANCE);
    }
    (dx / norm, dy / norm, norm.max(MIN_DISTANCE))
}

fn rescale(pos: &mut [[f64; 2]], scale: f64) {
    let n = pos.len() as f64;
    let mean = [
        pos.iter().map(|p| p[0]).sum::<f64>() / n,
        pos.iter().map(|p| p[1]).sum::<f64>() / n,
    ];
    let mut limit: f64 = 0.0;
    for p in pos.iter_mut() {
        p[0] -= mean[0];
        p[1] -= mean[1];
        limit = limit.max(p[0].abs()).max(p[1].abs());
    }
    if limit > 0.0 {
        for p in pos.iter_mut() {
            p[0] *= scale / limit;
            p[1] *= scale / limit;
        }
    }
}
