//! Graph isomorphism
//!
//! Backtracking search for a bijection between the live nodes of two graphs
//! of the same variant. The search state is an explicit stack of choice
//! points, one per matched node, so deep graphs cannot overflow the call
//! stack.

use crate::common::{GraphAccess, GraphView};
use crate::error::{AlgorithmError, AlgorithmResult};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// One graph's dense projection plus its edge multiplicities
struct MatchSide {
    view: GraphView,
    multiplicity: HashMap<(usize, usize), usize>,
}

impl MatchSide {
    fn new<G: GraphAccess>(graph: &G) -> Self {
        let view = GraphView::from_graph(graph, false);
        let mut multiplicity = HashMap::new();
        for u in 0..view.node_count {
            for &v in view.successors(u) {
                *multiplicity.entry((u, v)).or_insert(0) += 1;
            }
        }
        MatchSide { view, multiplicity }
    }

    fn edges(&self, u: usize, v: usize) -> usize {
        self.multiplicity.get(&(u, v)).copied().unwrap_or(0)
    }

    fn degree(&self, u: usize) -> usize {
        self.view.out_degree(u) + self.view.in_degree(u)
    }

    /// Visiting order: breadth-first from the highest degree unvisited node,
    /// so most tentative pairs already have mapped neighbors to check.
    fn match_order(&self) -> Vec<usize> {
        let n = self.view.node_count;
        let mut by_degree: Vec<usize> = (0..n).collect();
        by_degree.sort_by(|&a, &b| self.degree(b).cmp(&self.degree(a)).then(a.cmp(&b)));

        let mut seen = vec![false; n];
        let mut order = Vec::with_capacity(n);
        for root in by_degree {
            if seen[root] {
                continue;
            }
            seen[root] = true;
            let mut queue = VecDeque::from([root]);
            while let Some(u) = queue.pop_front() {
                order.push(u);
                for &v in self.view.successors(u).iter().chain(self.view.predecessors(u)) {
                    if !seen[v] {
                        seen[v] = true;
                        queue.push_back(v);
                    }
                }
            }
        }
        order
    }
}

/// A matched node of the first graph and the next candidate to try for it
struct ChoicePoint {
    next_candidate: usize,
    mapped_to: Option<usize>,
}

/// Partial bijection between the dense indices of both graphs
struct Mapping {
    core1: Vec<Option<usize>>,
    core2: Vec<Option<usize>>,
}

impl Mapping {
    /// Whether pairing `u` with `v` keeps every edge to already mapped nodes consistent
    fn feasible(&self, g1: &MatchSide, g2: &MatchSide, u: usize, v: usize) -> bool {
        if self.core2[v].is_some()
            || g1.view.out_degree(u) != g2.view.out_degree(v)
            || g1.view.in_degree(u) != g2.view.in_degree(v)
            || g1.edges(u, u) != g2.edges(v, v)
        {
            return false;
        }

        for &w in g1.view.successors(u) {
            if let Some(x) = self.core1[w] {
                if g1.edges(u, w) != g2.edges(v, x) {
                    return false;
                }
            }
        }
        for &w in g1.view.predecessors(u) {
            if let Some(x) = self.core1[w] {
                if g1.edges(w, u) != g2.edges(x, v) {
                    return false;
                }
            }
        }
        for &x in g2.view.successors(v) {
            if let Some(w) = self.core2[x] {
                if g1.edges(u, w) != g2.edges(v, x) {
                    return false;
                }
            }
        }
        for &x in g2.view.predecessors(v) {
            if let Some(w) = self.core2[x] {
                if g1.edges(w, u) != g2.edges(x, v) {
                    return false;
                }
            }
        }
        true
    }
}

type NodeMatcher<'f, N1, N2, E> = &'f mut dyn FnMut(&N1, &N2) -> Result<bool, E>;

fn search<G1, G2, E>(
    g1: &G1,
    g2: &G2,
    mut node_match: Option<NodeMatcher<'_, G1::NodeWeight, G2::NodeWeight, E>>,
) -> Result<bool, E>
where
    G1: GraphAccess,
    G2: GraphAccess,
    E: From<AlgorithmError>,
{
    if g1.kind() != g2.kind() {
        return Err(AlgorithmError::VariantMismatch {
            expected: g1.kind(),
            found: g2.kind(),
        }
        .into());
    }
    if g1.node_count() != g2.node_count() || g1.edge_count() != g2.edge_count() {
        return Ok(false);
    }

    let side1 = MatchSide::new(g1);
    let side2 = MatchSide::new(g2);
    let n = side1.view.node_count;
    if n == 0 {
        return Ok(true);
    }

    let order = side1.match_order();
    let mut mapping = Mapping {
        core1: vec![None; n],
        core2: vec![None; n],
    };
    let mut stack = vec![ChoicePoint {
        next_candidate: 0,
        mapped_to: None,
    }];
    let mut tried = 0usize;

    while !stack.is_empty() {
        let depth = stack.len() - 1;
        let u = order[depth];
        let point = &mut stack[depth];

        // Undo this level's previous choice before trying the next one
        if let Some(v) = point.mapped_to.take() {
            mapping.core1[u] = None;
            mapping.core2[v] = None;
        }

        let mut chosen = None;
        while point.next_candidate < n {
            let v = point.next_candidate;
            point.next_candidate += 1;
            tried += 1;

            if !mapping.feasible(&side1, &side2, u, v) {
                continue;
            }
            if let Some(matcher) = node_match.as_mut() {
                let a = g1.node_weight(side1.view.index_to_node[u]);
                let b = g2.node_weight(side2.view.index_to_node[v]);
                match (a, b) {
                    (Some(a), Some(b)) => {
                        if !matcher(a, b)? {
                            continue;
                        }
                    }
                    (None, _) => return Err(AlgorithmError::NodeNotFound(side1.view.index_to_node[u]).into()),
                    (_, None) => return Err(AlgorithmError::NodeNotFound(side2.view.index_to_node[v]).into()),
                }
            }
            chosen = Some(v);
            break;
        }

        match chosen {
            Some(v) => {
                point.mapped_to = Some(v);
                mapping.core1[u] = Some(v);
                mapping.core2[v] = Some(u);
                if depth + 1 == n {
                    debug!("Isomorphism found after {} candidate pairs", tried);
                    return Ok(true);
                }
                stack.push(ChoicePoint {
                    next_candidate: 0,
                    mapped_to: None,
                });
            }
            None => {
                stack.pop();
            }
        }
    }

    debug!("No isomorphism after {} candidate pairs", tried);
    Ok(false)
}

/// Whether the two graphs are structurally isomorphic, ignoring payloads.
///
/// Fails with `VariantMismatch` when one graph is directed and the other is not.
pub fn is_isomorphic<G1, G2>(g1: &G1, g2: &G2) -> AlgorithmResult<bool>
where
    G1: GraphAccess,
    G2: GraphAccess,
{
    search::<G1, G2, AlgorithmError>(g1, g2, None)
}

/// Whether the two graphs are isomorphic with `node_match` accepting every
/// paired payload.
///
/// `node_match` is consulted for structurally feasible pairs only. Its first
/// error aborts the search and is returned unchanged.
pub fn is_isomorphic_node_match<G1, G2, F, E>(g1: &G1, g2: &G2, mut node_match: F) -> Result<bool, E>
where
    G1: GraphAccess,
    G2: GraphAccess,
    F: FnMut(&G1::NodeWeight, &G2::NodeWeight) -> Result<bool, E>,
    E: From<AlgorithmError>,
{
    let matcher: NodeMatcher<'_, G1::NodeWeight, G2::NodeWeight, E> = &mut node_match;
    search(g1, g2, Some(matcher))
}
