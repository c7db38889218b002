//! Link modularity for overlapping communities.
//!
//! Extends Newman-Girvan modularity to nodes that belong to several
//! communities (Nicosia, Mangioni, Carchiolo & Malgeri 2009). Each node i
//! splits its membership evenly over the communities containing it, giving a
//! belonging coefficient `a_ic`. The contribution of an edge to community c is
//! weighted by a smooth function of the endpoints' coefficients:
//!
//! ```text
//! s(a)    = 1 / (1 + e^(−(2·p·a − p)))
//! F(i,j)  = s(a_ic)·s(a_jc)
//! β_ic    = s(a_ic)·Σ_j s(a_jc) / n
//! Q       = (1/2m) Σ_c [ Σ_ij F(i,j)·A_ij − (Σ_i β_ic·k_i)² / 2m ]
//! ```
//!
//! `p` is the steepness of the sigmoid; with the usual p = 30, s(1) ≈ 1 and
//! s(0) ≈ 0, so a node fully inside a community weighs 1 and a stranger 0.
//!
//! ## Example
//!
//! ```rust
//! use partition_fitness::{Communities, LinkModularity};
//! use petgraph::graph::UnGraph;
//!
//! let graph = UnGraph::<(), ()>::from_edges(&[(0, 1), (1, 2), (2, 3), (3, 0)]);
//! let communities = Communities::new(vec![vec![0, 1], vec![2, 3]], "manual");
//!
//! let q = LinkModularity::new().score(&graph, &communities).unwrap();
//! assert!((q - 0.375).abs() < 1e-9);
//! ```

use super::community::Adjacency;
use crate::error::{Error, Result};
use crate::partition::Communities;
use petgraph::graph::UnGraph;
use std::collections::HashSet;

const LOG_TARGET: &str = "partition_fitness::link_modularity";

/// Overlapping link modularity.
#[derive(Debug, Clone)]
pub struct LinkModularity {
    /// Steepness `p` of the belonging sigmoid.
    steepness: f64,
}

impl LinkModularity {
    /// Create a scorer with steepness 30.
    pub fn new() -> Self {
        Self { steepness: 30.0 }
    }

    /// Set the sigmoid steepness.
    ///
    /// Larger values make the weight of a node closer to a step between
    /// "outside" (0) and "fully inside" (1).
    pub fn with_steepness(mut self, steepness: f64) -> Self {
        self.steepness = steepness;
        self
    }

    /// The sigmoid steepness.
    pub fn steepness(&self) -> f64 {
        self.steepness
    }

    fn weight(&self, belonging: f64) -> f64 {
        let f = 2.0 * self.steepness * belonging - self.steepness;
        1.0 / (1.0 + (-f).exp())
    }

    /// Score a partition of `graph`.
    pub fn score<N, E>(&self, graph: &UnGraph<N, E>, communities: &Communities) -> Result<f64> {
        if !(self.steepness.is_finite() && self.steepness > 0.0) {
            return Err(Error::InvalidParameter {
                name: "steepness",
                message: "must be finite and positive",
            });
        }

        let adjacency = Adjacency::from_graph(graph);
        let n = adjacency.node_count();
        let m = adjacency.edge_count() as f64;
        if m == 0.0 {
            return Err(Error::DivisionByZero {
                metric: "link_modularity",
                denominator: "edge count",
            });
        }

        let members: Vec<HashSet<usize>> = communities
            .iter()
            .map(|c| c.iter().copied().filter(|&v| v < n).collect())
            .collect();

        let mut memberships = vec![0usize; n];
        for community in &members {
            for &v in community {
                memberships[v] += 1;
            }
        }

        let outsider = self.weight(0.0);
        let degrees: Vec<f64> = (0..n).map(|v| adjacency.degree(v) as f64).collect();

        let mut q = 0.0;
        for community in &members {
            let s: Vec<f64> = (0..n)
                .map(|v| {
                    if community.contains(&v) {
                        self.weight(1.0 / memberships[v] as f64)
                    } else {
                        outsider
                    }
                })
                .collect();

            // Both orientations of every undirected edge.
            let observed: f64 = 2.0
                * adjacency
                    .edges()
                    .iter()
                    .map(|&(i, j)| s[i] * s[j])
                    .sum::<f64>();

            let total: f64 = s.iter().sum();
            let weighted_degree: f64 = s.iter().zip(&degrees).map(|(si, ki)| si * ki).sum();
            let expected_stub = total / n as f64 * weighted_degree;

            q += observed - expected_stub * expected_stub / (2.0 * m);
        }

        let q = q / (2.0 * m);
        log::trace!(target: LOG_TARGET, "link_modularity = {q}");
        Ok(q)
    }
}

impl Default for LinkModularity {
    fn default() -> Self {
        Self::new()
    }
}

/// Link modularity with the default steepness.
pub fn link_modularity<N, E>(graph: &UnGraph<N, E>, communities: &Communities) -> Result<f64> {
    LinkModularity::new().score(graph, communities)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ring() -> UnGraph<(), ()> {
        UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 3), (3, 0)])
    }

    #[test]
    fn test_weight_endpoints() {
        let lm = LinkModularity::new();
        assert!(lm.weight(1.0) > 1.0 - 1e-12);
        assert!(lm.weight(0.0) < 1e-12);
        assert!((lm.weight(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ring_halves() {
        let p = Communities::new(vec![vec![0, 1], vec![2, 3]], "test");
        let q = link_modularity(&ring(), &p).unwrap();
        // Per half: 2 observed, (2/4·4)²/8 = 0.5 expected.
        assert!((q - 3.0 / 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_splits_membership() {
        // Node 2 sits in both communities, so s(a_2) = s(1/2) = 0.5.
        // {0,1,2}: observed 2·(1 + 0.5) = 3, expected (2.5/4·5)²/8.
        // {2,3}:   observed 2·0.5 = 1,       expected (1.5/4·3)²/8.
        let overlapping = Communities::new(vec![vec![0, 1, 2], vec![2, 3]], "test");
        let q = link_modularity(&ring(), &overlapping).unwrap();
        let first = 3.0 - (2.5_f64 / 4.0 * 5.0).powi(2) / 8.0;
        let second = 1.0 - (1.5_f64 / 4.0 * 3.0).powi(2) / 8.0;
        assert!((q - (first + second) / 8.0).abs() < 1e-9);
        assert!((q - 0.327_636_718_75).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric_overlap_matches_disjoint() {
        // Nodes 0 and 2 are shared evenly, which leaves every community
        // with the same observed and expected weight as the plain halves.
        let disjoint = Communities::new(vec![vec![0, 1], vec![2, 3]], "test");
        let overlapping = Communities::new(vec![vec![0, 1, 2], vec![2, 3, 0]], "test");
        let a = link_modularity(&ring(), &disjoint).unwrap();
        let b = link_modularity(&ring(), &overlapping).unwrap();
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_needs_edges() {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        let _ = graph.add_node(());
        let p = Communities::new(vec![vec![0]], "test");
        assert!(matches!(
            link_modularity(&graph, &p),
            Err(Error::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_steepness() {
        let p = Communities::new(vec![vec![0, 1], vec![2, 3]], "test");
        let err = LinkModularity::new()
            .with_steepness(-1.0)
            .score(&ring(), &p)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "steepness", .. }));
    }
}
