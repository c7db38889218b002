//! Graph adjacency and induced-subgraph views.
//!
//! Every metric reads the graph through [`Adjacency`], built once per call
//! from a `petgraph` graph, and reads each community through an
//! [`InducedCommunity`].

use crate::error::{Error, Result};
use crate::partition::Communities;
use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;
use std::collections::HashSet;

const LOG_TARGET: &str = "partition_fitness::community";

/// Unweighted adjacency lists of an undirected graph.
///
/// Neighbor lists keep multiplicity: a parallel edge appears once per copy
/// and a self-loop appears twice in its own node's list, so that
/// `degree(v) == neighbors(v).len()`.
#[derive(Debug, Clone)]
pub struct Adjacency {
    neighbors: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
}

impl Adjacency {
    /// Read the structure of a graph; node and edge weights are ignored.
    pub fn from_graph<N, E>(graph: &UnGraph<N, E>) -> Self {
        let mut neighbors = vec![Vec::new(); graph.node_count()];
        let mut edges = Vec::with_capacity(graph.edge_count());
        for edge in graph.edge_references() {
            let i = edge.source().index();
            let j = edge.target().index();
            neighbors[i].push(j);
            neighbors[j].push(i);
            edges.push((i, j));
        }
        Self { neighbors, edges }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Degree of a node.
    ///
    /// # Panics
    ///
    /// Panics if `node >= self.node_count()`. Unlike [`Self::induced`], which
    /// drops unknown ids, this is a direct lookup.
    pub fn degree(&self, node: usize) -> usize {
        self.neighbors[node].len()
    }

    /// Neighbors of a node, with multiplicity.
    ///
    /// # Panics
    ///
    /// Panics if `node >= self.node_count()`.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.neighbors[node]
    }

    /// All edges as `(source, target)` pairs.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Subgraph induced by `nodes`.
    ///
    /// Ids that are not nodes of the graph are dropped and duplicates collapse.
    pub fn induced(&self, nodes: &[usize]) -> InducedCommunity<'_> {
        InducedCommunity::new(self, 0, nodes)
    }

    /// Induced subgraphs of every community, in partition order.
    pub fn communities<'a>(
        &'a self,
        communities: &'a Communities,
    ) -> impl Iterator<Item = InducedCommunity<'a>> + 'a {
        communities
            .iter()
            .enumerate()
            .map(move |(index, nodes)| InducedCommunity::new(self, index, nodes))
    }
}

/// The subgraph induced by one community.
#[derive(Debug, Clone)]
pub struct InducedCommunity<'a> {
    graph: &'a Adjacency,
    index: usize,
    nodes: Vec<usize>,
    members: HashSet<usize>,
    internal: Vec<usize>,
}

impl<'a> InducedCommunity<'a> {
    fn new(graph: &'a Adjacency, index: usize, requested: &[usize]) -> Self {
        let n = graph.node_count();
        let mut nodes: Vec<usize> = requested.iter().copied().filter(|&v| v < n).collect();
        nodes.sort_unstable();
        nodes.dedup();

        let dropped = requested.iter().filter(|&&v| v >= n).count();
        if dropped > 0 {
            log::debug!(target: LOG_TARGET, "Ignoring {dropped} node id(s) outside a graph of {n} nodes");
        }

        let members: HashSet<usize> = nodes.iter().copied().collect();
        let internal = nodes
            .iter()
            .map(|&v| {
                graph
                    .neighbors(v)
                    .iter()
                    .filter(|&&u| members.contains(&u))
                    .count()
            })
            .collect();

        Self {
            graph,
            index,
            nodes,
            members,
            internal,
        }
    }

    /// The graph this community lives in.
    pub fn graph(&self) -> &'a Adjacency {
        self.graph
    }

    /// Position of the community in its partition (0 when built standalone).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Fail with [`Error::EmptyCommunity`] if there are no members.
    pub fn require_members(&self) -> Result<usize> {
        if self.nodes.is_empty() {
            return Err(Error::EmptyCommunity { index: self.index });
        }
        Ok(self.nodes.len())
    }

    /// Member nodes, sorted.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Number of member nodes (`nc`).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True if the induced subgraph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges with both endpoints inside (`mc`).
    pub fn edge_count(&self) -> usize {
        self.internal.iter().sum::<usize>() / 2
    }

    /// Whether a node belongs to the community.
    pub fn contains(&self, node: usize) -> bool {
        self.members.contains(&node)
    }

    /// Degrees inside the induced subgraph, aligned with [`Self::nodes`].
    pub fn internal_degrees(&self) -> &[usize] {
        &self.internal
    }

    /// Degrees toward non-members, aligned with [`Self::nodes`].
    pub fn external_degrees(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .zip(&self.internal)
            .map(|(&v, &d)| self.graph.degree(v) - d)
    }

    /// Sum of internal degrees (`2·mc`).
    pub fn internal_degree_sum(&self) -> usize {
        self.internal.iter().sum()
    }

    /// Adjacency entries leaving the community (the boundary size).
    pub fn edges_outside(&self) -> usize {
        self.external_degrees().sum()
    }

    /// Number of members that close at least one triangle inside the community.
    pub fn triangle_participants(&self) -> usize {
        let local: Vec<HashSet<usize>> = self
            .nodes
            .iter()
            .map(|&v| {
                self.graph
                    .neighbors(v)
                    .iter()
                    .copied()
                    .filter(|&u| u != v && self.members.contains(&u))
                    .collect()
            })
            .collect();

        let position = |v: usize| self.nodes.binary_search(&v).ok();

        local
            .iter()
            .enumerate()
            .filter(|(i, nbrs)| {
                let u = self.nodes[*i];
                nbrs.iter().any(|&v| {
                    position(v).is_some_and(|j| {
                        local[j].iter().any(|&w| w != u && nbrs.contains(&w))
                    })
                })
            })
            .count()
    }
}
