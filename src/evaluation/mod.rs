//! Quality evaluation of graph partitions.
//!
//! Given a graph and the communities a detection algorithm found in it,
//! score how "good" the partition is. Two families of scores are offered.
//!
//! ## Per-community fitness
//!
//! Score each community on its own, then summarize:
//!
//! ```text
//! values[i] = f(G, induced_subgraph(G, C_i))
//! summary   = { min, max, mean, std } over values
//! ```
//!
//! | Score | Reads | Good when |
//! |-------|-------|-----------|
//! | internal edge density | mc / C(nc, 2) | high |
//! | average internal degree | 2·mc / nc | high |
//! | fraction over median degree | members above median internal degree | high |
//! | triangle participation ratio | members in an internal triangle | high |
//! | edges inside | mc | high |
//! | expansion | out / nc | low |
//! | cut ratio | out / (nc·(n − nc)) | low |
//! | conductance | out / (2·mc + out) | low |
//! | normalized cut | conductance plus the complement's share | low |
//! | max / avg / flake ODF | edges each member sends outside | low |
//! | size | nc | n/a |
//!
//! ## Partition-level modularity
//!
//! One number for the whole partition, comparing the observed concentration
//! of edges inside communities to a null model:
//!
//! - [`newman_girvan_modularity`]: configuration-model null, the classic Q.
//! - [`erdos_renyi_modularity`]: uniform random graph null.
//! - [`modularity_density`]: internal minus external degree, size-normalized.
//! - [`z_modularity`]: Q expressed as a z-score.
//! - [`surprise`] and [`significance`]: binomial divergence from chance density.
//! - [`link_modularity`]: Q generalized to overlapping communities.
//!
//! ## Usage
//!
//! ```rust
//! use partition_fitness::evaluation::{conductance, newman_girvan_modularity};
//! use partition_fitness::Communities;
//! use petgraph::graph::UnGraph;
//!
//! // Ring 0-1-2-3-0 split into two halves.
//! let graph = UnGraph::<(), ()>::from_edges(&[(0, 1), (1, 2), (2, 3), (3, 0)]);
//! let communities = Communities::new(vec![vec![0, 1], vec![2, 3]], "manual");
//!
//! let q = newman_girvan_modularity(&graph, &communities).unwrap();
//! assert!(q.abs() < 1e-12);
//!
//! let fitness = conductance(&graph, &communities, true).unwrap();
//! let summary = fitness.summary().unwrap();
//! assert_eq!(summary.mean, 0.5);
//! ```
//!
//! ## Partitions are not validated
//!
//! Communities may overlap or leave nodes out. Ids that are not nodes of the
//! graph are ignored. Use [`Communities::is_disjoint`](crate::Communities::is_disjoint)
//! and [`Communities::coverage`](crate::Communities::coverage) to check.

mod community;
mod fitness;
mod link_modularity;
mod modularity;
pub mod scoring;

pub use community::{Adjacency, InducedCommunity};
pub use fitness::{
    average_internal_degree, avg_odf, conductance, cut_ratio, edges_inside, expansion, flake_odf,
    fraction_over_median_degree, internal_edge_density, max_odf, normalized_cut, quality_indexes,
    size, triangle_participation_ratio, CommunityScore, Fitness, FitnessResult, QualityIndex,
};
pub use link_modularity::{link_modularity, LinkModularity};
pub use modularity::{
    erdos_renyi_modularity, modularity_density, newman_girvan_modularity, significance, surprise,
    z_modularity,
};
