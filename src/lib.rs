//! # partition-fitness
//!
//! Quality metrics for a partition of a graph into communities: per-community
//! fitness scores (conductance, cut ratio, internal density, ...) summarized
//! as {min, max, mean, std}, and partition-level modularity variants
//! (Newman-Girvan, Erdős-Rényi, density, Z, surprise, significance, link).
//!
//! Graphs are `petgraph` undirected graphs; communities are lists of node
//! indices wrapped in [`Communities`].

/// Error types used across `partition-fitness`.
pub mod error;
pub mod evaluation;
pub mod partition;

#[cfg(test)]
mod evaluation_tests;

pub use error::{Error, Result};
pub use evaluation::{
    erdos_renyi_modularity, link_modularity, modularity_density, newman_girvan_modularity,
    quality_indexes, significance, surprise, z_modularity, CommunityScore, Fitness,
    FitnessResult, LinkModularity, QualityIndex,
};
pub use partition::{Communities, Parameter};
