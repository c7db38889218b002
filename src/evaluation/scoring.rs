//! Per-community scoring primitives.
//!
//! Each primitive scores one induced community against its graph. The
//! ratio-style scores fall back to 0.0 when their denominator is zero (a
//! community spanning the whole graph has no cut ratio, an isolated node has
//! no internal density). The out-degree-fraction family and the triangle
//! participation ratio have no such fallback and reject empty communities.
//!
//! Notation used below:
//!
//! ```text
//! n, m   nodes and edges of the graph
//! nc, mc nodes and edges of the induced community
//! out    adjacency entries leaving the community
//! ```

use super::community::{Adjacency, InducedCommunity};
use crate::error::{Error, Result};
use std::collections::{BTreeSet, HashMap};

const LOG_TARGET: &str = "partition_fitness::scoring";

fn guarded_ratio(metric: &'static str, numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        log::debug!(target: LOG_TARGET, "{metric}: zero denominator, scoring 0");
        return 0.0;
    }
    numerator / denominator
}

/// `out / (2·mc + out) + out / (2·(m − mc) + out)`.
pub fn normalized_cut(graph: &Adjacency, community: &InducedCommunity<'_>) -> Result<f64> {
    let out = community.edges_outside() as f64;
    let mc = community.edge_count() as f64;
    let m = graph.edge_count() as f64;

    let inner = 2.0 * mc + out;
    let outer = 2.0 * (m - mc) + out;
    if inner == 0.0 || outer == 0.0 {
        log::debug!(target: LOG_TARGET, "normalized cut: zero denominator, scoring 0");
        return Ok(0.0);
    }
    Ok(out / inner + out / outer)
}

/// `mc / (nc·(nc − 1)/2)`: fraction of possible internal edges present.
pub fn internal_edge_density(
    _graph: &Adjacency,
    community: &InducedCommunity<'_>,
) -> Result<f64> {
    let nc = community.node_count() as f64;
    let possible = nc * (nc - 1.0) / 2.0;
    Ok(guarded_ratio(
        "internal edge density",
        community.edge_count() as f64,
        possible,
    ))
}

/// `2·mc / nc`.
pub fn average_internal_degree(
    _graph: &Adjacency,
    community: &InducedCommunity<'_>,
) -> Result<f64> {
    Ok(guarded_ratio(
        "average internal degree",
        2.0 * community.edge_count() as f64,
        community.node_count() as f64,
    ))
}

/// Fraction of members whose internal degree is strictly above the median
/// internal degree.
pub fn fraction_over_median_degree(
    _graph: &Adjacency,
    community: &InducedCommunity<'_>,
) -> Result<f64> {
    let degrees = community.internal_degrees();
    if degrees.is_empty() {
        log::debug!(target: LOG_TARGET, "fraction over median degree: empty community, scoring 0");
        return Ok(0.0);
    }
    let median = median(degrees);
    let above = degrees.iter().filter(|&&d| d as f64 > median).count();
    Ok(above as f64 / degrees.len() as f64)
}

/// `out / nc`: boundary edges per member.
pub fn expansion(_graph: &Adjacency, community: &InducedCommunity<'_>) -> Result<f64> {
    Ok(guarded_ratio(
        "expansion",
        community.edges_outside() as f64,
        community.node_count() as f64,
    ))
}

/// `out / (nc·(n − nc))`: fraction of possible boundary edges present.
pub fn cut_ratio(graph: &Adjacency, community: &InducedCommunity<'_>) -> Result<f64> {
    let nc = community.node_count();
    let possible = (nc * (graph.node_count() - nc)) as f64;
    Ok(guarded_ratio(
        "cut ratio",
        community.edges_outside() as f64,
        possible,
    ))
}

/// `mc`.
pub fn edges_inside(_graph: &Adjacency, community: &InducedCommunity<'_>) -> Result<f64> {
    Ok(community.edge_count() as f64)
}

/// `out / (2·mc + out)`: fraction of member edge endpoints that leave.
pub fn conductance(_graph: &Adjacency, community: &InducedCommunity<'_>) -> Result<f64> {
    let out = community.edges_outside() as f64;
    let volume = 2.0 * community.edge_count() as f64 + out;
    Ok(guarded_ratio("conductance", out, volume))
}

/// Largest number of edges any member sends outside.
pub fn max_odf(_graph: &Adjacency, community: &InducedCommunity<'_>) -> Result<f64> {
    let _ = community.require_members()?;
    let max = community.external_degrees().max().unwrap_or(0);
    Ok(max as f64)
}

/// Mean number of edges members send outside.
pub fn avg_odf(_graph: &Adjacency, community: &InducedCommunity<'_>) -> Result<f64> {
    let nc = community.require_members()?;
    Ok(community.edges_outside() as f64 / nc as f64)
}

/// Fraction of members with more edges outside than inside.
pub fn flake_odf(_graph: &Adjacency, community: &InducedCommunity<'_>) -> Result<f64> {
    let nc = community.require_members()?;
    let losing = community
        .internal_degrees()
        .iter()
        .zip(community.external_degrees())
        .filter(|&(&inside, outside)| inside < outside)
        .count();
    Ok(losing as f64 / nc as f64)
}

/// Fraction of members that belong to a triangle inside the community.
pub fn triangle_participation_ratio(
    _graph: &Adjacency,
    community: &InducedCommunity<'_>,
) -> Result<f64> {
    let nc = community.require_members()?;
    Ok(community.triangle_participants() as f64 / nc as f64)
}

/// Newman-Girvan modularity of a node → community assignment.
///
/// Nodes missing from `assignment` are skipped, as are edges toward them.
/// Only community ids that appear in `assignment` are summed.
pub fn community_modularity(assignment: &HashMap<usize, usize>, graph: &Adjacency) -> Result<f64> {
    let m = graph.edge_count() as f64;
    if m == 0.0 {
        return Err(Error::DivisionByZero {
            metric: "modularity",
            denominator: "edge count",
        });
    }

    let mut inc: HashMap<usize, f64> = HashMap::new();
    let mut deg: HashMap<usize, f64> = HashMap::new();

    for node in 0..graph.node_count() {
        let Some(&com) = assignment.get(&node) else {
            continue;
        };
        *deg.entry(com).or_insert(0.0) += graph.degree(node) as f64;
        for neighbor in graph.neighbors(node) {
            // Each internal edge is seen from both ends; a self-loop sits
            // twice in its own list.
            if assignment.get(neighbor) == Some(&com) {
                *inc.entry(com).or_insert(0.0) += 0.5;
            }
        }
    }

    let ids: BTreeSet<usize> = assignment.values().copied().collect();
    Ok(ids
        .into_iter()
        .map(|com| {
            let inside = inc.get(&com).copied().unwrap_or(0.0);
            let degree = deg.get(&com).copied().unwrap_or(0.0);
            inside / m - (degree / (2.0 * m)).powi(2)
        })
        .sum())
}

fn median(values: &[usize]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    }
}
