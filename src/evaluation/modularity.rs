//! Partition-level modularity scores.
//!
//! Each function reduces a whole partition to one number. None of them
//! validate the partition: overlapping communities are counted once per
//! membership and uncovered nodes simply contribute nothing, except in
//! [`newman_girvan_modularity`], which keeps the last membership of each
//! node.
//!
//! Degenerate inputs (no edges, empty communities, a null model with zero
//! variance) are reported as errors rather than NaN or infinity.
//!
//! ## References
//!
//! - Newman & Girvan (2004). "Finding and evaluating community structure in networks."
//! - Erdős & Rényi (1959). "On random graphs I."
//! - Li, Zhang, Wang, Zhang & Chen (2008). "Quantitative function for community detection."
//! - Miyauchi & Kawase (2016). "Z-score-based modularity for community detection in networks."
//! - Traag, Aldecoa & Delvenne (2015). "Detecting communities using asymptotical surprise."

use super::community::Adjacency;
use super::scoring;
use crate::error::{Error, Result};
use crate::partition::Communities;
use petgraph::graph::UnGraph;

const LOG_TARGET: &str = "partition_fitness::modularity";

/// Newman-Girvan modularity.
///
/// ```text
/// Q = Σ_c [ e_c / m − (d_c / 2m)² ]
/// ```
///
/// `e_c` counts edges inside community c and `d_c` is its degree sum. A node
/// listed in several communities counts for the last one only.
pub fn newman_girvan_modularity<N, E>(
    graph: &UnGraph<N, E>,
    communities: &Communities,
) -> Result<f64> {
    let adjacency = Adjacency::from_graph(graph);
    let q = scoring::community_modularity(&communities.node_assignment(), &adjacency)?;
    log::trace!(target: LOG_TARGET, "newman_girvan_modularity = {q}");
    Ok(q)
}

/// Modularity against an Erdős-Rényi null model.
///
/// ```text
/// Q = (1/m) Σ_c [ mc − m·nc·(nc − 1) / (n·(n − 1)) ]
/// ```
pub fn erdos_renyi_modularity<N, E>(
    graph: &UnGraph<N, E>,
    communities: &Communities,
) -> Result<f64> {
    const METRIC: &str = "erdos_renyi_modularity";

    let adjacency = Adjacency::from_graph(graph);
    let m = adjacency.edge_count() as f64;
    let n = adjacency.node_count() as f64;
    if m == 0.0 {
        return Err(Error::DivisionByZero {
            metric: METRIC,
            denominator: "edge count",
        });
    }
    if n <= 1.0 {
        return Err(Error::DivisionByZero {
            metric: METRIC,
            denominator: "n·(n − 1)",
        });
    }

    let q: f64 = adjacency
        .communities(communities)
        .map(|c| {
            let mc = c.edge_count() as f64;
            let nc = c.node_count() as f64;
            mc - m * nc * (nc - 1.0) / (n * (n - 1.0))
        })
        .sum();

    let q = q / m;
    log::trace!(target: LOG_TARGET, "{METRIC} = {q}");
    Ok(q)
}

/// Modularity density.
///
/// ```text
/// Q = Σ_c (1/nc)·( mean internal degree − mean external degree )
/// ```
pub fn modularity_density<N, E>(graph: &UnGraph<N, E>, communities: &Communities) -> Result<f64> {
    let adjacency = Adjacency::from_graph(graph);
    let mut q = 0.0;
    for c in adjacency.communities(communities) {
        let nc = c.require_members()? as f64;
        let internal = c.internal_degree_sum() as f64 / nc;
        let external = c.edges_outside() as f64 / nc;
        q += (internal - external) / nc;
    }
    log::trace!(target: LOG_TARGET, "modularity_density = {q}");
    Ok(q)
}

/// Z-score modularity.
///
/// ```text
/// mmc  = Σ_c mc / m
/// dc2m = Σ_c (dc / 2m)²
/// Z    = (mmc − dc2m) / sqrt(dc2m·(1 − dc2m))
/// ```
///
/// `dc` is the internal degree sum of community c. Undefined when `dc2m` is
/// 0 or 1 (or beyond, for overlapping partitions).
pub fn z_modularity<N, E>(graph: &UnGraph<N, E>, communities: &Communities) -> Result<f64> {
    const METRIC: &str = "z_modularity";

    let adjacency = Adjacency::from_graph(graph);
    let m = adjacency.edge_count() as f64;
    if m == 0.0 {
        return Err(Error::DivisionByZero {
            metric: METRIC,
            denominator: "edge count",
        });
    }

    let mut mmc = 0.0;
    let mut dc2m = 0.0;
    for c in adjacency.communities(communities) {
        mmc += c.edge_count() as f64 / m;
        dc2m += (c.internal_degree_sum() as f64 / (2.0 * m)).powi(2);
    }

    let variance = dc2m * (1.0 - dc2m);
    if variance <= 0.0 {
        return Err(Error::Undefined {
            metric: METRIC,
            reason: "dc2m·(1 − dc2m) is not positive",
        });
    }

    let z = (mmc - dc2m) / variance.sqrt();
    log::trace!(target: LOG_TARGET, "{METRIC} = {z}");
    Ok(z)
}

/// Asymptotic surprise.
///
/// ```text
/// q  = Σ_c mc / m
/// qa = Σ_c C(nc, 2) / C(n, 2)
/// S  = m·( q·ln(q/qa) + (1 − q)·log2((1 − q)/(1 − qa)) )
/// ```
///
/// A term whose leading factor is zero contributes zero.
pub fn surprise<N, E>(graph: &UnGraph<N, E>, communities: &Communities) -> Result<f64> {
    const METRIC: &str = "surprise";

    let adjacency = Adjacency::from_graph(graph);
    let m = adjacency.edge_count() as f64;
    if m == 0.0 {
        return Err(Error::DivisionByZero {
            metric: METRIC,
            denominator: "edge count",
        });
    }
    let pairs = comb2(adjacency.node_count());
    if pairs == 0.0 {
        return Err(Error::DivisionByZero {
            metric: METRIC,
            denominator: "node pair count C(n, 2)",
        });
    }

    let mut intra_edges = 0.0;
    let mut intra_pairs = 0.0;
    for c in adjacency.communities(communities) {
        intra_edges += c.edge_count() as f64;
        intra_pairs += comb2(c.node_count());
    }
    let q = intra_edges / m;
    let qa = intra_pairs / pairs;

    if !(qa > 0.0 && qa < 1.0) {
        return Err(Error::Undefined {
            metric: METRIC,
            reason: "expected intra-community fraction qa is outside (0, 1)",
        });
    }
    if q > 1.0 {
        return Err(Error::Undefined {
            metric: METRIC,
            reason: "observed intra-community fraction q exceeds 1",
        });
    }

    let sp = m * (xlog(q, q / qa, f64::ln) + xlog(1.0 - q, (1.0 - q) / (1.0 - qa), f64::log2));
    log::trace!(target: LOG_TARGET, "{METRIC} = {sp}");
    Ok(sp)
}

/// Significance.
///
/// ```text
/// p = m / C(m, 2)
/// pc = mc / C(nc, 2)
/// S = Σ_c C(nc, 2)·( pc·ln(pc/p) + (1 − pc)·ln((1 − pc)/(1 − p)) )
/// ```
///
/// `p` must lie strictly inside (0, 1), which needs at least four edges.
/// Every community needs two or more nodes.
pub fn significance<N, E>(graph: &UnGraph<N, E>, communities: &Communities) -> Result<f64> {
    const METRIC: &str = "significance";

    let adjacency = Adjacency::from_graph(graph);
    let m = adjacency.edge_count();
    let binom = comb2(m);
    if binom == 0.0 {
        return Err(Error::DivisionByZero {
            metric: METRIC,
            denominator: "edge pair count C(m, 2)",
        });
    }
    let p = m as f64 / binom;
    if !(p > 0.0 && p < 1.0) {
        return Err(Error::Undefined {
            metric: METRIC,
            reason: "baseline probability m / C(m, 2) is outside (0, 1)",
        });
    }

    let mut q = 0.0;
    for c in adjacency.communities(communities) {
        let binom_c = comb2(c.node_count());
        if binom_c == 0.0 {
            log::debug!(target: LOG_TARGET, "{METRIC}: community {} has fewer than two nodes", c.index());
            return Err(Error::DivisionByZero {
                metric: METRIC,
                denominator: "community pair count C(nc, 2)",
            });
        }
        let pc = c.edge_count() as f64 / binom_c;
        if pc > 1.0 {
            return Err(Error::Undefined {
                metric: METRIC,
                reason: "community edge probability exceeds 1",
            });
        }
        q += binom_c * (xlog(pc, pc / p, f64::ln) + xlog(1.0 - pc, (1.0 - pc) / (1.0 - p), f64::ln));
    }

    log::trace!(target: LOG_TARGET, "{METRIC} = {q}");
    Ok(q)
}

/// `weight · log(ratio)`, taking 0 · log 0 as 0.
fn xlog(weight: f64, ratio: f64, log: fn(f64) -> f64) -> f64 {
    if weight == 0.0 {
        0.0
    } else {
        weight * log(ratio)
    }
}

fn comb2(n: usize) -> f64 {
    if n < 2 {
        0.0
    } else {
        (n * (n - 1) / 2) as f64
    }
}
