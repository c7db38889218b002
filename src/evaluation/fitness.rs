//! Per-community fitness functions.
//!
//! Each function scores every community of a partition with one primitive
//! from [`scoring`](super::scoring) and either returns the raw scores or
//! their [`FitnessResult`] summary.

use super::community::{Adjacency, InducedCommunity};
use super::scoring;
use crate::error::{Error, Result};
use crate::partition::Communities;
use petgraph::graph::UnGraph;

const LOG_TARGET: &str = "partition_fitness::fitness";

/// Distribution of a per-community score.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessResult {
    /// Smallest score.
    pub min: f64,
    /// Largest score.
    pub max: f64,
    /// Mean score.
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
}

impl FitnessResult {
    /// Summarize a list of scores.
    ///
    /// Returns [`Error::EmptyInput`] for an empty list.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyInput);
        }
        let count = values.len() as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / count;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
        Ok(Self {
            min,
            max,
            mean,
            std: variance.sqrt(),
        })
    }
}

/// Output of a per-community metric.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fitness {
    /// Summary over all communities.
    Summary(FitnessResult),
    /// One score per community, in partition order.
    Values(Vec<f64>),
}

impl Fitness {
    /// The summary, if this is one.
    pub fn summary(&self) -> Option<&FitnessResult> {
        match self {
            Fitness::Summary(s) => Some(s),
            Fitness::Values(_) => None,
        }
    }

    /// The raw scores, if these are they.
    pub fn values(&self) -> Option<&[f64]> {
        match self {
            Fitness::Summary(_) => None,
            Fitness::Values(v) => Some(v),
        }
    }
}

/// Scores one induced community.
///
/// Implemented by [`QualityIndex`] and by any closure with the same shape,
/// so callers can plug their own score into [`quality_indexes`].
pub trait CommunityScore {
    /// Score a community of `graph`.
    fn score(&self, graph: &Adjacency, community: &InducedCommunity<'_>) -> Result<f64>;
}

impl<F> CommunityScore for F
where
    F: Fn(&Adjacency, &InducedCommunity<'_>) -> Result<f64>,
{
    fn score(&self, graph: &Adjacency, community: &InducedCommunity<'_>) -> Result<f64> {
        self(graph, community)
    }
}

/// The built-in per-community scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityIndex {
    /// [`scoring::normalized_cut`]
    NormalizedCut,
    /// [`scoring::internal_edge_density`]
    InternalEdgeDensity,
    /// [`scoring::average_internal_degree`]
    AverageInternalDegree,
    /// [`scoring::fraction_over_median_degree`]
    FractionOverMedianDegree,
    /// [`scoring::expansion`]
    Expansion,
    /// [`scoring::cut_ratio`]
    CutRatio,
    /// [`scoring::edges_inside`]
    EdgesInside,
    /// [`scoring::conductance`]
    Conductance,
    /// [`scoring::max_odf`]
    MaxOdf,
    /// [`scoring::avg_odf`]
    AvgOdf,
    /// [`scoring::flake_odf`]
    FlakeOdf,
    /// [`scoring::triangle_participation_ratio`]
    TriangleParticipationRatio,
    /// Number of member nodes.
    Size,
}

impl QualityIndex {
    /// Every built-in score.
    pub const ALL: [QualityIndex; 13] = [
        QualityIndex::NormalizedCut,
        QualityIndex::InternalEdgeDensity,
        QualityIndex::AverageInternalDegree,
        QualityIndex::FractionOverMedianDegree,
        QualityIndex::Expansion,
        QualityIndex::CutRatio,
        QualityIndex::EdgesInside,
        QualityIndex::Conductance,
        QualityIndex::MaxOdf,
        QualityIndex::AvgOdf,
        QualityIndex::FlakeOdf,
        QualityIndex::TriangleParticipationRatio,
        QualityIndex::Size,
    ];

    /// Snake-case name of the score.
    pub fn name(self) -> &'static str {
        match self {
            QualityIndex::NormalizedCut => "normalized_cut",
            QualityIndex::InternalEdgeDensity => "internal_edge_density",
            QualityIndex::AverageInternalDegree => "average_internal_degree",
            QualityIndex::FractionOverMedianDegree => "fraction_over_median_degree",
            QualityIndex::Expansion => "expansion",
            QualityIndex::CutRatio => "cut_ratio",
            QualityIndex::EdgesInside => "edges_inside",
            QualityIndex::Conductance => "conductance",
            QualityIndex::MaxOdf => "max_odf",
            QualityIndex::AvgOdf => "avg_odf",
            QualityIndex::FlakeOdf => "flake_odf",
            QualityIndex::TriangleParticipationRatio => "triangle_participation_ratio",
            QualityIndex::Size => "size",
        }
    }
}

impl CommunityScore for QualityIndex {
    fn score(&self, graph: &Adjacency, community: &InducedCommunity<'_>) -> Result<f64> {
        match self {
            QualityIndex::NormalizedCut => scoring::normalized_cut(graph, community),
            QualityIndex::InternalEdgeDensity => scoring::internal_edge_density(graph, community),
            QualityIndex::AverageInternalDegree => {
                scoring::average_internal_degree(graph, community)
            }
            QualityIndex::FractionOverMedianDegree => {
                scoring::fraction_over_median_degree(graph, community)
            }
            QualityIndex::Expansion => scoring::expansion(graph, community),
            QualityIndex::CutRatio => scoring::cut_ratio(graph, community),
            QualityIndex::EdgesInside => scoring::edges_inside(graph, community),
            QualityIndex::Conductance => scoring::conductance(graph, community),
            QualityIndex::MaxOdf => scoring::max_odf(graph, community),
            QualityIndex::AvgOdf => scoring::avg_odf(graph, community),
            QualityIndex::FlakeOdf => scoring::flake_odf(graph, community),
            QualityIndex::TriangleParticipationRatio => {
                scoring::triangle_participation_ratio(graph, community)
            }
            QualityIndex::Size => Ok(community.node_count() as f64),
        }
    }
}

/// Score every community with `scorer`.
///
/// With `summary` the scores are reduced to a [`FitnessResult`], which fails
/// with [`Error::EmptyInput`] on an empty partition; otherwise the scores are
/// returned as they are, in partition order.
pub fn quality_indexes<N, E, S>(
    graph: &UnGraph<N, E>,
    communities: &Communities,
    scorer: &S,
    summary: bool,
) -> Result<Fitness>
where
    S: CommunityScore + ?Sized,
{
    let adjacency = Adjacency::from_graph(graph);
    let values = adjacency
        .communities(communities)
        .map(|community| scorer.score(&adjacency, &community))
        .collect::<Result<Vec<f64>>>()?;

    log::trace!(target: LOG_TARGET, "Scored {} communities", values.len());

    if summary {
        Ok(Fitness::Summary(FitnessResult::from_values(&values)?))
    } else {
        Ok(Fitness::Values(values))
    }
}

/// Normalized cut of each community.
pub fn normalized_cut<N, E>(
    graph: &UnGraph<N, E>,
    communities: &Communities,
    summary: bool,
) -> Result<Fitness> {
    quality_indexes(graph, communities, &QualityIndex::NormalizedCut, summary)
}

/// Internal edge density of each community.
pub fn internal_edge_density<N, E>(
    graph: &UnGraph<N, E>,
    communities: &Communities,
    summary: bool,
) -> Result<Fitness> {
    quality_indexes(
        graph,
        communities,
        &QualityIndex::InternalEdgeDensity,
        summary,
    )
}

/// Average internal degree of each community.
pub fn average_internal_degree<N, E>(
    graph: &UnGraph<N, E>,
    communities: &Communities,
    summary: bool,
) -> Result<Fitness> {
    quality_indexes(
        graph,
        communities,
        &QualityIndex::AverageInternalDegree,
        summary,
    )
}

/// Fraction of members above the median internal degree, per community.
pub fn fraction_over_median_degree<N, E>(
    graph: &UnGraph<N, E>,
    communities: &Communities,
    summary: bool,
) -> Result<Fitness> {
    quality_indexes(
        graph,
        communities,
        &QualityIndex::FractionOverMedianDegree,
        summary,
    )
}

/// Expansion of each community.
pub fn expansion<N, E>(
    graph: &UnGraph<N, E>,
    communities: &Communities,
    summary: bool,
) -> Result<Fitness> {
    quality_indexes(graph, communities, &QualityIndex::Expansion, summary)
}

/// Cut ratio of each community.
pub fn cut_ratio<N, E>(
    graph: &UnGraph<N, E>,
    communities: &Communities,
    summary: bool,
) -> Result<Fitness> {
    quality_indexes(graph, communities, &QualityIndex::CutRatio, summary)
}

/// Number of internal edges of each community.
pub fn edges_inside<N, E>(
    graph: &UnGraph<N, E>,
    communities: &Communities,
    summary: bool,
) -> Result<Fitness> {
    quality_indexes(graph, communities, &QualityIndex::EdgesInside, summary)
}

/// Conductance of each community.
pub fn conductance<N, E>(
    graph: &UnGraph<N, E>,
    communities: &Communities,
    summary: bool,
) -> Result<Fitness> {
    quality_indexes(graph, communities, &QualityIndex::Conductance, summary)
}

/// Maximum out-degree fraction of each community.
pub fn max_odf<N, E>(
    graph: &UnGraph<N, E>,
    communities: &Communities,
    summary: bool,
) -> Result<Fitness> {
    quality_indexes(graph, communities, &QualityIndex::MaxOdf, summary)
}

/// Average out-degree fraction of each community.
pub fn avg_odf<N, E>(
    graph: &UnGraph<N, E>,
    communities: &Communities,
    summary: bool,
) -> Result<Fitness> {
    quality_indexes(graph, communities, &QualityIndex::AvgOdf, summary)
}

/// Flake out-degree fraction of each community.
pub fn flake_odf<N, E>(
    graph: &UnGraph<N, E>,
    communities: &Communities,
    summary: bool,
) -> Result<Fitness> {
    quality_indexes(graph, communities, &QualityIndex::FlakeOdf, summary)
}

/// Triangle participation ratio of each community.
pub fn triangle_participation_ratio<N, E>(
    graph: &UnGraph<N, E>,
    communities: &Communities,
    summary: bool,
) -> Result<Fitness> {
    quality_indexes(
        graph,
        communities,
        &QualityIndex::TriangleParticipationRatio,
        summary,
    )
}

/// Size of each community.
pub fn size<N, E>(
    graph: &UnGraph<N, E>,
    communities: &Communities,
    summary: bool,
) -> Result<Fitness> {
    quality_indexes(graph, communities, &QualityIndex::Size, summary)
}
