//! The partition object scored by every metric.
//!
//! A [`Communities`] value is what a detection algorithm hands to the
//! evaluation pipeline: an ordered list of node subsets plus the name and
//! parameters of the method that produced it.
//!
//! Nothing here enforces a partition in the strict sense. Subsets may overlap
//! and may leave nodes uncovered; [`Communities::is_disjoint`] and
//! [`Communities::coverage`] report on this but no metric calls them.

use petgraph::graph::UnGraph;
use std::collections::{BTreeMap, HashMap, HashSet};

/// A parameter value of the method that produced a partition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Parameter {
    /// Integer parameter.
    Int(i64),
    /// Floating-point parameter.
    Float(f64),
    /// Free-form parameter (never shown by [`Communities::description`]).
    Text(String),
    /// Parameter declared without a value.
    Unset,
}

impl From<f64> for Parameter {
    fn from(v: f64) -> Self {
        Parameter::Float(v)
    }
}

impl From<i64> for Parameter {
    fn from(v: i64) -> Self {
        Parameter::Int(v)
    }
}

impl From<&str> for Parameter {
    fn from(v: &str) -> Self {
        Parameter::Text(v.to_string())
    }
}

/// An ordered collection of node subsets produced by a detection method.
///
/// Nodes are identified by `NodeIndex::index()` of the scored graph.
/// Subsets are kept sorted by size, largest first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Communities {
    communities: Vec<Vec<usize>>,
    method_name: String,
    method_parameters: BTreeMap<String, Parameter>,
    overlap: bool,
    node_coverage: f64,
}

impl Communities {
    /// Wrap a list of node subsets.
    ///
    /// The subsets are reordered by decreasing size; equal sizes keep their
    /// input order.
    pub fn new(mut communities: Vec<Vec<usize>>, method_name: impl Into<String>) -> Self {
        communities.sort_by(|a, b| b.len().cmp(&a.len()));
        Self {
            communities,
            method_name: method_name.into(),
            method_parameters: BTreeMap::new(),
            overlap: false,
            node_coverage: 1.0,
        }
    }

    /// Build communities from a label vector, `labels[node] = community id`.
    ///
    /// This is the output format of the usual detection algorithms. Labels
    /// need not be consecutive.
    pub fn from_labels(labels: &[usize], method_name: impl Into<String>) -> Self {
        let mut slot: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (node, &label) in labels.iter().enumerate() {
            let idx = *slot.entry(label).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[idx].push(node);
        }
        Self::new(groups, method_name)
    }

    /// Record a parameter of the producing method.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Parameter>) -> Self {
        let _ = self.method_parameters.insert(name.into(), value.into());
        self
    }

    /// Mark the partition as overlapping.
    pub fn with_overlap(mut self, overlap: bool) -> Self {
        self.overlap = overlap;
        self
    }

    /// Set the reported node coverage.
    pub fn with_node_coverage(mut self, coverage: f64) -> Self {
        self.node_coverage = coverage;
        self
    }

    /// The node subsets, largest first.
    pub fn communities(&self) -> &[Vec<usize>] {
        &self.communities
    }

    /// Number of communities.
    pub fn len(&self) -> usize {
        self.communities.len()
    }

    /// True if there are no communities.
    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    /// Iterate over the node subsets.
    pub fn iter(&self) -> std::slice::Iter<'_, Vec<usize>> {
        self.communities.iter()
    }

    /// Name of the detection method.
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Parameters of the detection method.
    pub fn method_parameters(&self) -> &BTreeMap<String, Parameter> {
        &self.method_parameters
    }

    /// Whether the producing method allows overlapping communities.
    pub fn overlap(&self) -> bool {
        self.overlap
    }

    /// Reported node coverage.
    pub fn node_coverage(&self) -> f64 {
        self.node_coverage
    }

    /// Map each node to the position of its community.
    ///
    /// A node listed in several communities maps to the last one.
    pub fn node_assignment(&self) -> HashMap<usize, usize> {
        let mut assignment = HashMap::new();
        for (cid, community) in self.communities.iter().enumerate() {
            for &node in community {
                let _ = assignment.insert(node, cid);
            }
        }
        assignment
    }

    /// True if no node appears in more than one community.
    pub fn is_disjoint(&self) -> bool {
        let mut seen = HashSet::new();
        self.communities
            .iter()
            .all(|c| c.iter().collect::<HashSet<_>>().into_iter().all(|&n| seen.insert(n)))
    }

    /// Fraction of the graph's nodes that belong to at least one community.
    pub fn coverage<N, E>(&self, graph: &UnGraph<N, E>) -> f64 {
        let n = graph.node_count();
        if n == 0 {
            return 0.0;
        }
        let covered: HashSet<usize> = self
            .communities
            .iter()
            .flatten()
            .copied()
            .filter(|&v| v < n)
            .collect();
        covered.len() as f64 / n as f64
    }

    /// Method name with its numeric parameters, e.g. `louvain(resolution:1.000)`.
    ///
    /// `parameters_to_display` restricts which parameters are shown; unknown
    /// names are skipped. Without it, all parameters are shown as long as at
    /// least one has a value. Text parameters are never printed.
    pub fn description(&self, parameters_to_display: Option<&[&str]>, precision: usize) -> String {
        let mut description = self.method_name.clone();

        let names: Vec<&str> = match parameters_to_display {
            Some(names) => names.to_vec(),
            None => {
                if self
                    .method_parameters
                    .values()
                    .all(|v| matches!(v, Parameter::Unset))
                {
                    return description;
                }
                self.method_parameters.keys().map(String::as_str).collect()
            }
        };

        let shown: Vec<String> = names
            .iter()
            .filter_map(|&name| match self.method_parameters.get(name)? {
                Parameter::Float(v) => Some(format!("{name}:{v:.precision$}")),
                Parameter::Int(v) => Some(format!("{name}:{v}")),
                Parameter::Text(_) | Parameter::Unset => None,
            })
            .collect();

        description.push('(');
        description.push_str(&shown.join(", "));
        description.push(')');
        description
    }

    /// JSON representation: communities, algorithm, params, overlap, coverage.
    ///
    /// A partition carries no separate "no parameters" state, so an empty
    /// parameter map is written as `"params": null` rather than `{}`. Readers
    /// cannot tell the two apart.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> crate::error::Result<String> {
        let params = if self.method_parameters.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::to_value(&self.method_parameters)
                .map_err(|e| crate::error::Error::Other(e.to_string()))?
        };
        let value = serde_json::json!({
            "communities": self.communities,
            "algorithm": self.method_name,
            "params": params,
            "overlap": self.overlap,
            "coverage": self.node_coverage,
        });
        serde_json::to_string(&value).map_err(|e| crate::error::Error::Other(e.to_string()))
    }
}

impl<'a> IntoIterator for &'a Communities {
    type Item = &'a Vec<usize>;
    type IntoIter = std::slice::Iter<'a, Vec<usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.communities.iter()
    }
}
