#[cfg(test)]
#[allow(clippy::unwrap_used, unused_results)]
mod tests {
    use crate::evaluation::{self, QualityIndex};
    use crate::{Communities, Error, Fitness, Result};
    use petgraph::graph::UnGraph;
    use proptest::prelude::*;
    use rand::prelude::*;
    use rand::Rng;
    use std::collections::HashSet;

    fn build_graph(n: usize, pairs: &[(usize, usize)]) -> UnGraph<(), ()> {
        let mut graph = UnGraph::<(), ()>::with_capacity(n, pairs.len());
        let nodes: Vec<_> = (0..n).map(|_| graph.add_node(())).collect();
        let mut seen = HashSet::new();
        for &(a, b) in pairs {
            if a != b && seen.insert((a.min(b), a.max(b))) {
                graph.add_edge(nodes[a], nodes[b], ());
            }
        }
        graph
    }

    /// Modularity straight from its pairwise definition,
    /// (1/2m) Σ_ij [A_ij − k_i·k_j/2m]·δ(c_i, c_j).
    fn pairwise_modularity(graph: &UnGraph<(), ()>, labels: &[usize]) -> f64 {
        let n = graph.node_count();
        let two_m = 2.0 * graph.edge_count() as f64;
        let mut adj = vec![vec![0.0; n]; n];
        for e in graph.raw_edges() {
            let (i, j) = (e.source().index(), e.target().index());
            adj[i][j] += 1.0;
            adj[j][i] += 1.0;
        }
        let degree: Vec<f64> = adj.iter().map(|row| row.iter().sum()).collect();

        let mut q = 0.0;
        for i in 0..n {
            for j in 0..n {
                if labels[i] == labels[j] {
                    q += adj[i][j] - degree[i] * degree[j] / two_m;
                }
            }
        }
        q / two_m
    }

    #[test]
    fn test_ring_scenario() -> Result<()> {
        let graph = build_graph(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let halves = Communities::new(vec![vec![0, 1], vec![2, 3]], "manual");

        assert!(evaluation::newman_girvan_modularity(&graph, &halves)?.abs() < 1e-12);
        assert!(evaluation::modularity_density(&graph, &halves)?.abs() < 1e-12);

        let inside = evaluation::edges_inside(&graph, &halves, false)?;
        assert_eq!(inside, Fitness::Values(vec![1.0, 1.0]));

        let cut = evaluation::cut_ratio(&graph, &halves, true)?;
        let cut = cut.summary().unwrap();
        assert!((cut.mean - 0.5).abs() < 1e-12);
        assert_eq!(cut.std, 0.0);
        Ok(())
    }

    #[test]
    fn test_newman_girvan_matches_pairwise_definition() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let n = rng.random_range(4..20);
            let pairs: Vec<(usize, usize)> = (0..n * 2)
                .map(|_| (rng.random_range(0..n), rng.random_range(0..n)))
                .collect();
            let graph = build_graph(n, &pairs);
            if graph.edge_count() == 0 {
                continue;
            }
            let labels: Vec<usize> = (0..n).map(|_| rng.random_range(0..4)).collect();
            let communities = Communities::from_labels(&labels, "random");

            let q = evaluation::newman_girvan_modularity(&graph, &communities)?;
            assert!((q - pairwise_modularity(&graph, &labels)).abs() < 1e-9);
        }
        Ok(())
    }

    #[test]
    fn test_link_modularity_prefers_split_at_bridge() -> Result<()> {
        let graph = build_graph(
            6,
            &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)],
        );
        let triangles = Communities::new(vec![vec![0, 1, 2], vec![3, 4, 5]], "manual");
        let merged = Communities::new(vec![vec![0, 1, 2, 3, 4, 5]], "manual");

        let split = evaluation::link_modularity(&graph, &triangles)?;
        let whole = evaluation::link_modularity(&graph, &merged)?;
        assert!(whole.abs() < 1e-9);
        assert!(split > whole);
        Ok(())
    }

    #[test]
    fn test_surprise_and_significance_fail_without_edges() {
        let graph = build_graph(6, &[]);
        let communities = Communities::new(vec![vec![0, 1, 2], vec![3, 4, 5]], "manual");

        assert!(matches!(
            evaluation::surprise(&graph, &communities),
            Err(Error::DivisionByZero { .. })
        ));
        assert!(matches!(
            evaluation::significance(&graph, &communities),
            Err(Error::DivisionByZero { .. })
        ));
    }

    /// Erdős-Rényi modularity and modularity density summed by hand, visiting
    /// `groups` in the order given.
    fn er_and_density_by_hand(graph: &UnGraph<(), ()>, groups: &[Vec<usize>]) -> (f64, f64) {
        let n = graph.node_count() as f64;
        let m = graph.edge_count() as f64;
        let mut degree = vec![0usize; graph.node_count()];
        for e in graph.raw_edges() {
            degree[e.source().index()] += 1;
            degree[e.target().index()] += 1;
        }

        let (mut er, mut density) = (0.0, 0.0);
        for group in groups {
            let members: HashSet<usize> = group.iter().copied().collect();
            let mc = graph
                .raw_edges()
                .iter()
                .filter(|e| {
                    members.contains(&e.source().index()) && members.contains(&e.target().index())
                })
                .count() as f64;
            let nc = members.len() as f64;
            let volume: usize = members.iter().map(|&v| degree[v]).sum();
            let out = volume as f64 - 2.0 * mc;

            er += mc - m * nc * (nc - 1.0) / (n * (n - 1.0));
            density += (2.0 * mc / nc - out / nc) / nc;
        }
        (er / m, density)
    }

    #[test]
    fn test_equal_size_communities_in_either_order() -> Result<()> {
        // Triangle {0,1,2} and path {3,4,5} joined by the bridge 2-3.
        let graph = build_graph(6, &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (2, 3)]);
        let forward = Communities::new(vec![vec![0, 1, 2], vec![3, 4, 5]], "manual");
        let backward = Communities::new(vec![vec![3, 4, 5], vec![0, 1, 2]], "manual");
        assert_ne!(forward.communities()[0], backward.communities()[0]);

        let (er, density) = er_and_density_by_hand(&graph, forward.communities());
        for communities in [&forward, &backward] {
            let a = evaluation::erdos_renyi_modularity(&graph, communities)?;
            let b = evaluation::modularity_density(&graph, communities)?;
            assert!((a - er).abs() < 1e-12);
            assert!((b - density).abs() < 1e-12);
        }

        let a = evaluation::surprise(&graph, &forward)?;
        let b = evaluation::surprise(&graph, &backward)?;
        assert!((a - b).abs() < 1e-12);
        let a = evaluation::z_modularity(&graph, &forward)?;
        let b = evaluation::z_modularity(&graph, &backward)?;
        assert!((a - b).abs() < 1e-12);
        Ok(())
    }

    fn graph_and_labels() -> impl Strategy<Value = (usize, Vec<(usize, usize)>, Vec<usize>)> {
        (2usize..14).prop_flat_map(|n| {
            (
                Just(n),
                proptest::collection::vec((0..n, 0..n), 0..40),
                proptest::collection::vec(0usize..4, n),
            )
        })
    }

    proptest! {
        #[test]
        fn summary_is_ordered((n, pairs, labels) in graph_and_labels()) {
            let graph = build_graph(n, &pairs);
            let communities = Communities::from_labels(&labels, "random");

            for index in QualityIndex::ALL {
                let fitness = evaluation::quality_indexes(&graph, &communities, &index, true).unwrap();
                let s = fitness.summary().unwrap();
                prop_assert!(s.min <= s.mean + 1e-9, "{}: {:?}", index.name(), s);
                prop_assert!(s.mean <= s.max + 1e-9, "{}: {:?}", index.name(), s);
                prop_assert!(s.std >= 0.0, "{}: {:?}", index.name(), s);
            }
        }

        #[test]
        fn size_is_community_length((n, pairs, labels) in graph_and_labels()) {
            let graph = build_graph(n, &pairs);
            let communities = Communities::from_labels(&labels, "random");

            let sizes = evaluation::size(&graph, &communities, false).unwrap();
            let expected: Vec<f64> = communities.iter().map(|c| c.len() as f64).collect();
            prop_assert_eq!(sizes, Fitness::Values(expected));
        }

        #[test]
        fn single_community_has_zero_modularity((n, pairs, _labels) in graph_and_labels()) {
            let graph = build_graph(n, &pairs);
            prop_assume!(graph.edge_count() > 0);
            let everyone = Communities::new(vec![(0..n).collect()], "trivial");

            let q = evaluation::newman_girvan_modularity(&graph, &everyone).unwrap();
            prop_assert!(q.abs() < 1e-12);
        }

        #[test]
        fn sums_ignore_community_order((n, pairs, labels) in graph_and_labels(), rotation in 0usize..4) {
            let graph = build_graph(n, &pairs);
            prop_assume!(graph.edge_count() > 0);
            let communities = Communities::from_labels(&labels, "random");
            // Visit the groups in a different order than the partition holds them.
            let mut shuffled = communities.communities().to_vec();
            shuffled.reverse();
            let len = shuffled.len();
            shuffled.rotate_left(rotation % len);
            let (er, density) = er_and_density_by_hand(&graph, &shuffled);

            let a = evaluation::erdos_renyi_modularity(&graph, &communities).unwrap();
            prop_assert!((a - er).abs() < 1e-9);

            let b = evaluation::modularity_density(&graph, &communities).unwrap();
            prop_assert!((b - density).abs() < 1e-9);
        }
    }
}
