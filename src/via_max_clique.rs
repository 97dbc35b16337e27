//! Exact minimum vertex cover of a connected component, found as the
//! complement of a maximum independent set. An independent set of the graph
//! is a clique of the complement graph, so the search below grows cliques of
//! the complement level by level.

use crate::cust_error::PruneError;
use crate::graph::RelGraph;
use crate::sample::SampleId;

/// Computes an exact minimum vertex cover of `component`.
///
/// The search is breadth-first and level-synchronous over node-index
/// subsets: level 0 holds every singleton; each round extends every
/// candidate by every index above its maximum that is non-adjacent to all
/// current members, which preserves independence. When a round produces no
/// successor, the first candidate of the last non-empty level is a maximum
/// independent set, and its complement within the component's node list is
/// a minimum cover. Node indices follow the component's first-appearance
/// order, so a fixed input always yields the same cover; beyond that
/// reproducibility, no particular choice among equally small covers is
/// promised.
///
/// Worst case exponential in component size. Real relatedness clusters are
/// expected to stay small; `limit` fails fast on components above the given
/// node count before any search work is done.
pub fn min_vertex_cover(
    component: &RelGraph,
    limit: Option<usize>,
) -> Result<Vec<SampleId>, PruneError> {
    let nodes: Vec<&SampleId> = component.nodes().collect();
    let n = nodes.len();
    if let Some(limit) = limit {
        if n > limit {
            return Err(PruneError::ComponentTooLarge { found: n, limit });
        }
    }
    if n == 0 {
        return Ok(Vec::new());
    }
    let adjacent = |i: usize, j: usize| {
        component
            .neighbors(nodes[i])
            .map_or(false, |neighbors| neighbors.contains(nodes[j]))
    };
    let mut cliques: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
    let mut maximum = cliques[0].clone();
    loop {
        let mut next = Vec::new();
        for clique in &cliques {
            let top = *clique.last().expect("candidates are never empty");
            for i in (top + 1)..n {
                if clique.iter().all(|j| !adjacent(*j, i)) {
                    let mut grown = clique.clone();
                    grown.push(i);
                    next.push(grown);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        maximum = next[0].clone();
        cliques = next;
    }
    let mut keep = vec![false; n];
    for i in &maximum {
        keep[*i] = true;
    }
    Ok(nodes
        .iter()
        .enumerate()
        .filter(|(i, _)| !keep[*i])
        .map(|(_, id)| (*id).clone())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{RelatednessRecord, SampleId};

    fn component(edges: &[(&str, &str)]) -> RelGraph {
        let records: Vec<RelatednessRecord> = edges
            .iter()
            .map(|(a, b)| RelatednessRecord {
                a: SampleId::new("F", *a),
                b: SampleId::new("F", *b),
                category: None,
            })
            .collect();
        RelGraph::from_records(&records)
    }

    fn is_cover(graph: &RelGraph, cover: &[SampleId]) -> bool {
        graph
            .edges()
            .all(|(a, b)| cover.contains(a) || cover.contains(b))
    }

    /// Smallest cover size by exhaustive subset search, usable up to roughly
    /// 8 nodes.
    fn brute_force_minimum(graph: &RelGraph) -> usize {
        let nodes: Vec<SampleId> = graph.nodes().cloned().collect();
        let n = nodes.len();
        (0..1u32 << n)
            .filter(|mask| {
                let subset: Vec<SampleId> = (0..n)
                    .filter(|i| mask & (1 << i) != 0)
                    .map(|i| nodes[i].clone())
                    .collect();
                is_cover(graph, &subset)
            })
            .map(|mask| mask.count_ones() as usize)
            .min()
            .expect("the full node set always covers")
    }

    #[test]
    fn empty_test() {
        let cover = min_vertex_cover(&RelGraph::new(), None).unwrap();
        assert!(cover.is_empty());
    }

    #[test]
    fn single_edge_test() {
        let graph = component(&[("A", "B")]);
        let cover = min_vertex_cover(&graph, None).unwrap();
        assert_eq!(cover.len(), 1);
        assert!(is_cover(&graph, &cover));
    }

    #[test]
    fn path_test() {
        let graph = component(&[("A", "B"), ("B", "C")]);
        let cover = min_vertex_cover(&graph, None).unwrap();
        assert_eq!(cover, vec![SampleId::new("F", "B")]);
    }

    #[test]
    fn triangle_test() {
        let graph = component(&[("A", "B"), ("B", "C"), ("A", "C")]);
        let cover = min_vertex_cover(&graph, None).unwrap();
        assert_eq!(cover.len(), 2);
        assert!(is_cover(&graph, &cover));
    }

    #[test]
    fn star_test() {
        let graph = component(&[("M", "A"), ("M", "B"), ("M", "C"), ("M", "D")]);
        let cover = min_vertex_cover(&graph, None).unwrap();
        assert_eq!(cover, vec![SampleId::new("F", "M")]);
    }

    #[test]
    fn exact_on_small_fixtures_test() {
        // A triangle sharing one node with a 4-clique, plus a pendant edge.
        let graph = component(&[
            ("A", "B"),
            ("B", "C"),
            ("A", "C"),
            ("C", "D"),
            ("C", "E"),
            ("C", "F"),
            ("D", "E"),
            ("D", "F"),
            ("E", "F"),
            ("F", "G"),
        ]);
        let cover = min_vertex_cover(&graph, None).unwrap();
        assert!(is_cover(&graph, &cover));
        assert_eq!(cover.len(), brute_force_minimum(&graph));
        // No strict subset still covers.
        for skip in 0..cover.len() {
            let smaller: Vec<SampleId> = cover
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, id)| id.clone())
                .collect();
            assert!(!is_cover(&graph, &smaller));
        }
    }

    #[test]
    fn reproducible_test() {
        let graph = component(&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")]);
        let first = min_vertex_cover(&graph, None).unwrap();
        let second = min_vertex_cover(&graph, None).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn node_ceiling_test() {
        let graph = component(&[("A", "B"), ("B", "C"), ("A", "C")]);
        assert!(matches!(
            min_vertex_cover(&graph, Some(2)),
            Err(PruneError::ComponentTooLarge { found: 3, limit: 2 })
        ));
        assert!(min_vertex_cover(&graph, Some(3)).is_ok());
    }
}
