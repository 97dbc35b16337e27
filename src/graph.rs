//! Implementation of a simple, undirected relatedness graph with the
//! construction, decomposition and removal operations the pruning phases
//! need.

use crate::cust_error::ImportError;
use crate::sample::{MixedPair, PairCategory, RelatednessRecord, SampleId};
use fxhash::{FxHashMap, FxHashSet};

/// A simple undirected graph over sample identities.
///
/// Adjacency is symmetric and free of self-loops. Next to the adjacency map
/// the graph carries the order in which nodes first appeared; all enumeration
/// (decomposition, solver node ordering) follows that order, which keeps runs
/// on identical input reproducible. Deleted nodes stay deleted; reinsertion
/// is not supported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelGraph {
    adj: FxHashMap<SampleId, FxHashSet<SampleId>>,
    order: Vec<SampleId>,
}

// Static functions
impl RelGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an `Iterator` over all nodes that have not been deleted, in
    /// first-appearance order.
    pub fn nodes(&self) -> impl Iterator<Item = &SampleId> + '_ {
        self.order.iter().filter(move |id| self.adj.contains_key(*id))
    }

    /// Returns the number of nodes of `self`.
    pub fn num_nodes(&self) -> usize {
        self.adj.len()
    }

    /// Returns the neighborhood of `node`, or `None` if `node` is not present.
    pub fn neighbors(&self, node: &SampleId) -> Option<&FxHashSet<SampleId>> {
        self.adj.get(node)
    }

    /// Checks if `node` is present.
    pub fn contains(&self, node: &SampleId) -> bool {
        self.adj.contains_key(node)
    }

    /// Checks if `self` holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Returns an iterator over all edges, each reported once.
    pub fn edges(&self) -> impl Iterator<Item = (&SampleId, &SampleId)> + '_ {
        self.order
            .iter()
            .filter_map(move |a| self.adj.get(a).map(|neighbors| (a, neighbors)))
            .flat_map(|(a, neighbors)| {
                neighbors
                    .iter()
                    .filter(move |b| a < *b)
                    .map(move |b| (a, b))
            })
    }

    /// Returns the number of edges of `self`.
    pub fn num_edges(&self) -> usize {
        self.edges().count()
    }

    /// Returns a set of all nodes reachable from `node`, including `node`.
    pub fn reachable(&self, node: &SampleId) -> FxHashSet<SampleId> {
        let mut reached = FxHashSet::default();
        let mut queue = vec![node.clone()];
        while let Some(next) = queue.pop() {
            if reached.contains(&next) {
                continue;
            }
            queue.extend(self.adj.get(&next).into_iter().flatten().cloned());
            reached.insert(next);
        }
        reached
    }

    /// Splits `self` into its connected components.
    ///
    /// The node sets of the components partition the nodes of `self`; each
    /// component keeps the full neighborhood of its members and the parent's
    /// enumeration order restricted to them.
    pub fn split_into_connected(&self) -> Vec<Self> {
        let mut components = Vec::new();
        let mut marked: FxHashSet<SampleId> = FxHashSet::default();
        for node in self.nodes() {
            if marked.contains(node) {
                continue;
            }
            let members = self.reachable(node);
            let mut component = RelGraph::new();
            for id in self.nodes() {
                if members.contains(id) {
                    component.order.push(id.clone());
                    component.adj.insert(id.clone(), self.adj[id].clone());
                }
            }
            marked.extend(members);
            components.push(component);
        }
        components
    }
}

// Dynamic functions
impl RelGraph {
    /// Inserts the undirected edge between `a` and `b`, registering either
    /// node on first appearance.
    pub fn add_edge(&mut self, a: &SampleId, b: &SampleId) {
        debug_assert_ne!(a, b);
        self.touch(a);
        self.touch(b);
        self.adj
            .get_mut(a)
            .expect("`a` was just registered")
            .insert(b.clone());
        self.adj
            .get_mut(b)
            .expect("`b` was just registered")
            .insert(a.clone());
    }

    fn touch(&mut self, id: &SampleId) {
        if !self.adj.contains_key(id) {
            self.order.push(id.clone());
            self.adj.insert(id.clone(), FxHashSet::default());
        }
    }

    /// Removes all nodes in `nodes` from the graph, stripping them from every
    /// remaining neighborhood. A node whose neighborhood runs empty carries
    /// no remaining constraint and is dropped as well.
    ///
    /// Removing nodes that are already absent is a no-op.
    pub fn delete_nodes(&mut self, nodes: &[SampleId]) {
        for node in nodes {
            if let Some(neighbors) = self.adj.remove(node) {
                for other in neighbors {
                    if let Some(nn) = self.adj.get_mut(&other) {
                        nn.remove(node);
                        if nn.is_empty() {
                            self.adj.remove(&other);
                        }
                    }
                }
            }
        }
    }
}

impl RelGraph {
    /// Builds one graph over all flagged pairs, both directions of every
    /// edge. Pair categories are ignored.
    pub fn from_records(records: &[RelatednessRecord]) -> Self {
        let mut graph = RelGraph::new();
        for record in records {
            graph.add_edge(&record.a, &record.b);
        }
        graph
    }

    /// Routes every record by its pair category into the case-case graph, the
    /// mixed-pair list or the control-control graph.
    ///
    /// Each record contributes exactly one edge to exactly one of the three
    /// structures. A record without a category fails the whole build; no
    /// partial result is returned.
    pub fn partition_records(
        records: &[RelatednessRecord],
    ) -> Result<(Self, Vec<MixedPair>, Self), ImportError> {
        let mut cases = RelGraph::new();
        let mut mixed = Vec::new();
        let mut controls = RelGraph::new();
        for record in records {
            match record.category {
                Some(PairCategory::BothCases) => cases.add_edge(&record.a, &record.b),
                Some(PairCategory::Mixed) => mixed.push(MixedPair {
                    a: record.a.clone(),
                    b: record.b.clone(),
                }),
                Some(PairCategory::BothControls) => controls.add_edge(&record.a, &record.b),
                None => {
                    return Err(ImportError::MissingCategory(
                        record.a.clone(),
                        record.b.clone(),
                    ))
                }
            }
        }
        Ok((cases, mixed, controls))
    }
}
