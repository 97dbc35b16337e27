//! Orchestration of the removal strategies: either one cover over the whole
//! relatedness graph, or the three-phase policy that only ever removes a
//! case when two cases are related to each other.

use crate::cust_error::PruneError;
use crate::graph::RelGraph;
use crate::progress::{Phase, Progress};
use crate::sample::{PhenotypeTable, RelatednessRecord, SampleId};
use crate::via_max_clique::min_vertex_cover;
use fxhash::FxHashSet;

/// How the removal set is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Treat every flagged pair alike and cover the whole graph at once.
    SinglePass,
    /// Keep as many cases as possible first, then as many controls as
    /// possible.
    CasesFirst,
}

/// A configured removal run.
#[derive(Debug, Clone, Copy)]
pub struct RemovalPlan {
    pub strategy: Strategy,
    /// Fail fast on any connected component above this node count instead of
    /// risking an unbounded exhaustive search.
    pub max_component_nodes: Option<usize>,
}

impl Default for RemovalPlan {
    fn default() -> Self {
        RemovalPlan {
            strategy: Strategy::CasesFirst,
            max_component_nodes: None,
        }
    }
}

impl RemovalPlan {
    /// Computes the smallest set of samples whose removal erases every
    /// flagged relationship.
    ///
    /// `phenotypes` is required by `Strategy::CasesFirst` and ignored
    /// otherwise; requesting case priority without it fails before any graph
    /// work begins. With case priority the returned sequence lists all
    /// removed cases before all removed controls. Identical input always
    /// yields an identical sequence.
    pub fn run(
        &self,
        records: &[RelatednessRecord],
        phenotypes: Option<&PhenotypeTable>,
        progress: &mut dyn Progress,
    ) -> Result<Vec<SampleId>, PruneError> {
        match self.strategy {
            Strategy::SinglePass => self.single_pass(records, progress),
            Strategy::CasesFirst => {
                let table = phenotypes.ok_or(PruneError::MissingPhenotypes)?;
                self.cases_first(records, table, progress)
            }
        }
    }

    /// Decomposes `graph` and unions the minimum covers of its components.
    fn cover_components(
        &self,
        graph: &RelGraph,
        phase: Phase,
        progress: &mut dyn Progress,
    ) -> Result<Vec<SampleId>, PruneError> {
        progress.phase_started(phase);
        let components = graph.split_into_connected();
        progress.components_found(components.len());
        let mut removed = Vec::new();
        for (index, component) in components.iter().enumerate() {
            progress.component_started(index, components.len(), component.num_nodes());
            removed.extend(min_vertex_cover(component, self.max_component_nodes)?);
        }
        Ok(removed)
    }

    fn single_pass(
        &self,
        records: &[RelatednessRecord],
        progress: &mut dyn Progress,
    ) -> Result<Vec<SampleId>, PruneError> {
        let graph = RelGraph::from_records(records);
        self.cover_components(&graph, Phase::SinglePass, progress)
    }

    fn cases_first(
        &self,
        records: &[RelatednessRecord],
        table: &PhenotypeTable,
        progress: &mut dyn Progress,
    ) -> Result<Vec<SampleId>, PruneError> {
        let (case_graph, mixed, mut control_graph) = RelGraph::partition_records(records)?;

        // Phase 1: the case-case graph, the only place a case may be removed.
        let cases = self.cover_components(&case_graph, Phase::CaseCase, progress)?;
        let removed_cases: FxHashSet<SampleId> = cases.iter().cloned().collect();

        // Phase 2: a mixed pair whose case endpoint is already gone needs
        // nothing more; every other pair loses its control endpoint.
        progress.phase_started(Phase::CaseControl);
        let mut controls: Vec<SampleId> = Vec::new();
        let mut taken: FxHashSet<SampleId> = FxHashSet::default();
        for pair in &mixed {
            let (case, control) = pair.resolve(table)?;
            if removed_cases.contains(&case) {
                continue;
            }
            if taken.insert(control.clone()) {
                controls.push(control);
            }
        }

        // Phase 3: the control-control graph, pruned of the controls that
        // already fell in phase 2. The phase-3 covers cannot repeat them.
        control_graph.delete_nodes(&controls);
        let remaining = self.cover_components(&control_graph, Phase::ControlControl, progress)?;
        controls.extend(remaining);

        let mut removed = cases;
        removed.extend(controls);
        Ok(removed)
    }
}
