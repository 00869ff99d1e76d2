//! Depth-first circular dependency search.
//!
//! Every package is used as a search root. Within one root's traversal a
//! `searched` set stops a package's outgoing edges from being expanded twice,
//! while the `trace` (the path from the root to the current package) detects
//! loops: reaching a package already on the trace closes a cycle.
//!
//! The same loop is usually found from several roots; [`DependencyCycle`]
//! normalizes it so the global set keeps one entry per loop.
//!
//! ## Edge Direction
//!
//! Edges point from **dependent -> dependency**: `a -> b` means package `a`
//! imports something from package `b`.

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::types::DependencyCycle;

/// Package-level dependency graph.
///
/// Nodes are inserted in name order, so node index order equals name order
/// and traversal is deterministic.
#[derive(Debug, Default)]
pub(crate) struct PackageGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

/// Result of one full search across all roots.
#[derive(Debug, Default)]
pub(crate) struct SearchOutcome {
    /// Every distinct loop found.
    pub cycles: BTreeSet<DependencyCycle>,
    /// Whether the depth budget cut any traversal short.
    pub truncated: bool,
}

impl PackageGraph {
    /// Build the graph from `(package, dependencies)` pairs.
    ///
    /// Dependency names that are not themselves listed still become nodes.
    pub(crate) fn from_dependencies<'a, I>(packages: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a BTreeSet<String>)>,
    {
        let adjacency: BTreeMap<&str, &BTreeSet<String>> = packages.into_iter().collect();

        let mut names: BTreeSet<&str> = adjacency.keys().copied().collect();
        names.extend(adjacency.values().flat_map(|deps| deps.iter().map(String::as_str)));

        let mut graph = DiGraph::with_capacity(names.len(), 0);
        let mut node_map = HashMap::with_capacity(names.len());
        for name in names {
            let node = graph.add_node(name.to_string());
            node_map.insert(name.to_string(), node);
        }

        for (package, dependencies) in &adjacency {
            let from = node_map[*package];
            for dependency in *dependencies {
                graph.add_edge(from, node_map[dependency.as_str()], ());
            }
        }

        Self { graph, node_map }
    }

    pub(crate) fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Search for cycles from every package in turn.
    ///
    /// `max_depth` bounds the trace length; `None` searches without limit.
    pub(crate) fn find_cycles(&self, max_depth: Option<usize>) -> SearchOutcome {
        let mut search = CycleSearch {
            graph: &self.graph,
            max_depth,
            outcome: SearchOutcome::default(),
        };

        for root in self.graph.node_indices() {
            let mut trace = vec![root];
            let mut searched = HashSet::new();
            search.visit(root, &mut trace, &mut searched);
        }

        search.outcome
    }
}

struct CycleSearch<'g> {
    graph: &'g DiGraph<String, ()>,
    max_depth: Option<usize>,
    outcome: SearchOutcome,
}

impl CycleSearch<'_> {
    fn visit(
        &mut self,
        node: NodeIndex,
        trace: &mut Vec<NodeIndex>,
        searched: &mut HashSet<NodeIndex>,
    ) {
        if !searched.insert(node) {
            return;
        }

        let mut dependencies: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        dependencies.sort_unstable();
        dependencies.dedup();

        for dependency in dependencies {
            if trace.contains(&dependency) {
                self.record_cycle(trace, dependency);
            } else if searched.contains(&dependency) {
                // Already expanded from this root; nothing new below it.
            } else if self.max_depth.is_some_and(|max| trace.len() >= max) {
                self.outcome.truncated = true;
            } else {
                trace.push(dependency);
                self.visit(dependency, trace, searched);
                trace.pop();
            }
        }
    }

    fn record_cycle(&mut self, trace: &[NodeIndex], revisited: NodeIndex) {
        let names: Vec<&str> = trace.iter().map(|&n| self.graph[n].as_str()).collect();
        if let Some(cycle) = DependencyCycle::new(names.as_slice(), &self.graph[revisited]) {
            self.outcome.cycles.insert(cycle);
        }
    }
}
