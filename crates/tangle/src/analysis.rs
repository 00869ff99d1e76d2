//! Analysis results for an analyzed catalog.
//!
//! An [`Analysis`] is built in one piece from the set of discovered cycles
//! and swapped into the catalog whole, so a re-run never leaves indices from
//! two different passes side by side.

use std::collections::{BTreeSet, HashMap};

use crate::graph::DependencyCycle;
use crate::types::Dependency;

static NO_CYCLES: BTreeSet<DependencyCycle> = BTreeSet::new();
static NO_SEGMENTS: BTreeSet<Dependency> = BTreeSet::new();

/// Cycles found in a catalog, with per-package indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    cycles: BTreeSet<DependencyCycle>,
    cycle_segments: BTreeSet<Dependency>,
    package_cycles: HashMap<String, BTreeSet<DependencyCycle>>,
    package_segments: HashMap<String, BTreeSet<Dependency>>,
    truncated: bool,
}

impl Analysis {
    /// Build the indices for a set of cycles.
    ///
    /// Every package on a cycle records that cycle and all of its segments;
    /// the global segment set is the union over all cycles.
    pub(crate) fn from_cycles(cycles: BTreeSet<DependencyCycle>, truncated: bool) -> Self {
        let mut cycle_segments = BTreeSet::new();
        let mut package_cycles: HashMap<String, BTreeSet<DependencyCycle>> = HashMap::new();
        let mut package_segments: HashMap<String, BTreeSet<Dependency>> = HashMap::new();

        for cycle in &cycles {
            for package in cycle.packages() {
                package_cycles
                    .entry(package.clone())
                    .or_default()
                    .insert(cycle.clone());
                package_segments
                    .entry(package.clone())
                    .or_default()
                    .extend(cycle.segments().iter().cloned());
            }
            cycle_segments.extend(cycle.segments().iter().cloned());
        }

        Self {
            cycles,
            cycle_segments,
            package_cycles,
            package_segments,
            truncated,
        }
    }

    /// Every distinct cycle.
    #[must_use]
    pub fn cycles(&self) -> &BTreeSet<DependencyCycle> {
        &self.cycles
    }

    /// Union of the segments of every cycle.
    #[must_use]
    pub fn cycle_segments(&self) -> &BTreeSet<Dependency> {
        &self.cycle_segments
    }

    /// Cycles passing through the named package; empty if none or unknown.
    #[must_use]
    pub fn package_cycles(&self, package: &str) -> &BTreeSet<DependencyCycle> {
        self.package_cycles.get(package).unwrap_or(&NO_CYCLES)
    }

    /// Segments of the cycles passing through the named package.
    #[must_use]
    pub fn package_cycle_segments(&self, package: &str) -> &BTreeSet<Dependency> {
        self.package_segments.get(package).unwrap_or(&NO_SEGMENTS)
    }

    /// Whether the search depth budget cut the search short.
    ///
    /// When `true` the cycle set may be incomplete.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}
