//! Types for graph operations.

use std::collections::BTreeSet;
use std::fmt;

use crate::types::Dependency;

/// A closed loop of package dependencies.
///
/// Built from a search trace (the packages visited from a search root) and
/// the package about to be revisited. Only the loop itself is kept: the
/// trace prefix leading into it is dropped and the loop is rotated so that
/// its lexicographically smallest package comes first. The same loop
/// therefore compares equal no matter which root or trace discovered it.
///
/// The loop `a → b → c → a` is stored as `[a, b, c]`; the closing edge
/// back to `a` is implied and included in [`Self::segments`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyCycle {
    cycle: Vec<String>,
    segments: BTreeSet<Dependency>,
}

impl DependencyCycle {
    /// Create a cycle from a search trace and the revisited package.
    ///
    /// Returns `None` if `revisited` does not appear on `trace`.
    #[must_use]
    pub fn new<S: AsRef<str>>(trace: &[S], revisited: &str) -> Option<Self> {
        let start = trace.iter().position(|p| p.as_ref() == revisited)?;

        let mut cycle: Vec<String> = trace[start..]
            .iter()
            .map(|p| p.as_ref().to_string())
            .collect();

        if let Some(lowest) = cycle
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.cmp(b))
            .map(|(i, _)| i)
        {
            cycle.rotate_left(lowest);
        }

        let segments = cycle
            .iter()
            .zip(cycle.iter().cycle().skip(1))
            .map(|(from, to)| Dependency::between_packages(from.as_str(), to.as_str()))
            .collect();

        Some(Self { cycle, segments })
    }

    /// Packages on the loop, in dependency order, smallest name first.
    #[must_use]
    pub fn packages(&self) -> &[String] {
        &self.cycle
    }

    /// The package-to-package edges that close this loop.
    #[must_use]
    pub fn segments(&self) -> &BTreeSet<Dependency> {
        &self.segments
    }

    /// Number of packages on the loop.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cycle.len()
    }

    /// Always `false`; a cycle holds at least the revisited package.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cycle.is_empty()
    }

    /// Returns `true` if the named package lies on this loop.
    #[must_use]
    pub fn contains(&self, package: &str) -> bool {
        self.cycle.iter().any(|p| p == package)
    }
}

impl fmt::Display for DependencyCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for package in &self.cycle {
            write!(f, "{package} → ")?;
        }
        match self.cycle.first() {
            Some(first) => f.write_str(first),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_trace_prefix_before_revisited_package() {
        let cycle = DependencyCycle::new(&["root", "a", "b", "c"], "a").unwrap();

        assert_eq!(cycle.packages(), ["a", "b", "c"]);
        assert!(!cycle.contains("root"));
    }

    #[test]
    fn rotations_of_one_loop_are_equal() {
        let from_a = DependencyCycle::new(&["a", "b", "c"], "a").unwrap();
        let from_b = DependencyCycle::new(&["b", "c", "a"], "b").unwrap();
        let from_c = DependencyCycle::new(&["x", "c", "a", "b"], "c").unwrap();

        assert_eq!(from_a, from_b);
        assert_eq!(from_b, from_c);
        assert_eq!(BTreeSet::from([from_a, from_b, from_c]).len(), 1);
    }

    #[test]
    fn opposite_directions_are_different_cycles() {
        let forward = DependencyCycle::new(&["a", "b", "c"], "a").unwrap();
        let backward = DependencyCycle::new(&["a", "c", "b"], "a").unwrap();

        assert_ne!(forward, backward);
    }

    #[test]
    fn segments_include_closing_edge() {
        let cycle = DependencyCycle::new(&["b", "c", "a"], "b").unwrap();

        let expected = BTreeSet::from([
            Dependency::between_packages("a", "b"),
            Dependency::between_packages("b", "c"),
            Dependency::between_packages("c", "a"),
        ]);
        assert_eq!(cycle.segments(), &expected);
    }

    #[test]
    fn single_package_cycle_has_self_segment() {
        let cycle = DependencyCycle::new(&["a"], "a").unwrap();

        assert_eq!(cycle.len(), 1);
        assert_eq!(
            cycle.segments(),
            &BTreeSet::from([Dependency::between_packages("a", "a")])
        );
    }

    #[test]
    fn revisited_package_off_trace_is_rejected() {
        assert!(DependencyCycle::new(&["a", "b"], "z").is_none());
        assert!(DependencyCycle::new::<&str>(&[], "a").is_none());
    }

    #[test]
    fn display_closes_the_loop() {
        let cycle = DependencyCycle::new(&["b", "a"], "b").unwrap();
        assert_eq!(cycle.to_string(), "a → b → a");
    }
}
