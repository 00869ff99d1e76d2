//! Petgraph operations for package dependency analysis.
//!
//! This module builds the package-level dependency graph from resolved
//! package dependency sets and enumerates its circular dependencies.
//!
//! ## Design
//!
//! - Resolved `Package` dependency sets are the source of truth
//! - Petgraph holds the graph for the duration of one analysis pass
//! - Cycles are normalized values, so repeated discoveries collapse
//!
//! ## Operations
//!
//! | Operation | Algorithm |
//! |-----------|-----------|
//! | Cycle enumeration | Trace-based DFS rooted at every package |
//! | Cycle identity | Rotation to the smallest package name |

mod search;
mod types;

pub use types::DependencyCycle;

pub(crate) use search::PackageGraph;
