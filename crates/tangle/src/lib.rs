//! # Tangle: Package Dependency and Cycle Analysis
//!
//! Tangle reads a catalog of `package`/`import` pragmas extracted from source
//! files, resolves the imports against the catalog itself, and enumerates
//! every circular dependency between packages.
//!
//! ## Design Philosophy
//!
//! - **Trust the catalog** - Pragmas are taken line by line; no source parsing
//! - **Inside the catalog only** - Imports of anything not in the catalog are ignored
//! - **Enumerate, don't judge** - Every cycle is reported; none are ranked or pruned
//! - **Library first** - The `tangle` binary and its reports use the same query surface
//!
//! ## Quick Start
//!
//! ```no_run
//! use tangle::Catalog;
//!
//! let mut catalog = Catalog::new("target/catalogs/onos");
//!
//! // Reads target/catalogs/onos.db
//! catalog.load()?;
//! catalog.analyze();
//!
//! println!("{}", catalog.summary());
//! for cycle in catalog.cycles() {
//!     println!("{cycle}");
//! }
//! # Ok::<(), tangle::Error>(())
//! ```

mod analysis;
mod config;
mod error;
mod graph;
mod loader;
mod resolver;
mod types;

pub mod report;

pub use analysis::Analysis;
pub use config::{
    AnalysisConfig, DEFAULT_CATALOG_EXTENSION, DEFAULT_DETAILS_EXTENSION, DEFAULT_HTML_EXTENSION,
};
pub use error::{Error, Result};
pub use graph::DependencyCycle;
pub use loader::{LoadStats, Pragma, parse_line};
pub use resolver::WILDCARD_SUFFIX;
pub use types::{CatalogSummary, Dependency, Entity, Package, SourceUnit};

use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use graph::PackageGraph;
use loader::Entities;
use tracing::{debug, warn};

/// A package and source catalog with its dependency analysis.
///
/// `Catalog` is the main entry point. It is used in two phases:
///
/// 1. [`Catalog::load`] reads pragma lines into source units and packages
/// 2. [`Catalog::analyze`] resolves imports and finds package cycles
///
/// After that, the query methods answer from the stored [`Analysis`]. Each
/// call to `analyze` replaces the previous analysis as a whole.
#[derive(Debug)]
pub struct Catalog {
    base_path: PathBuf,
    config: AnalysisConfig,
    entities: Entities,
    analysis: Analysis,
}

impl Catalog {
    /// Create an empty catalog with default configuration.
    ///
    /// `base_path` names the catalog: the pragma file and the reports are
    /// found next to it by appending the configured extensions.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self::with_config(base_path, AnalysisConfig::default())
    }

    /// Create an empty catalog with the given configuration.
    #[must_use]
    pub fn with_config(base_path: impl Into<PathBuf>, config: AnalysisConfig) -> Self {
        Self {
            base_path: base_path.into(),
            config,
            entities: Entities::default(),
            analysis: Analysis::default(),
        }
    }

    /// The configured base path.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The base path with `extension` appended, e.g. `cats/onos` + `.html`.
    #[must_use]
    pub fn derived_path(&self, extension: &str) -> PathBuf {
        let mut path = self.base_path.clone().into_os_string();
        path.push(extension);
        PathBuf::from(path)
    }

    /// Path of the pragma file read by [`Catalog::load`].
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.derived_path(&self.config.catalog_extension)
    }

    // === Loading ===

    /// Load the pragma file at the configured [`Catalog::catalog_path`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalog`] if the file cannot be opened or read.
    pub fn load(&mut self) -> Result<LoadStats> {
        let path = self.catalog_path();
        self.load_from(&path)
    }

    /// Load pragmas from an explicit file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalog`] if the file cannot be opened or read.
    pub fn load_from(&mut self, path: &Path) -> Result<LoadStats> {
        let file = File::open(path).map_err(|e| Error::catalog(path, e))?;
        let stats = self
            .entities
            .load(BufReader::new(file))
            .map_err(|e| Error::catalog(path, e))?;

        debug!(
            path = %path.display(),
            lines = stats.lines_read,
            skipped = stats.lines_skipped,
            packages = self.entities.packages.len(),
            sources = self.entities.sources.len(),
            "Catalog loaded"
        );
        Ok(stats)
    }

    /// Load pragmas from any buffered reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading fails.
    pub fn load_reader<R: BufRead>(&mut self, reader: R) -> Result<LoadStats> {
        Ok(self.entities.load(reader)?)
    }

    // === Analysis ===

    /// Resolve imports, compute package dependencies and find all cycles.
    ///
    /// Replaces the results of any previous analysis.
    pub fn analyze(&mut self) -> &Analysis {
        let resolution = resolver::resolve_imports(&mut self.entities);
        debug!(
            resolved = resolution.resolved,
            dropped = resolution.dropped,
            "Imports resolved"
        );

        let graph = PackageGraph::from_dependencies(
            self.entities
                .packages
                .values()
                .map(|p| (p.name(), p.dependencies())),
        );
        let outcome = graph.find_cycles(self.config.max_search_depth);
        if outcome.truncated {
            warn!(
                max_depth = ?self.config.max_search_depth,
                "Cycle search reached the depth budget; results may be incomplete"
            );
        }

        self.analysis = analysis::Analysis::from_cycles(outcome.cycles, outcome.truncated);
        debug!(
            packages = graph.node_count(),
            dependencies = graph.edge_count(),
            cycles = self.analysis.cycles().len(),
            segments = self.analysis.cycle_segments().len(),
            "Analysis complete"
        );
        &self.analysis
    }

    /// Results of the last analysis (empty before the first).
    #[must_use]
    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    // === Queries ===

    /// All source units, in no particular order.
    pub fn sources(&self) -> impl Iterator<Item = &SourceUnit> {
        self.entities.sources.values()
    }

    /// All packages, in no particular order.
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.entities.packages.values()
    }

    /// Look up a source unit by its fully-qualified name.
    #[must_use]
    pub fn source(&self, name: &str) -> Option<&SourceUnit> {
        self.entities.sources.get(name)
    }

    /// Look up a package by name.
    #[must_use]
    pub fn package(&self, name: &str) -> Option<&Package> {
        self.entities.packages.get(name)
    }

    /// Every distinct package cycle.
    #[must_use]
    pub fn cycles(&self) -> &BTreeSet<DependencyCycle> {
        self.analysis.cycles()
    }

    /// Every dependency edge that lies on at least one cycle.
    #[must_use]
    pub fn cycle_segments(&self) -> &BTreeSet<Dependency> {
        self.analysis.cycle_segments()
    }

    /// Cycles passing through the named package.
    #[must_use]
    pub fn package_cycles(&self, package: &str) -> &BTreeSet<DependencyCycle> {
        self.analysis.package_cycles(package)
    }

    /// Segments of the cycles passing through the named package.
    #[must_use]
    pub fn package_cycle_segments(&self, package: &str) -> &BTreeSet<Dependency> {
        self.analysis.package_cycle_segments(package)
    }

    /// Source-level dependencies: one per source unit and resolved import,
    /// sorted.
    #[must_use]
    pub fn source_dependencies(&self) -> Vec<Dependency> {
        let mut dependencies: Vec<Dependency> = self
            .sources()
            .flat_map(|source| {
                source.imports().iter().map(|target| {
                    Dependency::new(Entity::Source(source.name().to_string()), target.clone())
                })
            })
            .collect();
        dependencies.sort();
        dependencies
    }

    /// Entity and cycle counts.
    #[must_use]
    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            packages: self.entities.packages.len(),
            sources: self.entities.sources.len(),
            cycles: self.analysis.cycles().len(),
            cycle_segments: self.analysis.cycle_segments().len(),
        }
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.summary().fmt(f)
    }
}
