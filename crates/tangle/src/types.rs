//! Domain types for Tangle dependency analysis.
//!
//! These types represent the core domain model:
//! - **Entities**: `SourceUnit`, `Package` (owned by the catalog, keyed by name)
//! - **References**: `Entity` (a resolved import target, either kind)
//! - **Edges**: `Dependency` (a directed pair of entities)
//!
//! ## Design Decisions
//!
//! | Decision | Choice | Rationale |
//! |----------|--------|-----------|
//! | Identity | Name, not pointer | Two entities with the same name are the same entity |
//! | Source → package link | Package name | The package is the sole owner of containment |
//! | Import targets | Tagged `Entity` enum | Packages and sources support different operations |
//! | Collections | `BTreeSet` | Deterministic iteration for reports and tests |

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

// ============================================================================
// Entity references
// ============================================================================

/// A reference to an entity known to the catalog.
///
/// Import resolution produces these: a wildcard import resolves to a
/// [`Entity::Package`], any other import to a [`Entity::Source`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Entity {
    /// A package, by dotted name
    Package(String),
    /// A source unit, by fully-qualified name
    Source(String),
}

impl Entity {
    /// The dotted name of the referenced entity.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Package(name) | Self::Source(name) => name,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Entities
// ============================================================================

/// A single compilation unit listed in the catalog.
///
/// Named `<package>.<leafName>` and remembered by its original path. Raw
/// import names are collected while loading; the resolved imports are
/// replaced wholesale on every analysis pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    name: String,
    path: String,
    package: Option<String>,
    import_names: BTreeSet<String>,
    imports: BTreeSet<Entity>,
}

impl SourceUnit {
    /// Create a source unit with no package and no imports.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            package: None,
            import_names: BTreeSet::new(),
            imports: BTreeSet::new(),
        }
    }

    /// Fully-qualified name, e.g. `com.foobar.model.MagicBean`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The leaf name, i.e. the last dotted segment of [`Self::name`].
    #[must_use]
    pub fn leaf_name(&self) -> &str {
        leaf_name(&self.name)
    }

    /// Path of the file this unit was extracted from.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Name of the owning package, if a `package` pragma was seen.
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Raw import names, as recorded from the catalog.
    #[must_use]
    pub fn import_names(&self) -> &BTreeSet<String> {
        &self.import_names
    }

    /// Imports resolved against the catalog by the last analysis.
    #[must_use]
    pub fn imports(&self) -> &BTreeSet<Entity> {
        &self.imports
    }

    pub(crate) fn set_package(&mut self, package: impl Into<String>) {
        self.package = Some(package.into());
    }

    pub(crate) fn add_import_name(&mut self, name: impl Into<String>) {
        self.import_names.insert(name.into());
    }

    pub(crate) fn set_imports(&mut self, imports: BTreeSet<Entity>) {
        self.imports = imports;
    }
}

/// A named grouping of source units; the unit of cycle analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    name: String,
    sources: BTreeSet<String>,
    dependencies: BTreeSet<String>,
}

impl Package {
    /// Create an empty package.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: BTreeSet::new(),
            dependencies: BTreeSet::new(),
        }
    }

    /// Dotted package name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the source units declared in this package.
    #[must_use]
    pub fn sources(&self) -> &BTreeSet<String> {
        &self.sources
    }

    /// Names of the packages this package depends on.
    ///
    /// Empty until the catalog has been analyzed.
    #[must_use]
    pub fn dependencies(&self) -> &BTreeSet<String> {
        &self.dependencies
    }

    pub(crate) fn add_source(&mut self, source: impl Into<String>) {
        self.sources.insert(source.into());
    }

    pub(crate) fn set_dependencies(&mut self, dependencies: BTreeSet<String>) {
        self.dependencies = dependencies;
    }
}

// ============================================================================
// Dependencies
// ============================================================================

/// A directed edge: `source` requires `target`.
///
/// Equality, ordering and hashing are by the `(source, target)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dependency {
    source: Entity,
    target: Entity,
}

impl Dependency {
    /// Create a dependency between two entities.
    #[must_use]
    pub fn new(source: Entity, target: Entity) -> Self {
        Self { source, target }
    }

    /// Create a package-to-package dependency.
    #[must_use]
    pub fn between_packages(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(
            Entity::Package(source.into()),
            Entity::Package(target.into()),
        )
    }

    /// The depending entity.
    #[must_use]
    pub fn source(&self) -> &Entity {
        &self.source
    }

    /// The entity depended upon.
    #[must_use]
    pub fn target(&self) -> &Entity {
        &self.target
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

// ============================================================================
// Results
// ============================================================================

/// Entity and cycle counts of a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    /// Number of packages
    pub packages: usize,
    /// Number of source units
    pub sources: usize,
    /// Number of distinct cycles
    pub cycles: usize,
    /// Number of distinct cycle segments
    pub cycle_segments: usize,
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Catalog{{packages={}, sources={}, cycles={}, cycleSegments={}}}",
            self.packages, self.sources, self.cycles, self.cycle_segments
        )
    }
}

/// Last dotted segment of a name.
fn leaf_name(dotted: &str) -> &str {
    dotted.rsplit_once('.').map_or(dotted, |(_, leaf)| leaf)
}
