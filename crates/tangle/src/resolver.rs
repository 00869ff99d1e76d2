//! Import name resolution.
//!
//! Maps the raw import names of each source unit to entities of the same
//! catalog, then derives package dependency sets from them.
//! Names that match nothing (third-party and platform imports) are dropped:
//! the catalog only models dependencies between its own packages.

use std::collections::BTreeSet;

use crate::loader::Entities;
use crate::types::Entity;

/// Suffix marking a wildcard package import, as in `com.foo.*`.
pub const WILDCARD_SUFFIX: &str = ".*";

/// Counts from one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Resolution {
    /// Import names that matched a catalog entity
    pub resolved: usize,
    /// Import names that matched nothing
    pub dropped: usize,
}

/// Resolve one import name.
///
/// A wildcard import resolves to the package it names; anything else must
/// be the exact name of a source unit.
pub(crate) fn resolve_import(name: &str, entities: &Entities) -> Option<Entity> {
    match name.strip_suffix(WILDCARD_SUFFIX) {
        Some(package) => entities
            .packages
            .contains_key(package)
            .then(|| Entity::Package(package.to_string())),
        None => entities
            .sources
            .contains_key(name)
            .then(|| Entity::Source(name.to_string())),
    }
}

/// The package an import target contributes to a dependency set.
///
/// A package is its own owner; a source unit contributes the package it was
/// declared in, or nothing if it never saw a `package` line.
pub(crate) fn owning_package<'a>(entity: &'a Entity, entities: &'a Entities) -> Option<&'a str> {
    match entity {
        Entity::Package(name) => Some(name.as_str()),
        Entity::Source(name) => entities.sources.get(name)?.package(),
    }
}

/// Resolve the imports of every packaged source unit and recompute every
/// package's dependency set.
///
/// Both are replaced wholesale, never merged with a previous pass.
pub(crate) fn resolve_imports(entities: &mut Entities) -> Resolution {
    let mut resolution = Resolution::default();
    let mut source_imports: Vec<(String, BTreeSet<Entity>)> = Vec::new();
    let mut package_dependencies: Vec<(String, BTreeSet<String>)> = Vec::new();

    for package in entities.packages.values() {
        let mut dependencies = BTreeSet::new();

        for source_name in package.sources() {
            let Some(source) = entities.sources.get(source_name) else {
                continue;
            };

            let mut imports = BTreeSet::new();
            for import_name in source.import_names() {
                if let Some(entity) = resolve_import(import_name, entities) {
                    imports.insert(entity);
                    resolution.resolved += 1;
                } else {
                    resolution.dropped += 1;
                }
            }

            dependencies.extend(
                imports
                    .iter()
                    .filter_map(|entity| owning_package(entity, entities))
                    .map(str::to_string),
            );
            source_imports.push((source_name.clone(), imports));
        }

        package_dependencies.push((package.name().to_string(), dependencies));
    }

    for (name, imports) in source_imports {
        if let Some(source) = entities.sources.get_mut(&name) {
            source.set_imports(imports);
        }
    }
    for (name, dependencies) in package_dependencies {
        if let Some(package) = entities.packages.get_mut(&name) {
            package.set_dependencies(dependencies);
        }
    }

    resolution
}
