//! Compact ordinal encoding of a catalog.
//!
//! Packages sorted by name are numbered from 0; the sources of each package,
//! sorted by name, are numbered from 0 within that package. A source is then
//! addressed as `<package code>.<source code>`.
//!
//! ```text
//! ;Package Dependency Data
//! ;Sat, 17 Oct 2026 09:12:44 +0200
//! ;cats/onos.data
//! ;
//! ;
//! ;Packages/Sources
//! Pcom.foobar.model
//! SMagicBean
//! ;
//! ;Source Dependencies
//! D0.0>1.1
//! ;
//! ;Package Cycles
//! C0}1}2}
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::Local;
use tracing::debug;

use crate::Catalog;
use crate::error::Result;
use crate::types::{Entity, Package, SourceUnit};

const TITLE: &str = "Package Dependency Data";
const COMMENT: char = ';';
const PACKAGE: char = 'P';
const SOURCE: char = 'S';
const DEPENDENCY: char = 'D';
const DEPENDENCY_ARROW: char = '>';
const CYCLE: char = 'C';
const CYCLE_ARROW: char = '}';

/// Encodes an analyzed catalog into the compact `.data` report.
#[derive(Debug)]
pub struct CatalogDetails<'a> {
    catalog: &'a Catalog,
    package_sources: Vec<String>,
    dependencies: Vec<String>,
    cycles: Vec<String>,
}

/// Ordinal codes of packages and of sources within their package.
#[derive(Debug, Default)]
struct Codes<'a> {
    packages: HashMap<&'a str, usize>,
    sources: HashMap<&'a str, (usize, usize)>,
}

impl Codes<'_> {
    fn source(&self, name: &str) -> Option<String> {
        self.sources
            .get(name)
            .map(|(package, source)| format!("{package}.{source}"))
    }

    fn package(&self, name: &str) -> Option<usize> {
        self.packages.get(name).copied()
    }
}

impl<'a> CatalogDetails<'a> {
    /// Encode an analyzed catalog.
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        let mut packages: Vec<&'a Package> = catalog.packages().collect();
        packages.sort_by(|a, b| a.name().cmp(b.name()));

        let sorted: Vec<(&'a Package, Vec<&'a SourceUnit>)> = packages
            .into_iter()
            .map(|package| {
                // Package::sources is a BTreeSet, so this is already name order.
                let sources = package
                    .sources()
                    .iter()
                    .filter_map(|name| catalog.source(name))
                    .collect();
                (package, sources)
            })
            .collect();

        let mut codes = Codes::default();
        for (package_code, (package, sources)) in sorted.iter().enumerate() {
            codes.packages.insert(package.name(), package_code);
            for (source_code, source) in sources.iter().enumerate() {
                codes
                    .sources
                    .insert(source.name(), (package_code, source_code));
            }
        }

        let mut package_sources = Vec::new();
        let mut dependencies = Vec::new();
        for (package, sources) in &sorted {
            package_sources.push(format!("{PACKAGE}{}", package.name()));
            for source in sources {
                package_sources.push(format!("{SOURCE}{}", source.leaf_name()));
            }
        }
        for source in sorted.iter().flat_map(|(_, sources)| sources) {
            let Some(from) = codes.source(source.name()) else {
                continue;
            };
            for import in source.imports() {
                let to = match import {
                    Entity::Source(name) => codes.source(name),
                    Entity::Package(name) => codes.package(name).map(|code| code.to_string()),
                };
                // Sources that never declared a package have no code.
                if let Some(to) = to {
                    dependencies.push(format!("{DEPENDENCY}{from}{DEPENDENCY_ARROW}{to}"));
                }
            }
        }

        let cycles = catalog
            .cycles()
            .iter()
            .map(|cycle| {
                let mut line = String::from(CYCLE);
                for code in cycle.packages().iter().filter_map(|p| codes.package(p)) {
                    line.push_str(&code.to_string());
                    line.push(CYCLE_ARROW);
                }
                line
            })
            .collect();

        Self {
            catalog,
            package_sources,
            dependencies,
            cycles,
        }
    }

    /// `P`/`S` lines: each package followed by its sources' leaf names.
    #[must_use]
    pub fn package_sources(&self) -> &[String] {
        &self.package_sources
    }

    /// `D` lines: one per source-level dependency.
    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// `C` lines: one per cycle, each package code followed by `}`.
    #[must_use]
    pub fn cycles(&self) -> &[String] {
        &self.cycles
    }

    /// Write the full report, headed by comments naming `file_name`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if writing fails.
    pub fn write_report<W: Write>(&self, mut out: W, file_name: &str) -> Result<()> {
        let timestamp = Local::now().to_rfc2822();
        for comment in [TITLE, timestamp.as_str(), file_name, ""] {
            writeln!(out, "{COMMENT}{comment}")?;
        }

        for (heading, lines) in [
            ("Packages/Sources", &self.package_sources),
            ("Source Dependencies", &self.dependencies),
            ("Package Cycles", &self.cycles),
        ] {
            writeln!(out, "{COMMENT}")?;
            writeln!(out, "{COMMENT}{heading}")?;
            for line in lines {
                writeln!(out, "{line}")?;
            }
        }

        out.flush()?;
        Ok(())
    }

    /// Write the report next to the catalog, at `<base><details-extension>`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file cannot be created or written.
    pub fn write_details(&self) -> Result<PathBuf> {
        let path = self
            .catalog
            .derived_path(&self.catalog.config().details_extension);
        let file = File::create(&path)?;
        self.write_report(BufWriter::new(file), &path.display().to_string())?;

        debug!(
            path = %path.display(),
            dependencies = self.dependencies.len(),
            cycles = self.cycles.len(),
            "Wrote catalog details"
        );
        Ok(path)
    }
}
