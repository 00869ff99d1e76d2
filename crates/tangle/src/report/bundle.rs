//! JSON view data and the HTML visualization.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::Catalog;
use crate::error::Result;
use crate::graph::DependencyCycle;
use crate::types::{CatalogSummary, Dependency, Package};

const TEMPLATE: &str = include_str!("../../assets/bundle.html");
const TITLE_PLACEHOLDER: &str = "TITLE_PLACEHOLDER";
const DATA_PLACEHOLDER: &str = "DATA_PLACEHOLDER";

/// The document that drives the visualization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewData<'a> {
    /// One entry per package, sorted by name
    pub packages: Vec<PackageView<'a>>,
    /// Every cycle segment, keyed `<target>-<source>`
    pub cycle_segments: BTreeMap<String, SegmentView<'a>>,
    /// Catalog counts
    pub summary: CatalogSummary,
}

/// A package as seen by the visualization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageView<'a> {
    /// Package name
    pub name: &'a str,
    /// Number of source units in the package
    pub size: usize,
    /// Names of the packages it depends on
    pub imports: Vec<&'a str>,
    /// Segments of the cycles through this package, keyed `<target>-<source>`
    pub cycle_segments: BTreeMap<String, SegmentView<'a>>,
    /// Number of cycles through this package
    pub cycle_count: usize,
    /// Number of segments of those cycles
    pub cycle_segment_count: usize,
}

/// One edge of a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentView<'a> {
    /// Depending package
    pub s: &'a str,
    /// Package depended upon
    pub t: &'a str,
}

/// Renders a catalog as a hierarchical edge bundling page.
#[derive(Debug, Clone, Copy)]
pub struct BundleView<'a> {
    catalog: &'a Catalog,
}

impl<'a> BundleView<'a> {
    /// Wrap an analyzed catalog.
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Build the view document.
    #[must_use]
    pub fn view_data(&self) -> ViewData<'a> {
        let catalog = self.catalog;
        let mut packages: Vec<&'a Package> = catalog.packages().collect();
        packages.sort_by(|a, b| a.name().cmp(b.name()));

        ViewData {
            packages: packages.into_iter().map(|p| self.package_view(p)).collect(),
            cycle_segments: segment_map(catalog.cycle_segments()),
            summary: catalog.summary(),
        }
    }

    fn package_view(&self, package: &'a Package) -> PackageView<'a> {
        let catalog = self.catalog;
        let segments = catalog.package_cycle_segments(package.name());

        PackageView {
            name: package.name(),
            size: package.sources().len(),
            imports: package.dependencies().iter().map(String::as_str).collect(),
            cycle_segments: segment_map(segments),
            cycle_count: catalog.package_cycles(package.name()).len(),
            cycle_segment_count: segments.len(),
        }
    }

    /// The view document as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.view_data())?)
    }

    /// The complete HTML page, titled with the catalog base path.
    ///
    /// The view data is embedded in a `<script>` block, so `<`, `>` and `&`
    /// inside it are written as JSON unicode escapes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if serialization fails.
    pub fn render_html(&self) -> Result<String> {
        let title = escape_html(&self.catalog.base_path().display().to_string());
        let data = escape_script_json(&self.to_json()?);

        Ok(TEMPLATE
            .replace(TITLE_PLACEHOLDER, &title)
            .replace(DATA_PLACEHOLDER, &data))
    }

    /// Write the HTML page to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn write_html<W: Write>(&self, mut out: W) -> Result<()> {
        out.write_all(self.render_html()?.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Write the HTML page next to the catalog, at `<base><html-extension>`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the file cannot be written.
    pub fn write_html_file(&self) -> Result<PathBuf> {
        let path = self
            .catalog
            .derived_path(&self.catalog.config().html_extension);
        self.write_html(BufWriter::new(File::create(&path)?))?;

        debug!(path = %path.display(), "Wrote bundle view");
        Ok(path)
    }

    /// The cycle with the most segments; the first found wins a tie.
    #[must_use]
    pub fn longest_cycle(&self) -> Option<&'a DependencyCycle> {
        let catalog = self.catalog;
        catalog.cycles().iter().reduce(|longest, cycle| {
            if cycle.segments().len() > longest.segments().len() {
                cycle
            } else {
                longest
            }
        })
    }
}

/// Make serialized JSON safe inside a `<script>` element.
///
/// These characters only occur inside JSON strings, where the escapes
/// decode to the same text.
fn escape_script_json(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn segment_map(segments: &BTreeSet<Dependency>) -> BTreeMap<String, SegmentView<'_>> {
    segments
        .iter()
        .map(|dep| {
            let (s, t) = (dep.source().name(), dep.target().name());
            (format!("{t}-{s}"), SegmentView { s, t })
        })
        .collect()
}
