//! `tangle <CATALOG>` command implementation.

use std::path::PathBuf;

use tangle::report::{BundleView, CatalogDetails};
use tangle::{AnalysisConfig, Catalog};
use tracing::info;

use super::{cycles, display};

/// Options gathered from the command line.
#[derive(Debug)]
pub struct Options {
    /// Catalog base path
    pub catalog: PathBuf,
    /// Write the compact details report as well
    pub details: bool,
    /// Optional YAML configuration file
    pub config: Option<PathBuf>,
}

/// Load, analyze and report on one catalog.
pub fn run(options: &Options) -> Result<(), tangle::Error> {
    let config = match &options.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };

    let mut catalog = Catalog::with_config(&options.catalog, config);
    let stats = catalog.load()?;
    info!(
        lines = stats.lines_read,
        skipped = stats.lines_skipped,
        "Read {}",
        catalog.catalog_path().display()
    );
    catalog.analyze();

    display::print_summary(&catalog);

    let view = BundleView::new(&catalog);
    cycles::print_cycles(&catalog);
    display::print_longest_cycle(view.longest_cycle());

    let html = view.write_html_file()?;
    display::print_written(&html);

    if options.details {
        let data = CatalogDetails::new(&catalog).write_details()?;
        display::print_written(&data);
    }

    Ok(())
}
