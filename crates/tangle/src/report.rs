//! Reports generated from an analyzed catalog.
//!
//! | Report | Output | Purpose |
//! |--------|--------|---------|
//! | [`BundleView`] | `<base>.html` | Hierarchical edge bundling view of package dependencies, cycles highlighted |
//! | [`CatalogDetails`] | `<base>.data` | Compact ordinal encoding of packages, source dependencies and cycles |
//!
//! Both read the catalog through its public query surface only.

mod bundle;
mod details;

pub use bundle::{BundleView, PackageView, SegmentView, ViewData};
pub use details::CatalogDetails;
