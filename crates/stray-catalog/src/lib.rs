//! Content catalog: the inventory of files a documentation site is built
//! from, grouped by component/version and classified by family.
//!
//! [`DirCatalog`] loads the catalog from an on-disk tree of Antora-style
//! components; the [`ContentCatalog`] trait is the seam audits run against,
//! so tests can substitute an in-memory catalog.

pub mod loader;
pub mod model;

pub use loader::{CatalogError, DirCatalog};
pub use model::{
    module_from_path, CatalogFile, ComponentVersion, ContentCatalog, Family, Separator,
    SourceFile,
};
