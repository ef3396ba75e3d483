//! Materializes a catalog of `relative path -> content` pairs as a directory tree.
//!
//! ```no_run
//! use hako::{scaffold, Catalog};
//!
//! let catalog = Catalog::from_pairs([("a/b.txt", "hello"), ("a/c.txt", "world")])?;
//! let report = scaffold("proj", &catalog)?;
//! assert_eq!(report.written.len(), 2);
//! # Ok::<(), miette::Report>(())
//! ```

pub mod blueprint;
pub mod catalog;
pub mod errors;
pub mod manifest;
pub mod path;
pub mod preview;
pub mod prompt;
pub mod report;
pub mod scaffold;

// Public API
pub mod api;

pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use path::{PathError, RelativePath};
pub use scaffold::{
    scaffold, Observer, OverwritePolicy, ScaffoldError, ScaffoldEvent, ScaffoldOptions,
    ScaffoldReport, Scaffolder, WrittenFile,
};
