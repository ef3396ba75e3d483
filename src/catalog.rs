use crate::path::{PathError, RelativePath};
use indexmap::IndexMap;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("invalid catalog entry '{raw}'")]
    #[diagnostic(code(hako::catalog::invalid_path))]
    InvalidPath {
        raw: String,
        #[source]
        #[diagnostic_source]
        source: PathError,
    },
}

/// A single file to be materialized: where it goes, and what it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry<'a> {
    pub path: &'a RelativePath,
    pub content: &'a str,
}

/// An ordered mapping of relative file paths to file content.
///
/// Every key has already been validated, so a [`Catalog`] can be handed to the scaffold
/// engine without re-checking for paths that would escape the destination root. When the
/// same path is inserted twice the later content replaces the earlier one, keeping the
/// position of the first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    files: IndexMap<RelativePath, String>,
}
impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from `(path, content)` pairs, failing on the first invalid path.
    pub fn from_pairs<I, P, C>(pairs: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: Into<String>,
    {
        let mut catalog = Self::new();

        for (path, content) in pairs {
            catalog.insert(path.as_ref(), content)?;
        }

        Ok(catalog)
    }

    /// Inserts an entry, returning the content it replaced if the path was already present.
    pub fn insert(
        &mut self,
        path: &str,
        content: impl Into<String>,
    ) -> Result<Option<String>, CatalogError> {
        let relative = RelativePath::parse(path).map_err(|error| CatalogError::InvalidPath {
            raw: path.to_string(),
            source: error,
        })?;

        let replaced = self.files.insert(relative, content.into());

        if replaced.is_some() {
            log::debug!("catalog entry '{}' replaced by a later entry", path);
        }

        Ok(replaced)
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        let relative = RelativePath::parse(path).ok()?;

        self.files.get(&relative).map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry<'_>> {
        self.files.iter().map(|(path, content)| CatalogEntry {
            path,
            content: content.as_str(),
        })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
