use crate::{
    catalog::{Catalog, CatalogError},
    errors::{IoError, ParseError},
};
use miette::Diagnostic;
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum ManifestError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Deserialize, Clone)]
pub struct ManifestFile {
    pub path: String,
    pub content: String,
}

/// A catalog described in TOML, for templates that are not compiled into the binary.
///
/// ```toml
/// root = "my-app"
/// next_steps = ["cd {root}", "npm install"]
///
/// [[files]]
/// path = "src/index.js"
/// content = "console.log('hi')"
/// ```
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Manifest {
    pub root: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
    #[serde(default)]
    pub files: Vec<ManifestFile>,
}
impl Manifest {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ManifestError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|error| IoError::read(path, error))?;

        let manifest = toml::from_str(&content).map_err(|error| ParseError::new(path, error))?;

        log::debug!("loaded manifest from {}", path.display());

        Ok(manifest)
    }

    /// Validates every `[[files]]` entry and turns them into a [`Catalog`] in file order.
    pub fn catalog(&self) -> Result<Catalog, ManifestError> {
        let pairs = self
            .files
            .iter()
            .map(|file| (file.path.as_str(), file.content.as_str()));

        Ok(Catalog::from_pairs(pairs)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
root = "proj"
next_steps = ["cd {root}"]

[[files]]
path = "a/b.txt"
content = "hello"

[[files]]
path = "a/c.txt"
content = "world"

[[files]]
path = "a/b.txt"
content = "hello again"
"#;

    #[test]
    fn reads_manifest_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hako.toml");
        fs::write(&path, MANIFEST).unwrap();

        let manifest = Manifest::from_file(&path).unwrap();

        assert_eq!(manifest.root.as_deref(), Some("proj"));
        assert_eq!(manifest.next_steps, vec!["cd {root}"]);
        assert_eq!(manifest.files.len(), 3);
    }

    #[test]
    fn catalog_applies_last_write_wins() {
        let manifest: Manifest = toml::from_str(MANIFEST).unwrap();
        let catalog = manifest.catalog().unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("a/b.txt"), Some("hello again"));
        assert_eq!(catalog.get("a/c.txt"), Some("world"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let error = Manifest::from_file(dir.path().join("nope.toml")).unwrap_err();

        assert!(matches!(error, ManifestError::Io(_)));
        // the io diagnostic's help must reach the report
        let help = error.help().map(|help| help.to_string()).unwrap_or_default();
        assert!(help.contains("Check file permissions"), "{}", help);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[[files]\npath = ").unwrap();

        let error = Manifest::from_file(&path).unwrap_err();

        assert!(matches!(error, ManifestError::Parse(_)));
    }

    #[test]
    fn escaping_paths_are_rejected() {
        let manifest: Manifest = toml::from_str(
            r#"
[[files]]
path = "../outside.txt"
content = "x"
"#,
        )
        .unwrap();

        assert!(matches!(manifest.catalog(), Err(ManifestError::Catalog(_))));
    }
}
