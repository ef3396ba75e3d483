use crate::{
    catalog::Catalog,
    errors::IoError,
    path::RelativePath,
};
use miette::Diagnostic;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ScaffoldError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error("destination root is empty")]
    #[diagnostic(
        code(hako::scaffold::empty_root),
        help("Pass a directory name, e.g. 'my-app'")
    )]
    EmptyRoot,

    #[error("refusing to overwrite existing path '{path}'")]
    #[diagnostic(
        code(hako::scaffold::already_exists),
        help("Remove the file, pick another destination, or allow overwriting")
    )]
    AlreadyExists { path: PathBuf },
}

/// What to do when a catalog entry targets a path that already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Replace the existing file without asking.
    #[default]
    Overwrite,
    /// Check every target up front and abort before touching the disk if any exists.
    FailIfExists,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScaffoldOptions {
    pub overwrite: OverwritePolicy,
}

/// Progress notifications emitted while a catalog is being materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldEvent {
    RootCreated { path: PathBuf },
    DirectoryCreated { path: PathBuf },
    FileWritten { relative: RelativePath, path: PathBuf },
    Finished { root: PathBuf, files: usize },
}

/// Receives [`ScaffoldEvent`]s as they happen.
pub trait Observer {
    fn notify(&mut self, event: &ScaffoldEvent);
}
impl<F: FnMut(&ScaffoldEvent)> Observer for F {
    fn notify(&mut self, event: &ScaffoldEvent) {
        self(event)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub relative: RelativePath,
    pub path: PathBuf,
    pub content: String,
}

/// Everything a run did to the file system, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    pub created_dirs: Vec<PathBuf>,
    pub written: Vec<WrittenFile>,
}

pub struct Scaffolder<'o> {
    options: ScaffoldOptions,
    observer: Option<&'o mut dyn Observer>,
}
impl<'o> Scaffolder<'o> {
    pub fn new(options: ScaffoldOptions) -> Self {
        Self {
            options,
            observer: None,
        }
    }

    pub fn observe(mut self, observer: &'o mut dyn Observer) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Materializes `catalog` under `root`.
    ///
    /// The root and any missing parents are created first, then every entry is written in
    /// catalog order, creating its missing parent directories on the way. Existing files are
    /// overwritten unless [`OverwritePolicy::FailIfExists`] is set.
    ///
    /// # Errors
    ///
    /// Returns a [`ScaffoldError`] if:
    ///
    /// - `root` is empty.
    /// - A directory cannot be created, e.g. because a file already sits on the path.
    /// - A file cannot be written.
    /// - [`OverwritePolicy::FailIfExists`] is set and a target already exists.
    ///
    /// The run stops at the first failure. Whatever was written before it stays on disk.
    pub fn run(
        mut self,
        root: impl AsRef<Path>,
        catalog: &Catalog,
    ) -> Result<ScaffoldReport, ScaffoldError> {
        let root = root.as_ref();

        if root.as_os_str().is_empty() {
            return Err(ScaffoldError::EmptyRoot);
        }

        let root = std::path::absolute(root).map_err(|error| IoError::resolve(root, error))?;

        log::info!(
            "scaffolding {} file(s) into {}",
            catalog.len(),
            root.display()
        );

        if self.options.overwrite == OverwritePolicy::FailIfExists {
            ensure_targets_absent(&root, catalog)?;
        }

        let mut report = ScaffoldReport {
            root: root.clone(),
            created_dirs: vec![],
            written: vec![],
        };

        for dir in create_directory(&root)? {
            let event = if dir == root {
                ScaffoldEvent::RootCreated { path: dir.clone() }
            } else {
                ScaffoldEvent::DirectoryCreated { path: dir.clone() }
            };

            self.emit(event);
            report.created_dirs.push(dir);
        }

        for entry in catalog.entries() {
            let target = root.join(entry.path.to_native());

            if let Some(parent) = target.parent() {
                for dir in create_directory(parent)? {
                    self.emit(ScaffoldEvent::DirectoryCreated { path: dir.clone() });
                    report.created_dirs.push(dir);
                }
            }

            write_file(&target, entry.content)?;

            self.emit(ScaffoldEvent::FileWritten {
                relative: entry.path.clone(),
                path: target.clone(),
            });

            report.written.push(WrittenFile {
                relative: entry.path.clone(),
                path: target,
                content: entry.content.to_string(),
            });
        }

        self.emit(ScaffoldEvent::Finished {
            root: root.clone(),
            files: report.written.len(),
        });

        Ok(report)
    }

    fn emit(&mut self, event: ScaffoldEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer.notify(&event);
        }
    }
}

/// Materializes `catalog` under `root` with default options and no progress reporting.
pub fn scaffold(
    root: impl AsRef<Path>,
    catalog: &Catalog,
) -> Result<ScaffoldReport, ScaffoldError> {
    Scaffolder::new(ScaffoldOptions::default()).run(root, catalog)
}

fn ensure_targets_absent(root: &Path, catalog: &Catalog) -> Result<(), ScaffoldError> {
    for entry in catalog.entries() {
        let target = root.join(entry.path.to_native());

        // symlink_metadata so a dangling link still counts as occupied
        if fs::symlink_metadata(&target).is_ok() {
            return Err(ScaffoldError::AlreadyExists { path: target });
        }
    }

    Ok(())
}

/// Creates `path` and any missing parents, returning the directories that did not exist
/// before, outermost first.
fn create_directory(path: &Path) -> Result<Vec<PathBuf>, ScaffoldError> {
    let mut missing: Vec<PathBuf> = path
        .ancestors()
        .take_while(|ancestor| !ancestor.as_os_str().is_empty() && !ancestor.exists())
        .map(Path::to_path_buf)
        .collect();
    missing.reverse();

    fs::create_dir_all(path).map_err(|error| IoError::mkdir(path, error))?;

    for dir in &missing {
        log::debug!("created directory {}", dir.display());
    }

    Ok(missing)
}

fn write_file(path: &Path, contents: &str) -> Result<(), ScaffoldError> {
    fs::write(path, contents).map_err(|error| IoError::write(path, error))?;

    log::debug!("wrote {} bytes to {}", contents.len(), path.display());

    Ok(())
}
