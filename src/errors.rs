use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// The file-system step that failed.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq, Clone, Copy)]
pub enum FileOperation {
    #[error("reading a file")]
    Read,
    #[error("writing a file")]
    Write,
    #[error("creating a directory")]
    Mkdir,
    #[error("resolving a path")]
    Resolve,
}

/// An I/O failure tied to the path it happened on.
#[derive(Debug, Error, Diagnostic)]
#[error("I/O error: {operation} on path '{path}'")]
#[diagnostic(
    code(hako::io),
    help("Check file permissions, disk space, or that no file sits where a directory is expected.")
)]
pub struct IoError {
    pub operation: FileOperation,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
impl IoError {
    pub fn read(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::at(FileOperation::Read, path, error)
    }

    pub fn write(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::at(FileOperation::Write, path, error)
    }

    pub fn mkdir(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::at(FileOperation::Mkdir, path, error)
    }

    pub fn resolve(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::at(FileOperation::Resolve, path, error)
    }

    fn at(operation: FileOperation, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// A manifest that is not valid TOML, or does not have the expected shape.
#[derive(Debug, Error, Diagnostic)]
#[error("Manifest '{path}' is not a valid toml catalog")]
#[diagnostic(
    code(hako::parse),
    help("Expected optional `root`, `description`, `next_steps` keys and [[files]] tables with `path` and `content`")
)]
pub struct ParseError {
    pub path: PathBuf,
    #[source]
    pub source: toml::de::Error,
}
impl ParseError {
    pub fn new(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}
