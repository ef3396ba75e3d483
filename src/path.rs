use miette::Diagnostic;
use std::{
    fmt,
    path::{Component, Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum PathError {
    #[error("path is empty")]
    #[diagnostic(code(hako::path::empty))]
    Empty,

    #[error("path '{path}' is absolute")]
    #[diagnostic(
        code(hako::path::absolute),
        help("Catalog paths are relative to the destination root, drop the leading '/'")
    )]
    Absolute { path: String },

    #[error("path '{path}' contains a '..' segment")]
    #[diagnostic(
        code(hako::path::traversal),
        help("Catalog entries may not point outside the destination root")
    )]
    Traversal { path: String },

    #[error("path '{path}' does not end with a file name")]
    #[diagnostic(code(hako::path::missing_file_name))]
    MissingFileName { path: String },

    #[error("path '{path}' has an invalid segment: '{segment}'")]
    #[diagnostic(
        code(hako::path::invalid_segment),
        help("Use '/' as the only separator, and avoid ':' and NUL bytes")
    )]
    InvalidSegment { path: String, segment: String },
}

/// A `/`-separated path that is guaranteed to stay inside whatever root it is joined onto.
///
/// Empty and `.` segments are dropped while parsing, so `./src//main.rs` and `src/main.rs`
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath {
    segments: Vec<String>,
}
impl RelativePath {
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }

        if raw.starts_with('/') {
            return Err(PathError::Absolute {
                path: raw.to_string(),
            });
        }

        let mut segments = Vec::new();

        for segment in raw.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    return Err(PathError::Traversal {
                        path: raw.to_string(),
                    })
                }
                other => {
                    if !is_valid_segment(other) {
                        return Err(PathError::InvalidSegment {
                            path: raw.to_string(),
                            segment: other.to_string(),
                        });
                    }

                    segments.push(other.to_string());
                }
            }
        }

        if segments.is_empty() {
            return Err(PathError::Empty);
        }

        // "a/b/" names a directory, and so does "a/b/."
        if raw.ends_with('/') || raw.ends_with("/.") {
            return Err(PathError::MissingFileName {
                path: raw.to_string(),
            });
        }

        Ok(Self { segments })
    }

    /// The path in the host's native representation.
    pub fn to_native(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    /// Every directory above the file, outermost first.
    pub fn parents(&self) -> impl Iterator<Item = RelativePath> + '_ {
        (1..self.segments.len()).map(|end| Self {
            segments: self.segments[..end].to_vec(),
        })
    }

    pub fn file_name(&self) -> &str {
        // parse() never produces an empty segment list
        self.segments.last().map(String::as_str).unwrap_or_default()
    }
}
impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}
impl std::str::FromStr for RelativePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_valid_segment(segment: &str) -> bool {
    // ':' starts a drive prefix on windows ("C:x"), which would replace the root on join
    if segment.contains(['\\', '\0', ':']) {
        return false;
    }

    let mut components = Path::new(segment).components();

    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
