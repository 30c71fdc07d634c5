//! Strongly-typed path primitives for request handling.
use std::fs;
use std::path::{Path, PathBuf};

/// Closed classification of a filesystem path.
///
/// `Symlink` means a symlink resolving to a regular file; a symlink to a
/// directory classifies as `Directory` and a broken symlink as `Missing`.
/// `Other` covers unsupported node types (sockets, FIFOs, devices).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PathKind {
    Missing,
    Directory,
    File,
    Symlink,
    Other,
}

pub fn classify(path: &Path) -> PathKind {
    let Ok(metadata) = fs::symlink_metadata(path) else {
        return PathKind::Missing;
    };

    if metadata.file_type().is_symlink() {
        return match fs::metadata(path) {
            Ok(target) if target.is_dir() => PathKind::Directory,
            Ok(target) if target.is_file() => PathKind::Symlink,
            Ok(_) => PathKind::Other,
            Err(_) => PathKind::Missing,
        };
    }

    let file_type = metadata.file_type();
    if file_type.is_dir() {
        PathKind::Directory
    } else if file_type.is_file() {
        PathKind::File
    } else {
        PathKind::Other
    }
}

/// A request path lexically normalized against the document root boundary.
///
/// Normalization drops `.` and empty components and resolves `..` without
/// touching the filesystem. A final `.`, `..` or empty component marks the
/// path as directory-form, so `a/b/..` normalizes to the directory URI
/// `/a/`. Construction fails when `..` would climb past the root.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestPath {
    segments: Vec<String>,
    directory_form: bool,
}

impl RequestPath {
    /// Returns `None` if the path escapes the root (e.g. contains leading `..`).
    pub fn parse(raw: &str) -> Option<Self> {
        let mut segments: Vec<String> = Vec::new();
        let mut directory_form = true;

        for component in raw.split('/') {
            match component {
                "" | "." => directory_form = true,
                ".." => {
                    segments.pop()?;
                    directory_form = true;
                }
                name => {
                    segments.push(name.to_string());
                    directory_form = false;
                }
            }
        }

        Some(Self {
            segments,
            directory_form,
        })
    }

    pub fn has_trailing_separator(&self) -> bool {
        self.directory_form
    }

    /// The normalized URI, starting with `/` and keeping the trailing
    /// separator for directory-form paths.
    pub fn uri(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }

        let mut uri = String::new();
        for segment in &self.segments {
            uri.push('/');
            uri.push_str(segment);
        }
        if self.directory_form {
            uri.push('/');
        }
        uri
    }

    /// Map the normalized path under the document root.
    pub fn fs_path(&self, doc_root: &Path) -> PathBuf {
        let mut path = doc_root.to_path_buf();
        for segment in &self.segments {
            path.push(segment);
        }
        path
    }
}
