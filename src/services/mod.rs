//! Core rendering and request-resolution services.
use std::path::PathBuf;

pub mod listing;
pub mod render;
pub mod router;
pub mod site;

/// Convenience alias for rendering results.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors surfaced while rendering a page.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("not a regular file or symlink: '{}'", .path.display())]
    NotAFile { path: PathBuf },
    #[error("not a directory: '{}'", .path.display())]
    NotADirectory { path: PathBuf },
    #[error("directory URI missing a trailing separator: '{uri}'")]
    DirectoryUri { uri: String },
    #[error("failed to read file: '{}'", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read directory: '{}'", .path.display())]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
