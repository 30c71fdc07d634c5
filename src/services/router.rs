//! Resolution of request URIs into handling decisions.
use std::path::{Path, PathBuf};

use crate::domain::{PathKind, RequestPath, classify};

/// Name of the per-directory index document.
const INDEX_FILE: &str = "index.md";
/// Extension of documents that go through the markdown renderer.
const MARKDOWN_EXTENSION: &str = "md";

/// Terminal handling decision for one request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    /// No document under the root matches the URI, or the URI tried to
    /// escape the root.
    NotFound,
    /// Directory URI without a trailing separator; redirect so relative
    /// links resolve against the directory instead of its parent.
    Redirect { location: String },
    /// Render the markdown document at `path`.
    Markdown { uri: String, path: PathBuf },
    /// Render a generated listing of the directory at `path`.
    Listing { uri: String, path: PathBuf },
    /// Serve the file at `path` verbatim.
    Raw { path: PathBuf },
    /// The path exists but is not a file, symlink or directory.
    Unsupported { uri: String },
}

/// Decide how the request for `raw_path` (the URI without its leading
/// separator) is handled under `doc_root`.
pub fn resolve(doc_root: &Path, raw_path: &str) -> Resolution {
    let Some(request) = RequestPath::parse(raw_path) else {
        return Resolution::NotFound;
    };
    let uri = request.uri();
    let path = request.fs_path(doc_root);

    match classify(&path) {
        PathKind::Missing => Resolution::NotFound,
        PathKind::Directory if !request.has_trailing_separator() => Resolution::Redirect {
            location: format!("{uri}/"),
        },
        PathKind::Directory => {
            let index = path.join(INDEX_FILE);
            // One bounded hop: whatever `index.md` turns out to be is
            // handled as a file, never classified as a directory again.
            if classify(&index) == PathKind::Missing {
                Resolution::Listing { uri, path }
            } else {
                Resolution::Markdown { uri, path: index }
            }
        }
        PathKind::File | PathKind::Symlink => {
            if path.extension().and_then(|ext| ext.to_str()) == Some(MARKDOWN_EXTENSION) {
                Resolution::Markdown { uri, path }
            } else {
                Resolution::Raw { path }
            }
        }
        PathKind::Other => Resolution::Unsupported { uri },
    }
}
