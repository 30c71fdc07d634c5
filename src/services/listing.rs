//! Directory listings rendered as markdown tables.
use std::fs;
use std::path::Path;

use crate::domain::{PathKind, classify};
use crate::services::render::render_text;
use crate::services::{RenderError, RenderResult};

/// One immediate child of a listed directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_directory: bool,
}

fn collect_entries(path: &Path) -> RenderResult<Vec<DirectoryEntry>> {
    let read_dir = fs::read_dir(path).map_err(|source| RenderError::ReadDirectory {
        path: path.to_path_buf(),
        source,
    })?;

    let mut entries: Vec<DirectoryEntry> = read_dir
        .filter_map(|entry| entry.ok())
        .map(|entry| {
            let is_directory = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            DirectoryEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                is_directory,
            }
        })
        .collect();

    entries.sort_by(|a, b| match (a.is_directory, b.is_directory) {
        (true, false) => std::cmp::Ordering::Less,
        (false, true) => std::cmp::Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });

    Ok(entries)
}

/// Assemble the listing as a markdown document: a heading equal to the URI
/// and a table whose first row is a synthetic link to the parent directory.
pub fn listing_markdown(uri: &str, entries: &[DirectoryEntry]) -> String {
    let base = uri.trim_end_matches('/');

    let mut document = format!("# {uri}\n\n| | |\n|---|---|\n");
    document.push_str(&format!("| [..]({base}/..) | |\n"));
    for entry in entries {
        document.push_str(&format!("| [{0}]({base}/{0}) | |\n", entry.name));
    }
    document
}

/// Render the contents of the directory at `path` as an HTML page.
///
/// `uri` must be directory-form (trailing separator) so the emitted
/// relative links resolve against the directory itself.
pub fn render_directory(uri: &str, path: &Path, template_text: &str) -> RenderResult<String> {
    if !uri.ends_with('/') {
        return Err(RenderError::DirectoryUri {
            uri: uri.to_string(),
        });
    }

    if classify(path) != PathKind::Directory {
        return Err(RenderError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    let entries = collect_entries(path)?;
    Ok(render_text(&listing_markdown(uri, &entries), template_text))
}
