//! Read-only site state computed once at startup.
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{PathKind, classify};
use crate::models::config::ServerConfig;
use crate::services::RenderError;
use crate::services::render::{render_file, render_text};

/// Markdown shown when the document root carries no `404.md`.
const NOT_FOUND_MARKDOWN: &str = "# 404 Not Found";
/// Name of the optional custom not-found document.
const NOT_FOUND_FILE: &str = "404.md";

/// Errors raised while assembling the site state.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("failed to load template from template file: '{}'", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render the not-found page")]
    NotFoundPage(#[from] RenderError),
}

/// Per-process data shared read-only across all request handlers.
#[derive(Debug)]
pub struct SiteData {
    pub doc_root: PathBuf,
    pub template_text: String,
    pub not_found_html: String,
}

impl SiteData {
    /// Load the page template and pre-render the not-found page.
    pub fn build(config: &ServerConfig) -> Result<Self, SiteError> {
        let template_text =
            fs::read_to_string(&config.template_path).map_err(|source| SiteError::Template {
                path: config.template_path.clone(),
                source,
            })?;
        let not_found_html = load_not_found_page(&config.doc_root, &template_text)?;

        Ok(Self {
            doc_root: config.doc_root.clone(),
            template_text,
            not_found_html,
        })
    }
}

fn load_not_found_page(doc_root: &Path, template_text: &str) -> Result<String, RenderError> {
    let custom = doc_root.join(NOT_FOUND_FILE);
    match classify(&custom) {
        PathKind::Missing => Ok(render_text(NOT_FOUND_MARKDOWN, template_text)),
        _ => render_file(&custom, template_text),
    }
}
