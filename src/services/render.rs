//! Markdown rendering and template placeholder substitution.
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use pulldown_cmark::{Options, Parser, html};

use crate::domain::{PathKind, classify};
use crate::services::{RenderError, RenderResult};

/// The only placeholder key the renderer populates.
const BODY_KEY: &str = "body";

/// Substitute `{{ key }}` placeholders in `template_text`.
///
/// A placeholder is a run of non-`}` characters between `{{` and the first
/// `}}`; the key is trimmed of surrounding whitespace before lookup. Known
/// keys are replaced, unknown placeholders are kept verbatim, and a `{{`
/// never closed by `}}` is ordinary text. Repeated keys substitute
/// independently.
pub fn fill_template(template_text: &str, replacements: &HashMap<&str, &str>) -> String {
    let mut output = String::with_capacity(template_text.len());
    let mut rest = template_text;

    while let Some(open) = rest.find("{{") {
        output.push_str(&rest[..open]);
        let candidate = &rest[open..];
        let body = &candidate[2..];

        match body.find('}') {
            // A well-formed placeholder closes the key with `}}`.
            Some(close) if body[close..].starts_with("}}") => {
                let key = body[..close].trim();
                match replacements.get(key) {
                    Some(value) => output.push_str(value),
                    None => output.push_str(&candidate[..2 + close + 2]),
                }
                rest = &body[close + 2..];
            }
            _ => {
                output.push_str("{{");
                rest = body;
            }
        }
    }

    output.push_str(rest);
    output
}

/// Convert markdown to HTML with the tables, task-list and strikethrough
/// extensions enabled.
pub fn markdown_to_html(text: &str) -> String {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(text, options);

    let mut converted = String::new();
    html::push_html(&mut converted, parser);
    converted
}

/// Render markdown text into the page template.
pub fn render_text(markdown_text: &str, template_text: &str) -> String {
    let body = markdown_to_html(markdown_text);
    let replacements = HashMap::from([(BODY_KEY, body.as_str())]);
    fill_template(template_text, &replacements)
}

/// Render the markdown file at `path` into the page template.
pub fn render_file(path: &Path, template_text: &str) -> RenderResult<String> {
    match classify(path) {
        PathKind::File | PathKind::Symlink => {}
        _ => {
            return Err(RenderError::NotAFile {
                path: path.to_path_buf(),
            });
        }
    }

    let content = fs::read_to_string(path).map_err(|source| RenderError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(render_text(&content, template_text))
}
