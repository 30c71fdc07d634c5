use actix_files::NamedFile;
use actix_web::{HttpRequest, HttpResponse, get, web};

use crate::routes::{html_page, not_found, redirect, render_failure};
use crate::services::router::{Resolution, resolve};
use crate::services::site::SiteData;
use crate::services::{listing, render};

#[get("/{path:.*}")]
pub async fn serve(
    req: HttpRequest,
    path: web::Path<String>,
    site: web::Data<SiteData>,
) -> HttpResponse {
    match resolve(&site.doc_root, &path.into_inner()) {
        Resolution::NotFound => {
            log::debug!("no document for URI {}", req.uri());
            not_found(&site)
        }
        Resolution::Redirect { location } => redirect(&location),
        Resolution::Markdown { uri, path } => {
            match render::render_file(&path, &site.template_text) {
                Ok(html) => html_page(html),
                Err(err) => {
                    log::error!("failed to render '{}': {err}", path.display());
                    render_failure(&uri)
                }
            }
        }
        Resolution::Listing { uri, path } => {
            match listing::render_directory(&uri, &path, &site.template_text) {
                Ok(html) => html_page(html),
                Err(err) => {
                    log::error!("failed to render '{}': {err}", path.display());
                    render_failure(&uri)
                }
            }
        }
        Resolution::Raw { path } => match NamedFile::open_async(&path).await {
            Ok(file) => file.into_response(&req),
            Err(err) => {
                log::warn!("failed to open '{}': {err}", path.display());
                not_found(&site)
            }
        },
        Resolution::Unsupported { uri } => {
            log::error!("unsupported file type for URI {uri}");
            render_failure(&uri)
        }
    }
}
