use actix_web::HttpResponse;
use actix_web::http::header::{self, ContentType};

use crate::services::site::SiteData;

pub mod main;

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn html_page(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}

fn not_found(site: &SiteData) -> HttpResponse {
    HttpResponse::NotFound()
        .content_type(ContentType::html())
        .body(site.not_found_html.clone())
}

fn render_failure(uri: &str) -> HttpResponse {
    HttpResponse::InternalServerError()
        .content_type(ContentType::html())
        .body(format!("failed to render page for URI: {uri}"))
}
