//! Web server that renders a directory of markdown documents as HTML pages.
use actix_web::{App, HttpServer, web};

pub mod domain;
pub mod models;
pub mod routes;
pub mod services;

use crate::models::config::ServerConfig;
use crate::services::site::SiteData;

/// Serve documents from `site` until the transport shuts down.
pub async fn run(config: ServerConfig, site: SiteData) -> std::io::Result<()> {
    log::info!(
        "listening for connections on port {}, with document root at '{}' and template file '{}'",
        config.port,
        config.doc_root.display(),
        config.template_path.display()
    );

    let site = web::Data::new(site);

    HttpServer::new(move || {
        App::new()
            .app_data(site.clone())
            .service(routes::main::serve)
    })
    .bind(("127.0.0.1", config.port))?
    .run()
    .await
}
