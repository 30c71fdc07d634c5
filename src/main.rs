//! Application entry point building the Actix-Web server.
use std::path::PathBuf;

use clap::Parser;
use config::Config;
use dotenvy::dotenv;

use mdserve::models::config::{ConfigDocument, validate};
use mdserve::run;
use mdserve::services::site::SiteData;

/// Serve a directory of markdown documents as rendered HTML pages.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short = 'c', long, default_value = "config.json")]
    config_path: PathBuf,
}

#[actix_web::main]
async fn main() {
    // Load environment variables from `.env` in local development.
    dotenv().ok();
    // Initialize logger with default level INFO if not provided.
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let settings = Config::builder()
        .add_source(config::File::from(cli.config_path.clone()))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let document = match settings.try_deserialize::<ConfigDocument>() {
        Ok(document) => document,
        Err(err) => {
            log::error!("Error loading server config: {}", err);
            std::process::exit(1);
        }
    };

    let server_config = match validate(&document, false) {
        Some(server_config) => server_config,
        None => std::process::exit(1),
    };

    let site = match SiteData::build(&server_config) {
        Ok(site) => site,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };

    match run(server_config, site).await {
        Ok(()) => log::info!("no longer listening for connections"),
        Err(err) => {
            log::error!("Error starting server: {}", err);
            std::process::exit(1);
        }
    }
}
