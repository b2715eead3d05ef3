mod config;
mod deploy;
mod error;
mod sanitizer;
mod service;
mod services;
mod storage;

use crate::config::Config;
use crate::deploy::DeployNotifier;
use crate::service::DatasetService;
use crate::services::admin::auth::AdminSecret;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::info;

fn startup_error(e: error::WallError) -> std::io::Error {
    std::io::Error::other(e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::parse();
    config.validate().map_err(startup_error)?;

    let store = storage::build_store(&config).map_err(startup_error)?;
    let notifier = DeployNotifier::new(config.deploy_hook_url.clone(), config.remote_timeout())
        .map_err(startup_error)?;
    let service = web::Data::new(DatasetService::new(store, notifier));
    let secret = web::Data::new(AdminSecret::new(config.admin_password.clone()));
    let json_limit = config.json_limit;

    info!("Using {:?} storage", config.storage);
    info!("Server running at {}", config.url());

    HttpServer::new(move || {
        App::new()
            .app_data(services::json_config(json_limit))
            .app_data(service.clone())
            .app_data(secret.clone())
            .configure(services::configure_app)
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
