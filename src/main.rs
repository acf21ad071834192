use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;

use crate::config::app_config::AppConfig;
use crate::logger::init_logger;
use crate::services::janitor_service::JanitorService;
use crate::services::slack_client::{ReqwestTransport, SlackClient};

mod app;
mod config;
mod errors;
mod handlers;
mod logger;
mod models;
mod services;

#[cfg(test)]
mod tests;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let cfg = AppConfig::from_env().context("Configuración incompleta")?;
    log::info!(
        "Zona horaria={}, API={}",
        cfg.time_zone,
        cfg.api_base
    );

    // Cliente y zona horaria se construyen una sola vez y se inyectan
    let slack_client = SlackClient::with_base(
        Arc::new(ReqwestTransport::new()),
        cfg.slack_token.clone(),
        cfg.api_base.clone(),
    );
    let janitor = JanitorService::new(slack_client, cfg.time_zone, cfg.janitor_settings());

    log::info!("Levantando servidor en 0.0.0.0:{}", cfg.port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(janitor.clone()))
            .configure(app::init_app)
    })
    .workers(1)
    .bind(("0.0.0.0", cfg.port))
    .with_context(|| format!("No se pudo abrir el puerto {}", cfg.port))?
    .run()
    .await
    .context("El servidor terminó con error")
}
