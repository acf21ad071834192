//! app.rs
use crate::handlers::janitor_handler;
use actix_web::web;

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").to(janitor_handler::index_endpoint))
        .service(
            web::resource("/create_channel")
                .route(web::get().to(janitor_handler::create_channel_endpoint))
                .route(web::post().to(janitor_handler::create_channel_endpoint)),
        )
        .service(
            web::resource("/post_call")
                .route(web::get().to(janitor_handler::post_call_endpoint))
                .route(web::post().to(janitor_handler::post_call_endpoint)),
        )
        .default_service(web::to(janitor_handler::not_found_endpoint));
}
