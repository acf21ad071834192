//! handlers/janitor_handler.rs
//! Disparadores del cron. Solo corren si el request trae `X-Appengine-Cron: true`.
//!
//! Ese header no es autenticación real (cualquiera puede mandarlo fuera de App
//! Engine); habría que reemplazarlo por requests firmados.

use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use chrono::Utc;

use crate::services::janitor_service::{JanitorService, ProgressReport};

pub const CRON_HEADER: &str = "X-Appengine-Cron";
pub const NON_CRON_BODY: &str = "This handler only accepts requests from Appengine Cron.\n";

fn text_response(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/plain; charset=utf-8")
        .body(body)
}

fn is_cron_request(req: &HttpRequest) -> bool {
    req.headers()
        .get(CRON_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "true")
        .unwrap_or(false)
}

/// `Some(400)` si el request no viene del cron.
fn reject_non_cron(req: &HttpRequest) -> Option<HttpResponse> {
    if is_cron_request(req) {
        return None;
    }
    log::warn!(
        "(reject_non_cron) {} {} sin header de cron, headers={:?}",
        req.method(),
        req.path(),
        req.headers()
    );
    Some(text_response(StatusCode::BAD_REQUEST, NON_CRON_BODY.to_string()))
}

/// Cualquier método sobre /
pub async fn index_endpoint() -> HttpResponse {
    text_response(StatusCode::OK, "Hello, World!\n".to_string())
}

/// Cualquier otra ruta
pub async fn not_found_endpoint() -> HttpResponse {
    text_response(StatusCode::NOT_FOUND, "404 page not found\n".to_string())
}

/// GET|POST /create_channel
pub async fn create_channel_endpoint(
    req: HttpRequest,
    janitor: web::Data<JanitorService>,
) -> HttpResponse {
    if let Some(resp) = reject_non_cron(&req) {
        return resp;
    }

    let mut report = ProgressReport::new();
    match janitor.rotate_channels(Utc::now(), &mut report).await {
        Ok(summary) => {
            log::info!(
                "(create_channel_endpoint) Rotación terminada: canal={}, invitados={}, archivado={:?}",
                summary.channel.id,
                summary.invited,
                summary.archived
            );
            text_response(StatusCode::OK, report.into_text())
        }
        Err(e) => {
            log::error!("(create_channel_endpoint) Rotación abortada: {:?}", e);
            report.note(format!("Error: {}", e));
            text_response(StatusCode::INTERNAL_SERVER_ERROR, report.into_text())
        }
    }
}

/// GET|POST /post_call
pub async fn post_call_endpoint(
    req: HttpRequest,
    janitor: web::Data<JanitorService>,
) -> HttpResponse {
    if let Some(resp) = reject_non_cron(&req) {
        return resp;
    }

    let mut report = ProgressReport::new();
    match janitor.post_call(Utc::now(), &mut report).await {
        Ok(summary) => {
            log::info!(
                "(post_call_endpoint) Llamada {} publicada en {}",
                summary.call_id,
                summary.channel_id
            );
            text_response(StatusCode::OK, report.into_text())
        }
        Err(e) => {
            log::error!("(post_call_endpoint) Publicación de llamada abortada: {:?}", e);
            report.note(format!("Error: {}", e));
            text_response(StatusCode::INTERNAL_SERVER_ERROR, report.into_text())
        }
    }
}
